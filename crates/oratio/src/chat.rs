use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::io;

use oratio_core::Conversation;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::output::Output;

/// Error type for [`ChatLoop::run`].
#[derive(Debug)]
pub enum ChatError {
    /// Reading input or printing output failed.
    Io(io::Error),
    /// A turn failed.
    Api(oratio_core::Error),
}

impl Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Io(err) => write!(f, "I/O error: {err}"),
            ChatError::Api(err) => Display::fmt(err, f),
        }
    }
}

impl StdError for ChatError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ChatError::Io(err) => Some(err),
            ChatError::Api(err) => Some(err),
        }
    }
}

impl From<io::Error> for ChatError {
    #[inline]
    fn from(err: io::Error) -> Self {
        ChatError::Io(err)
    }
}

impl From<oratio_core::Error> for ChatError {
    #[inline]
    fn from(err: oratio_core::Error) -> Self {
        ChatError::Api(err)
    }
}

/// An interactive loop that reads lines and sends them to a conversation.
///
/// The loop ends at the end of input or when a line matches one of the
/// exit commands. Blank lines are ignored.
#[derive(Clone, Debug)]
pub struct ChatLoop {
    prompt: String,
    exit_commands: Vec<String>,
}

impl Default for ChatLoop {
    fn default() -> Self {
        Self {
            prompt: "> ".to_owned(),
            exit_commands: vec!["exit".to_owned(), "quit".to_owned()],
        }
    }
}

impl ChatLoop {
    /// Sets the prompt printed before reading each line.
    #[inline]
    pub fn with_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Replaces the exit commands. Commands are matched against the
    /// trimmed line, ignoring ASCII case.
    #[inline]
    pub fn with_exit_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exit_commands = commands.into_iter().map(Into::into).collect();
        self
    }

    fn is_exit_command(&self, line: &str) -> bool {
        self.exit_commands
            .iter()
            .any(|cmd| cmd.eq_ignore_ascii_case(line))
    }

    /// Runs the loop until the input ends or an exit command is read.
    ///
    /// A failed turn stops the loop. The conversation is left as it was
    /// before that turn, so the caller may run the loop again.
    pub async fn run<R, O>(
        &self,
        conversation: &mut Conversation,
        mut input: R,
        output: &mut O,
    ) -> Result<(), ChatError>
    where
        R: AsyncBufRead + Unpin,
        O: Output + ?Sized,
    {
        let mut line = String::new();
        loop {
            output.print(&self.prompt).await?;

            line.clear();
            if input.read_line(&mut line).await? == 0 {
                debug!("input ended");
                break;
            }
            let content = line.trim();
            if content.is_empty() {
                continue;
            }
            if self.is_exit_command(content) {
                debug!("got exit command: {content}");
                break;
            }

            let reply = conversation.send(content).await?;
            output.print(reply.content()).await?;
            output.print("\n").await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use oratio_core::{Agent, ErrorKind, Role, User};
    use oratio_test_transport::{PresetReply, TestTransport};

    use super::*;
    use crate::output::PlainOutput;

    fn conversation(transport: &TestTransport) -> Conversation {
        let user = User::with_api_key(
            "sk-proj-abcdefghijklmnopqrstuvwxyz",
            transport.clone(),
        );
        let agent = Agent::new("gpt-4", "You are terse.");
        Conversation::new(&user, &agent)
    }

    #[tokio::test]
    async fn test_chat_until_exit() {
        let transport = TestTransport::default();
        transport.add_reply(PresetReply::completion("Hello.", 5, 2));
        transport.add_reply(PresetReply::completion("Fine.", 12, 2));
        let mut conversation = conversation(&transport);
        let mut output = PlainOutput::new(Vec::new());

        let input: &[u8] = b"Hi\n\n   \nHow are you?\n  EXIT \nignored\n";
        ChatLoop::default()
            .run(&mut conversation, input, &mut output)
            .await
            .unwrap();

        let printed = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(printed, "> Hello.\n> > > Fine.\n> ");
        assert_eq!(conversation.messages().len(), 5);
        assert_eq!(conversation.messages()[1].content(), "Hi");
        assert_eq!(conversation.messages()[3].role(), Role::User);
        assert_eq!(transport.pending_replies(), 0);
    }

    #[tokio::test]
    async fn test_chat_until_eof() {
        let transport = TestTransport::default();
        transport.add_reply(PresetReply::completion("Hello.", 5, 2));
        let mut conversation = conversation(&transport);
        let mut output = PlainOutput::new(Vec::new());

        let input: &[u8] = b"Hi";
        ChatLoop::default()
            .with_prompt("")
            .run(&mut conversation, input, &mut output)
            .await
            .unwrap();

        assert_eq!(output.into_inner(), b"Hello.\n");
        assert_eq!(conversation.total_tokens_used(), 7);
    }

    #[tokio::test]
    async fn test_custom_exit_commands() {
        let transport = TestTransport::default();
        let mut conversation = conversation(&transport);
        let mut output = PlainOutput::new(Vec::new());

        let input: &[u8] = b"/bye\nexit\n";
        ChatLoop::default()
            .with_exit_commands(["/bye"])
            .run(&mut conversation, input, &mut output)
            .await
            .unwrap();

        assert!(transport.requests().is_empty());
        assert_eq!(conversation.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_turn_stops_loop() {
        let transport = TestTransport::default();
        transport.add_reply(PresetReply::api_error(401, "Incorrect API key"));
        let mut conversation = conversation(&transport);
        let mut output = PlainOutput::new(Vec::new());

        let input: &[u8] = b"Hi\nHello?\n";
        let err = ChatLoop::default()
            .run(&mut conversation, input, &mut output)
            .await
            .unwrap_err();

        match err {
            ChatError::Api(err) => {
                assert_eq!(err.kind(), ErrorKind::Authentication)
            }
            other => unreachable!("unexpected error: {other:?}"),
        }
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(transport.requests().len(), 1);
    }
}
