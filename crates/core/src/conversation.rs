//! Multi-turn conversations.

use crate::{Agent, Error, Message, Role, User, WireMessage};

/// An ordered log of messages exchanged between a [`User`] and an
/// [`Agent`].
///
/// The log only grows. It starts with the agent's system prompt, and every
/// completed turn appends the user message followed by the assistant
/// reply. The remote keeps no state between calls, so every turn replays
/// the whole log.
#[derive(Clone, Debug)]
pub struct Conversation {
    user: User,
    agent: Agent,
    messages: Vec<Message>,
}

impl Conversation {
    /// Creates a conversation that only holds the agent's system prompt.
    /// Nothing is sent until the first [`Conversation::send`].
    pub fn new(user: &User, agent: &Agent) -> Self {
        Self {
            user: user.clone(),
            agent: agent.clone(),
            messages: vec![agent.system_prompt().clone()],
        }
    }

    /// Starts a conversation by sending the opening message.
    ///
    /// On success the conversation holds the system prompt, the opening
    /// message and the reply.
    pub async fn start<S: Into<String>>(
        user: &User,
        agent: &Agent,
        opening: S,
    ) -> Result<Self, Error> {
        let mut conversation = Self::new(user, agent);
        conversation.send(opening).await?;
        Ok(conversation)
    }

    /// Sends a user message along with the whole history, and returns the
    /// reply.
    ///
    /// The user message and the reply are appended only when the call
    /// succeeds. On failure the log is left as it was.
    pub async fn send<S: Into<String>>(
        &mut self,
        content: S,
    ) -> Result<&Message, Error> {
        let user_msg = Message::user(content);
        let mut wire = self.to_wire();
        wire.push(user_msg.to_wire());

        let response = self.user.complete(self.agent.model(), &wire).await?;
        trace!(
            "turn completed: id={}, total_tokens={}",
            response.id(),
            response.usage().total_tokens
        );

        self.messages.push(user_msg);
        let reply_idx = self.messages.len();
        self.messages.push(Message::from_response(response));
        Ok(&self.messages[reply_idx])
    }

    /// Returns the log in wire form, in order.
    #[inline]
    pub fn to_wire(&self) -> Vec<WireMessage> {
        self.messages.iter().map(Message::to_wire).collect()
    }

    /// Returns the sum of total tokens over every message backed by a
    /// response.
    pub fn total_tokens_used(&self) -> u64 {
        self.messages
            .iter()
            .filter_map(Message::response)
            .map(|resp| resp.usage().total_tokens)
            .sum()
    }

    /// Returns all messages, in order.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the most recent assistant message, if any.
    #[inline]
    pub fn last_reply(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|msg| msg.role() == Role::Assistant)
    }

    /// Returns the agent.
    #[inline]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Returns the user.
    #[inline]
    pub fn user(&self) -> &User {
        &self.user
    }
}
