//! A simple program demonstrates how to use `oratio` as a library.

#[macro_use]
extern crate tracing;

use std::env;
use std::io;
use std::time::Duration;

use oratio::output::{Output, TypedOutput};
use oratio::{
    Agent, ChatLoop, Conversation, HttpTransport, ModelId, User,
    UserConfigBuilder,
};
use owo_colors::OwoColorize;
use tokio::io::BufReader;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let Ok(api_key) = env::var("OPENAI_API_KEY") else {
        eprintln!("OPENAI_API_KEY environment variable is not set");
        return;
    };
    let mut config = UserConfigBuilder::with_api_key(api_key);
    if let Ok(base_url) = env::var("OPENAI_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    let model = env::var("OPENAI_MODEL")
        .map(ModelId::from)
        .unwrap_or_default();
    let prompt = env::var("ORATIO_SYSTEM_PROMPT")
        .unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.to_owned());

    let transport = match HttpTransport::with_timeout(REQUEST_TIMEOUT) {
        Ok(transport) => transport,
        Err(err) => {
            eprintln!("failed to create HTTP client: {err}");
            return;
        }
    };
    let user = User::new(config.build(), transport);
    let agent = Agent::new(model, prompt);
    info!("chatting as {user} with {agent}");

    println!(
        "{} {}",
        "Chatting with".dimmed(),
        agent.model().bright_cyan()
    );
    println!("{}", "Type `exit` or `quit` to leave.".dimmed());

    let mut conversation = Conversation::new(&user, &agent);
    let mut output = TypedOutput::new(io::stdout());
    let input = BufReader::new(tokio::io::stdin());

    let result = ChatLoop::default()
        .run(&mut conversation, input, &mut output)
        .await;
    if let Err(err) = result {
        error!("chat stopped: {err}");
        eprintln!("{} {err}", "error:".bright_red());
    }

    let summary = format!(
        "{} tokens used in {} turns",
        conversation.total_tokens_used(),
        conversation.messages().len().saturating_sub(1) / 2
    );
    if let Err(err) = output.print("\n").await {
        warn!("failed to write to stdout: {err}");
    }
    println!("{}", summary.dimmed());
}
