//! A thin client for chat-completion APIs.
//!
//! Create a [`User`] from an API key and a transport, pick an [`Agent`],
//! and start a [`Conversation`]:
//!
//! ```no_run
//! use oratio::{Agent, Conversation, HttpTransport, User};
//!
//! # async fn run() -> Result<(), oratio::Error> {
//! let user = User::with_api_key("sk-...", HttpTransport::new());
//! let agent = Agent::new("gpt-4", "You are terse.");
//! let mut conversation = Conversation::start(&user, &agent, "Hi").await?;
//! let reply = conversation.send("What's the capital of France?").await?;
//! println!("{}", reply.content());
//! # Ok(())
//! # }
//! ```
//!
//! The crate also includes a CLI for chatting in the terminal.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

mod chat;
pub mod output;

pub use chat::{ChatError, ChatLoop};
pub use oratio_core::*;
pub use oratio_http_transport::HttpTransport;

/// Re-exports of the transport abstraction, for custom transports.
pub mod transport {
    pub use oratio_http_transport::Error as HttpTransportError;
    pub use oratio_transport::*;
}
