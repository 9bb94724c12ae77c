//! Core types of the client: credentials, agents, messages, completion
//! responses and conversations.
//!
//! Nothing here performs I/O by itself. Every remote call goes through the
//! [`Transport`](oratio_transport::Transport) a [`User`] was created with,
//! which keeps the conversation bookkeeping testable without a network.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod agent;
mod client;
mod config;
pub mod conversation;
mod error;
pub mod message;
mod proto;
pub mod response;
mod user;

pub use agent::{Agent, ModelId};
pub use config::{ApiKey, UserConfig, UserConfigBuilder};
pub use conversation::Conversation;
pub use error::{Error, ErrorKind};
pub use message::{Message, Role, WireMessage};
pub use response::{Response, Usage};
pub use user::User;
