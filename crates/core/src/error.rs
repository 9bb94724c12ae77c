use std::error::Error as StdError;
use std::fmt::{self, Display};

use oratio_transport::{ErrorKind as TransportErrorKind, TransportError};
use serde_json::Value;

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The call didn't reach the remote, or the remote answered with a
    /// non-success status.
    Transport,
    /// The remote rejected the credential (`401` or `403`).
    Authentication,
    /// The remote answered with a success status, but the payload doesn't
    /// have the expected shape.
    MalformedResponse,
}

/// Error type for all operations of this crate.
#[derive(Clone, Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    body: Option<Value>,
    transport_kind: Option<TransportErrorKind>,
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::MalformedResponse,
            message: message.into(),
            status: None,
            body: None,
            transport_kind: None,
        }
    }

    pub(crate) fn from_transport(err: &dyn TransportError) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: err.to_string(),
            status: None,
            body: None,
            transport_kind: Some(err.kind()),
        }
    }

    /// Creates an error from a non-success answer. The message is taken
    /// from the remote's `error.message` when there is one.
    pub(crate) fn from_status(status: u16, body: Value) -> Self {
        let kind = match status {
            401 | 403 => ErrorKind::Authentication,
            _ => ErrorKind::Transport,
        };
        let remote = body.pointer("/error/message").and_then(Value::as_str);
        let message = match remote {
            Some(message) => message.to_owned(),
            None => format!("remote answered with status {status}"),
        };
        Self {
            kind,
            message,
            status: Some(status),
            body: Some(body),
            transport_kind: None,
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status, if the remote answered.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the body the remote answered with, if any.
    #[inline]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Returns the kind of the underlying transport failure, if the call
    /// didn't reach the remote.
    #[inline]
    pub fn transport_kind(&self) -> Option<TransportErrorKind> {
        self.transport_kind
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            ErrorKind::Transport => "transport error",
            ErrorKind::Authentication => "authentication error",
            ErrorKind::MalformedResponse => "malformed response",
        };
        match self.status {
            Some(status) => write!(f, "{prefix} ({status}): {}", self.message),
            None => write!(f, "{prefix}: {}", self.message),
        }
    }
}

impl StdError for Error {}
