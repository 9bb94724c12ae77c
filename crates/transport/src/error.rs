use std::fmt::{self, Display};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The connection to the remote could not be established.
    Connection,
    /// The remote didn't answer in time.
    Timeout,
    /// The remote answered with a payload that can't be decoded.
    InvalidPayload,
    /// Any other errors.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Connection => "connection",
            ErrorKind::Timeout => "timeout",
            ErrorKind::InvalidPayload => "invalid payload",
            ErrorKind::Other => "other",
        };
        f.write_str(s)
    }
}
