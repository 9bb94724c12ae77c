use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A response received by the transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The decoded body. An empty body is `Value::Null`.
    pub body: Value,
}

impl TransportResponse {
    /// Returns `true` if the status is in the `2xx` range.
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
