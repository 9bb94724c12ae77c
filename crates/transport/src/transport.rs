use std::error::Error;

use crate::error::ErrorKind;
use crate::request::TransportRequest;
use crate::response::TransportResponse;

/// The error type for a transport.
pub trait TransportError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that performs HTTP calls on behalf of the client.
///
/// Once the transport is created, it should behave like a stateless
/// object. It can still have internal state (a connection pool, for
/// example), but callers should not rely on it, and the transport should
/// be prepared for being dropped anytime.
///
/// Implementations must not retry on their own and must not turn a
/// non-success status into an error: the caller decides what a status
/// means.
pub trait Transport: Send + Sync {
    /// The error type that may be returned by the transport.
    type Error: TransportError;

    /// Performs the call described by `req`.
    fn call(
        &self,
        req: &TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, Self::Error>> + Send + 'static;
}
