//! A local fake transport for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use oratio_transport::{
    ErrorKind, Transport, TransportError, TransportRequest, TransportResponse,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Error {}

impl TransportError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    replies: VecDeque<PresetReply>,
    requests: Vec<TransportRequest>,
}

/// A local fake transport for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// remote should answer. Every call consumes the next reply in order, and
/// records the request so tests can inspect what was sent. If there are no
/// replies left, an error will be returned.
///
/// Clones share the same script, so a test can keep a handle after moving
/// the transport into a client.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestTransport {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl TestTransport {
    #[inline]
    pub fn add_reply(&self, reply: PresetReply) {
        self.lock().replies.push_back(reply);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns all requests received so far.
    #[inline]
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.lock().requests.clone()
    }

    /// Returns the number of replies not consumed yet.
    #[inline]
    pub fn pending_replies(&self) -> usize {
        self.lock().replies.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for TestTransport {
    type Error = crate::Error;

    fn call(
        &self,
        req: &TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, Self::Error>> + Send + 'static
    {
        let reply = {
            let mut script = self.lock();
            script.requests.push(req.clone());
            script.replies.pop_front()
        };
        let delay = self.delay;

        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            match reply {
                Some(PresetReply::Response(resp)) => Ok(TransportResponse {
                    status: resp.status,
                    body: resp.body,
                }),
                Some(PresetReply::Failure(message)) => Err(Error {
                    message,
                    kind: ErrorKind::Connection,
                }),
                None => Err(Error {
                    message: "no enough replies".to_owned(),
                    kind: ErrorKind::Other,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use oratio_transport::Method;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_replies_in_order() {
        let transport = TestTransport::default();
        transport.add_reply(PresetReply::completion("Hello, world!", 3, 4));
        transport.add_reply(PresetReply::api_error(500, "overloaded"));

        let req = TransportRequest::new(
            Method::Post,
            "https://api.test/v1/chat/completions",
        )
        .with_body(Some(json!({ "model": "test-model" })));

        let resp = transport.call(&req).await.unwrap();
        assert!(resp.is_success());
        assert_eq!(
            resp.body["choices"][0]["message"]["content"],
            "Hello, world!"
        );

        let resp = transport.call(&req).await.unwrap();
        assert_eq!(resp.status, 500);
        assert_eq!(resp.body["error"]["message"], "overloaded");

        assert_eq!(transport.requests().len(), 2);
        assert_eq!(transport.requests()[0], req);
    }

    #[tokio::test]
    async fn test_error_handling() {
        let transport = TestTransport::default();
        transport.add_reply(PresetReply::failure("connection reset"));
        let req = TransportRequest::new(Method::Get, "https://api.test/v1");

        let err = transport.call(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
        assert_eq!(err.to_string(), "connection reset");

        // The script is exhausted.
        let err = transport.call(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(transport.pending_replies(), 0);
    }

    #[tokio::test]
    async fn test_delay() {
        let mut transport = TestTransport::default();
        transport.set_delay(Duration::from_millis(20));
        transport.add_reply(PresetReply::completion("Hi", 1, 1));

        let req = TransportRequest::new(Method::Get, "https://api.test/v1");
        let started = std::time::Instant::now();
        transport.call(&req).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_clones_share_script() {
        let transport = TestTransport::default();
        let handle = transport.clone();
        handle.add_reply(PresetReply::completion("Hi", 1, 1));

        let req = TransportRequest::new(Method::Get, "https://api.test/v1");
        transport.call(&req).await.unwrap();
        assert_eq!(handle.requests().len(), 1);
    }
}
