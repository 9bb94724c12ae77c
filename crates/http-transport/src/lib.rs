//! A transport for talking to the remote API over HTTP.

#[macro_use]
extern crate tracing;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::time::Duration;

use mime::Mime;
use oratio_transport::{
    ErrorKind, Method, Transport, TransportError, TransportRequest,
    TransportResponse,
};
use reqwest::{Client, header};
use serde_json::Value;

/// Error type for [`HttpTransport`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection
        } else if err.is_decode() || err.is_body() {
            ErrorKind::InvalidPayload
        } else {
            ErrorKind::Other
        };
        Self::new(format!("{err}"), kind)
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl TransportError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// HTTP transport backed by `reqwest`.
///
/// Timeouts are the only policy this type applies, and only when built
/// with [`HttpTransport::with_timeout`]. Nothing is retried.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with a default client.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport whose calls fail after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::from_reqwest)?;
        Ok(Self { client })
    }

    /// Creates a transport on top of an existing client.
    #[inline]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    type Error = Error;

    fn call(
        &self,
        req: &TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, Self::Error>> + Send + 'static
    {
        let mut builder = self
            .client
            .request(reqwest_method(req.method), req.url.as_str());
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }
        let resp_fut = builder.send();

        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    warn!("request failed: {err}");
                    return Err(Error::from_reqwest(err));
                }
            };

            let status = resp.status().as_u16();
            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<Mime>().ok());
            let declared_json = content_type.as_ref().is_some_and(is_json);

            let text = resp.text().await.map_err(Error::from_reqwest)?;
            trace!("got response: status={status}, body={text}");
            let body = decode_body(text, declared_json)?;
            Ok(TransportResponse { status, body })
        }
    }
}

#[inline]
fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
    }
}

#[inline]
fn is_json(m: &Mime) -> bool {
    m.type_() == mime::APPLICATION
        && (m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON))
}

/// Decodes a response body. Bodies that aren't JSON (an HTML error page
/// from a proxy, for example) are kept as a JSON string so the caller can
/// still surface them.
fn decode_body(text: String, declared_json: bool) -> Result<Value, Error> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_str(&text) {
        Ok(value) => Ok(value),
        Err(err) if declared_json => Err(Error::new(
            format!("invalid JSON body: {err}"),
            ErrorKind::InvalidPayload,
        )),
        Err(_) => Ok(Value::String(text)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_post_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(json!({ "model": "gpt-4", "messages": [] })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": "x" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let req = TransportRequest::new(
            Method::Post,
            format!("{}/v1/chat/completions", server.uri()),
        )
        .with_header("Authorization", "Bearer sk-test")
        .with_body(Some(json!({ "model": "gpt-4", "messages": [] })));

        let resp = HttpTransport::new().call(&req).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, json!({ "id": "x" }));
    }

    #[tokio::test]
    async fn test_error_status_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Incorrect API key provided" }
            })))
            .mount(&server)
            .await;

        let req = TransportRequest::new(
            Method::Get,
            format!("{}/v1/models", server.uri()),
        );
        let resp = HttpTransport::new().call(&req).await.unwrap();
        assert_eq!(resp.status, 401);
        assert_eq!(
            resp.body["error"]["message"],
            "Incorrect API key provided"
        );
    }

    #[tokio::test]
    async fn test_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(502)
                    .set_body_raw("<html>Bad Gateway</html>", "text/html"),
            )
            .mount(&server)
            .await;

        let req = TransportRequest::new(Method::Get, server.uri());
        let resp = HttpTransport::new().call(&req).await.unwrap();
        assert_eq!(resp.status, 502);
        assert_eq!(resp.body, json!("<html>Bad Gateway</html>"));
    }

    #[tokio::test]
    async fn test_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let req = TransportRequest::new(Method::Get, server.uri());
        let resp = HttpTransport::new().call(&req).await.unwrap();
        assert_eq!(resp.status, 204);
        assert_eq!(resp.body, Value::Null);
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("{\"id\": ", "application/json"),
            )
            .mount(&server)
            .await;

        let req = TransportRequest::new(Method::Get, server.uri());
        let err = HttpTransport::new().call(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPayload);
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "id": "x" }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let transport =
            HttpTransport::with_timeout(Duration::from_millis(50)).unwrap();
        let req = TransportRequest::new(Method::Get, server.uri());
        let err = transport.call(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Nothing listens on the discard port.
        let req = TransportRequest::new(Method::Get, "http://127.0.0.1:9/");
        let err = HttpTransport::new().call(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
    }

    #[test]
    fn test_is_json() {
        assert!(is_json(&"application/json".parse().unwrap()));
        assert!(is_json(&"application/json; charset=utf-8".parse().unwrap()));
        assert!(is_json(&"application/problem+json".parse().unwrap()));
        assert!(!is_json(&"text/html".parse().unwrap()));
    }
}
