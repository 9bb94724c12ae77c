use std::fmt::{self, Debug, Display};
use std::sync::Arc;

use oratio_transport::{Method, Transport, TransportRequest};
use serde_json::{Value, json};

use crate::client::TransportClient;
use crate::proto::ModelList;
use crate::{
    ApiKey, Error, ModelId, Response, UserConfig, UserConfigBuilder,
    WireMessage,
};

/// An API credential together with the means to make authenticated calls.
///
/// Cloning a `User` is cheap: clones share the configuration and the
/// transport.
#[derive(Clone)]
pub struct User {
    config: Arc<UserConfig>,
    client: TransportClient,
}

impl User {
    /// Creates a user with the given configuration and transport.
    #[inline]
    pub fn new<T: Transport + 'static>(
        config: UserConfig,
        transport: T,
    ) -> Self {
        Self {
            config: Arc::new(config),
            client: TransportClient::new(transport),
        }
    }

    /// Creates a user talking to the default base URL.
    #[inline]
    pub fn with_api_key<K: Into<ApiKey>, T: Transport + 'static>(
        api_key: K,
        transport: T,
    ) -> Self {
        Self::new(UserConfigBuilder::with_api_key(api_key).build(), transport)
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &UserConfig {
        &self.config
    }

    /// Performs an authenticated call to `path`, relative to the base URL,
    /// and returns the decoded body.
    ///
    /// A non-success status is an error that carries the status and the
    /// body the remote answered with.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, Error> {
        let req = TransportRequest::new(method, self.config.url_for(path))
            .with_header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.expose()),
            )
            .with_header("Content-Type", "application/json")
            .with_body(body);

        let resp = self
            .client
            .call(req)
            .await
            .map_err(|err| Error::from_transport(&*err))?;
        if !resp.is_success() {
            warn!("{method} {path} answered with status {}", resp.status);
            return Err(Error::from_status(resp.status, resp.body));
        }
        Ok(resp.body)
    }

    /// Performs an authenticated `GET`.
    #[inline]
    pub async fn get(&self, path: &str) -> Result<Value, Error> {
        self.request(Method::Get, path, None).await
    }

    /// Performs an authenticated `POST`.
    #[inline]
    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, Error> {
        self.request(Method::Post, path, body).await
    }

    /// Lists the models available to this credential, in the order the
    /// remote returns them.
    pub async fn list_models(&self) -> Result<Vec<ModelId>, Error> {
        let body = self.get("models").await?;
        let list: ModelList = serde_json::from_value(body)
            .map_err(|err| Error::malformed(format!("{err}")))?;
        Ok(list.data.into_iter().map(|m| ModelId::from(m.id)).collect())
    }

    /// Asks `model` to complete `messages`, sent in the given order.
    pub async fn complete(
        &self,
        model: &ModelId,
        messages: &[WireMessage],
    ) -> Result<Response, Error> {
        let body = json!({
            "model": model.as_str(),
            "messages": messages,
        });
        debug!("completing {} messages with {model}", messages.len());
        let value = self.post("chat/completions", Some(body)).await?;
        Response::from_value(value)
    }
}

impl Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User({})", self.config.api_key)
    }
}

impl Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("api_key", &self.config.api_key)
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
