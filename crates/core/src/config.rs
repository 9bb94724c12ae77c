use std::fmt::{self, Debug, Display};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Number of leading characters kept when a key is displayed.
const MASK_PREFIX_LEN: usize = 13;
/// Number of trailing characters kept when a key is displayed.
const MASK_SUFFIX_LEN: usize = 5;
const ELISION: &str = "...";

/// An API key.
///
/// Neither `Display` nor `Debug` reveal the whole key: only the first 13
/// and the last 5 characters are shown, which is enough to tell keys
/// apart. Keys too short to be masked that way are shown as `...`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates an API key from its raw value.
    #[inline]
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    /// Returns the raw key.
    ///
    /// Don't log the returned value.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the masked form of the key.
    pub fn masked(&self) -> String {
        let len = self.0.chars().count();
        if len < MASK_PREFIX_LEN + MASK_SUFFIX_LEN {
            return ELISION.to_owned();
        }
        let prefix: String = self.0.chars().take(MASK_PREFIX_LEN).collect();
        let suffix: String =
            self.0.chars().skip(len - MASK_SUFFIX_LEN).collect();
        format!("{prefix}{ELISION}{suffix}")
    }
}

impl From<&str> for ApiKey {
    #[inline]
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ApiKey {
    #[inline]
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

/// Builder for [`UserConfig`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UserConfigBuilder {
    api_key: ApiKey,
    base_url: Option<String>,
}

impl UserConfigBuilder {
    /// Creates a builder with the given API key.
    #[inline]
    pub fn with_api_key<K: Into<ApiKey>>(api_key: K) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    /// Sets a custom base URL.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> UserConfig {
        UserConfig {
            api_key: self.api_key,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

impl Debug for UserConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserConfigBuilder")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Configuration of a [`User`](crate::User).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserConfig {
    pub(crate) api_key: ApiKey,
    pub(crate) base_url: String,
}

impl UserConfig {
    /// Returns the API key.
    #[inline]
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the base URL every request path is resolved against.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `path` against the base URL, with exactly one `/` between
    /// them.
    pub(crate) fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
