//! Completion responses.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;
use crate::proto::ChatCompletion;

/// Token counters reported by the remote for one completion.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct Usage {
    /// Tokens in the submitted messages.
    pub prompt_tokens: u64,
    /// Tokens in the generated candidates.
    pub completion_tokens: u64,
    /// Total tokens billed for the call.
    pub total_tokens: u64,
}

/// A parsed chat completion.
///
/// A `Response` always has at least one candidate, so [`Response::text`]
/// never fails. Deserializing goes through [`Response::from_value`], so
/// the same checks apply.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Response {
    id: String,
    created: u64,
    model: Option<String>,
    candidates: Vec<String>,
    usage: Usage,
}

impl Response {
    /// Parses a raw completion payload.
    ///
    /// Fails with [`ErrorKind::MalformedResponse`](crate::ErrorKind) if
    /// a required field is absent or mistyped, or if there are no choices.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let completion: ChatCompletion = serde_json::from_value(value)
            .map_err(|err| Error::malformed(format!("{err}")))?;
        if completion.choices.is_empty() {
            return Err(Error::malformed("completion has no choices"));
        }

        let candidates = completion
            .choices
            .into_iter()
            .map(|choice| choice.message.content.unwrap_or_default())
            .collect();
        Ok(Self {
            id: completion.id,
            created: completion.created,
            model: completion.model,
            candidates,
            usage: Usage {
                prompt_tokens: completion.usage.prompt_tokens,
                completion_tokens: completion.usage.completion_tokens,
                total_tokens: completion.usage.total_tokens,
            },
        })
    }

    /// Returns the completion id assigned by the remote.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the creation time as a unix timestamp in seconds.
    #[inline]
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Returns the creation time.
    #[inline]
    pub fn created_at(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.created)
    }

    /// Returns the model that generated the completion, if reported.
    #[inline]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Returns all candidate texts, one per choice, in order.
    #[inline]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Returns the primary text, which is the first candidate.
    #[inline]
    pub fn text(&self) -> &str {
        // Construction rejects empty choices.
        self.candidates.first().map(String::as_str).unwrap_or_default()
    }

    /// Returns the token counters.
    #[inline]
    pub fn usage(&self) -> Usage {
        self.usage
    }
}

impl TryFrom<Value> for Response {
    type Error = Error;

    #[inline]
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}
