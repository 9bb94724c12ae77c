use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A preset answer to one transport call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    #[serde(rename = "response")]
    Response(PresetResponse),
    /// The call fails without reaching the remote.
    #[serde(rename = "failure")]
    Failure(String),
}

/// A preset HTTP answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetResponse {
    pub status: u16,
    pub body: Value,
}

impl PresetReply {
    /// Creates a reply with an arbitrary status and body.
    #[inline]
    pub fn with_status(status: u16, body: Value) -> Self {
        Self::Response(PresetResponse { status, body })
    }

    /// Creates a successful chat completion reply with a single choice.
    ///
    /// The total token count is the sum of the prompt and completion
    /// counts.
    pub fn completion(
        text: impl Into<String>,
        prompt_tokens: u64,
        completion_tokens: u64,
    ) -> Self {
        Self::completions([text.into()], prompt_tokens, completion_tokens)
    }

    /// Creates a successful chat completion reply with one choice per
    /// text.
    pub fn completions(
        texts: impl IntoIterator<Item = String>,
        prompt_tokens: u64,
        completion_tokens: u64,
    ) -> Self {
        let choices: Vec<Value> = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                json!({
                    "index": index,
                    "message": { "role": "assistant", "content": text },
                    "finish_reason": "stop"
                })
            })
            .collect();
        Self::with_status(
            200,
            json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "created": 1_700_000_000u64,
                "model": "test-model",
                "choices": choices,
                "usage": {
                    "prompt_tokens": prompt_tokens,
                    "completion_tokens": completion_tokens,
                    "total_tokens": prompt_tokens + completion_tokens
                }
            }),
        )
    }

    /// Creates an error reply in the shape the remote API uses.
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::with_status(
            status,
            json!({
                "error": {
                    "message": message.into(),
                    "type": "invalid_request_error"
                }
            }),
        )
    }

    /// Creates a reply that fails before reaching the remote.
    #[inline]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_deserialize() {
        let replies = vec![
            PresetReply::completion("Hello.", 5, 2),
            PresetReply::api_error(401, "Incorrect API key provided"),
            PresetReply::failure("connection reset"),
        ];

        let serialized = serde_json::to_string(&replies).unwrap();
        let deserialized: Vec<PresetReply> =
            serde_json::from_str(&serialized).unwrap();

        assert_eq!(replies, deserialized);
    }

    #[test]
    fn test_completion_usage() {
        let PresetReply::Response(resp) = PresetReply::completion("Hi", 5, 2)
        else {
            unreachable!("completion must be a response");
        };
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body["usage"]["total_tokens"], 7);
        assert_eq!(resp.body["choices"][0]["message"]["content"], "Hi");
    }
}
