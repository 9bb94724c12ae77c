use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::message::{Message, preview};

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const PROMPT_PREVIEW_LEN: usize = 30;

/// A model identifier, such as `gpt-4`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Returns the identifier.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ModelId {
    #[inline]
    fn default() -> Self {
        Self(DEFAULT_MODEL.to_owned())
    }
}

impl From<&str> for ModelId {
    #[inline]
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ModelId {
    #[inline]
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reusable persona: the model to talk to and the system prompt that
/// opens every conversation with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Agent {
    model: ModelId,
    system_prompt: Message,
}

impl Agent {
    /// Creates an agent. The prompt becomes a system message.
    #[inline]
    pub fn new<M: Into<ModelId>, S: Into<String>>(model: M, prompt: S) -> Self {
        Self {
            model: model.into(),
            system_prompt: Message::system(prompt),
        }
    }

    /// Returns the model.
    #[inline]
    pub fn model(&self) -> &ModelId {
        &self.model
    }

    /// Returns the system prompt message.
    #[inline]
    pub fn system_prompt(&self) -> &Message {
        &self.system_prompt
    }

    /// Returns the text of the system prompt.
    #[inline]
    pub fn prompt(&self) -> &str {
        self.system_prompt.content()
    }
}

impl Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Agent({}, {:?})",
            self.model,
            preview(self.prompt(), PROMPT_PREVIEW_LEN)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    #[test]
    fn test_new_agent() {
        let agent = Agent::new("gpt-4", "You are terse.");
        assert_eq!(agent.model().as_str(), "gpt-4");
        assert_eq!(agent.system_prompt().role(), Role::System);
        assert_eq!(agent.prompt(), "You are terse.");
        assert_eq!(agent.to_string(), "Agent(gpt-4, \"You are terse.\")");

        let agent = Agent::new(String::from("gpt-4o"), "x".repeat(31));
        assert_eq!(
            agent.to_string(),
            format!("Agent(gpt-4o, \"{}...\")", "x".repeat(30))
        );
    }

    #[test]
    fn test_default_model() {
        let agent = Agent::new(ModelId::default(), "You are helpful.");
        assert_eq!(agent.model().as_str(), "gpt-3.5-turbo");
    }
}
