//! Data models for Claude API requests and responses

use serde::{Deserialize, Serialize};

/// Models that can generate question batches
///
/// Stored in config by short name (`haiku`, `sonnet`, `opus`); full model
/// ids and the older variant names are accepted when reading.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum ClaudeModel {
    /// Claude Haiku 4.5 - fastest
    Haiku45,
    /// Claude Sonnet 4.5 - better question quality for STEM
    #[default]
    Sonnet45,
    /// Claude Opus 4.5 - most capable
    Opus45,
}

impl ClaudeModel {
    /// Get the API model identifier
    pub fn model_id(&self) -> &'static str {
        match self {
            Self::Haiku45 => "claude-haiku-4-5-20251001",
            Self::Sonnet45 => "claude-sonnet-4-5-20250929",
            Self::Opus45 => "claude-opus-4-5-20251101",
        }
    }

    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Haiku45 => "Claude Haiku 4.5",
            Self::Sonnet45 => "Claude Sonnet 4.5",
            Self::Opus45 => "Claude Opus 4.5",
        }
    }

    /// Short name used in config files
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Haiku45 => "haiku",
            Self::Sonnet45 => "sonnet",
            Self::Opus45 => "opus",
        }
    }

    /// Parse model from a short name or model ID
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "haiku" | "haiku45" | "claude-haiku-4-5-20251001" => Some(Self::Haiku45),
            "sonnet" | "sonnet45" | "claude-sonnet-4-5-20250929" => Some(Self::Sonnet45),
            "opus" | "opus45" | "claude-opus-4-5-20251101" => Some(Self::Opus45),
            _ => None,
        }
    }
}

impl std::str::FromStr for ClaudeModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown model: {}. Options: haiku, sonnet, opus", s))
    }
}

impl TryFrom<String> for ClaudeModel {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClaudeModel> for String {
    fn from(model: ClaudeModel) -> Self {
        model.short_name().to_string()
    }
}

/// Message role in conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// A single message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Request body for Claude messages API
#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub stream: bool,
}

impl CreateMessageRequest {
    /// Create a new request with default settings
    pub fn new(model: ClaudeModel, messages: Vec<Message>) -> Self {
        Self {
            model: model.model_id().to_string(),
            max_tokens: 4096,
            messages,
            system: None,
            stream: false,
        }
    }

    /// Set the system prompt
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Request a streamed response
    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }
}

/// Response from the messages API
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub content: Vec<ContentBlock>,
}

impl MessageResponse {
    /// Concatenated text of all text blocks
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text.as_deref())
            .collect()
    }
}

/// Content block in response
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    /// Block type (usually "text")
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_parse() {
        assert_eq!(ClaudeModel::parse("haiku"), Some(ClaudeModel::Haiku45));
        assert_eq!(ClaudeModel::parse("SONNET"), Some(ClaudeModel::Sonnet45));
        assert_eq!(ClaudeModel::parse("claude-opus-4-5-20251101"), Some(ClaudeModel::Opus45));
        assert_eq!(ClaudeModel::parse("gpt"), None);
    }

    #[test]
    fn create_message_request() {
        let request = CreateMessageRequest::new(ClaudeModel::Haiku45, vec![Message::user("Hello")])
            .with_system("You write exam questions")
            .with_max_tokens(1000);

        assert_eq!(request.model, "claude-haiku-4-5-20251001");
        assert_eq!(request.max_tokens, 1000);
        assert!(!request.stream);
        assert!(request.clone().streaming().stream);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["system"], "You write exam questions");
    }

    #[test]
    fn response_text_joins_text_blocks() {
        let json = r#"{
            "id": "msg_1",
            "content": [
                {"type": "text", "text": "[{\"id\":"},
                {"type": "tool_use"},
                {"type": "text", "text": "\"1\"}]"}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 20}
        }"#;
        let response: MessageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), r#"[{"id":"1"}]"#);
    }

    #[test]
    fn model_serializes_by_short_name() {
        assert_eq!(serde_json::to_string(&ClaudeModel::Opus45).unwrap(), r#""opus""#);
        let model: ClaudeModel = serde_json::from_str(r#""claude-haiku-4-5-20251001""#).unwrap();
        assert_eq!(model, ClaudeModel::Haiku45);
        assert!(serde_json::from_str::<ClaudeModel>(r#""gpt""#).is_err());
    }
}
