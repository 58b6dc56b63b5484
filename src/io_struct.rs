use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound body for the relay endpoint. Unknown fields are captured and ignored.
#[derive(Debug, Deserialize, Serialize)]
pub struct ChatRelayInput {
    pub text: Option<String>,

    #[serde(flatten)]
    pub other: Value,
}

impl ChatRelayInput {
    pub fn user_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request (OpenAI-compatible format).
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Consumed subset of the provider's non-streaming completion response.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first returned choice, if any.
    pub fn first_content(self) -> Option<String> {
        self.choices.into_iter().next().and_then(|c| c.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_text_missing_and_empty() {
        let input: ChatRelayInput = serde_json::from_str("{}").unwrap();
        assert!(input.user_text().is_none());

        let input: ChatRelayInput = serde_json::from_str(r#"{"text": ""}"#).unwrap();
        assert!(input.user_text().is_none());

        let input: ChatRelayInput = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(input.user_text(), Some("hello"));
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let input: ChatRelayInput =
            serde_json::from_str(r#"{"text": "hi", "session": 42, "locale": "en"}"#).unwrap();
        assert_eq!(input.user_text(), Some("hi"));
        assert_eq!(input.other["session"], 42);
    }

    #[test]
    fn test_completion_request_shape() {
        let request = ChatCompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage::system("persona"), ChatMessage::user("question")],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "question");
    }

    #[test]
    fn test_first_content() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "DCA is..."}},
                            {"message": {"role": "assistant", "content": "ignored"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_content(), Some("DCA is...".to_string()));
    }

    #[test]
    fn test_first_content_empty_choices() {
        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(response.first_content(), None);
    }

    #[test]
    fn test_first_content_null_content() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert_eq!(response.first_content(), None);
    }
}
