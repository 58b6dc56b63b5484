use crate::io_struct::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use anyhow::Context;

/// Fixed persona attached to every conversation before the user's text.
pub const SYSTEM_PROMPT: &str = "You are Nomu's expert trading and finance guide.\n\
Answer user questions clearly and concisely with practical advice.";

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub api_base: String,
    pub timeout: u64,
    pub api_key: String,
}

/// Process-wide state shared by all requests. Read-only after startup.
#[derive(Debug, Clone)]
pub struct RelayState {
    pub client: reqwest::Client,
    pub model: String,
    pub api_base: String,
    api_key: String,
}

impl RelayState {
    pub fn new(relay_config: RelayConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(relay_config.timeout))
            .build()?;
        Ok(Self {
            client,
            model: relay_config.model,
            api_base: relay_config.api_base,
            api_key: relay_config.api_key,
        })
    }

    pub fn api_path(&self, api_path: &str) -> String {
        if api_path.starts_with("/") {
            format!("{}{}", self.api_base, api_path)
        } else {
            format!("{}/{}", self.api_base, api_path)
        }
    }

    /// Submit one two-message conversation to the provider and return the
    /// content of the first choice. Any failure along the way (connect error,
    /// non-2xx status, undecodable body, no choices) surfaces as an error
    /// carrying the provider-side detail.
    pub async fn chat_completion(&self, text: &str) -> anyhow::Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(text)],
        };
        let url = self.api_path(CHAT_COMPLETIONS_PATH);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("chat completion request failed to send")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("chat completion returned {}: {}", status, body);
        }
        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("failed to decode chat completion response")?;
        completion
            .first_content()
            .context("chat completion response contained no choices")
    }
}
