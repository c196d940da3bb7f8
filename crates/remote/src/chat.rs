//! Chat completions against an OpenAI-compatible endpoint.

use crate::config::GroqConfig;
use crate::http;
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tutor_core::{ChatCompletion, ChatMessage, RemoteError};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

/// Blocking chat client for Groq (or any OpenAI-compatible server).
#[derive(Debug, Clone)]
pub struct GroqChat {
    client: Client,
    config: GroqConfig,
}

impl GroqChat {
    pub fn new(config: GroqConfig) -> Result<Self, RemoteError> {
        Ok(Self {
            client: http::client()?,
            config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.chat_model
    }
}

impl ChatCompletion for GroqChat {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String, RemoteError> {
        let body = ChatRequest {
            model: &self.config.chat_model,
            messages,
        };
        log::debug!(
            "POST chat/completions ({} messages, model {})",
            messages.len(),
            self.config.chat_model
        );

        let response = self
            .client
            .post(self.config.endpoint("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .map_err(http::transport)?;
        let parsed: Value = http::check_status(response)?.json().map_err(http::decode)?;
        message_content(&parsed)
    }
}

/// `choices[0].message.content` of a completion response.
fn message_content(response: &Value) -> Result<String, RemoteError> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| RemoteError::Decode("completion has no message content".into()))
}
