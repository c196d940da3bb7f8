//! Groq connection settings, read from the environment.

use std::env;
use tutor_core::RemoteError;

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const BASE_URL_VAR: &str = "GROQ_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-large-v3-turbo";

/// Connection settings for the Groq API.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    /// Without a trailing slash.
    pub base_url: String,
    pub chat_model: String,
    pub transcription_model: String,
}

impl GroqConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
        }
    }

    /// Read `GROQ_API_KEY` and, if set, `GROQ_BASE_URL`.
    pub fn from_env() -> Result<Self, RemoteError> {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| RemoteError::Credentials(format!("{} is not set", API_KEY_VAR)))?;

        let mut config = Self::new(api_key.trim());
        if let Ok(base) = env::var(BASE_URL_VAR) {
            if !base.trim().is_empty() {
                config = config.with_base_url(base.trim());
            }
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
