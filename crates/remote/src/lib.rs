//! Hosted services behind the core capability traits.
//!
//! - [`GroqChat`]: OpenAI-compatible chat completions ([`tutor_core::ChatCompletion`])
//! - [`WhisperTranscriber`]: audio transcription ([`tutor_core::SpeechToText`])
//! - [`TranslateTts`]: MP3 speech synthesis ([`tutor_core::TextToSpeech`])
//!
//! All clients are blocking.

mod http;

pub mod chat;
pub mod config;
pub mod transcribe;
pub mod tts;

pub use chat::GroqChat;
pub use config::GroqConfig;
pub use transcribe::WhisperTranscriber;
pub use tts::TranslateTts;
