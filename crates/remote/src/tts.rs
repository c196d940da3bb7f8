//! Speech synthesis through the public translate TTS endpoint.

use crate::http;
use reqwest::blocking::Client;
use std::io::Write;
use std::path::PathBuf;
use tutor_core::{Error, Language, RemoteError, Result, TextToSpeech};

const TTS_URL: &str = "https://translate.google.com/translate_tts";

/// Longest text the endpoint accepts per request, in characters.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Synthesizes MP3 speech and writes it to a kept temporary file.
#[derive(Debug, Clone)]
pub struct TranslateTts {
    client: Client,
    url: String,
}

impl TranslateTts {
    pub fn new() -> std::result::Result<Self, RemoteError> {
        Ok(Self {
            client: http::client()?,
            url: TTS_URL.to_string(),
        })
    }

    fn fetch_chunk(
        &self,
        chunk: &str,
        index: usize,
        total: usize,
        language: Language,
    ) -> std::result::Result<Vec<u8>, RemoteError> {
        let index = index.to_string();
        let total = total.to_string();
        let length = chunk.chars().count().to_string();
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", language.code()),
                ("client", "tw-ob"),
                ("idx", index.as_str()),
                ("total", total.as_str()),
                ("textlen", length.as_str()),
            ])
            .send()
            .map_err(http::transport)?;
        let bytes = http::check_status(response)?.bytes().map_err(http::decode)?;
        Ok(bytes.to_vec())
    }
}

impl TextToSpeech for TranslateTts {
    fn synthesize(&self, text: &str, language: Language) -> Result<PathBuf> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(Error::SpeechSynthesisFailed("nothing to say".into()));
        }

        let mut audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let bytes = self
                .fetch_chunk(chunk, index, chunks.len(), language)
                .map_err(|e| Error::SpeechSynthesisFailed(e.to_string()))?;
            audio.extend_from_slice(&bytes);
        }

        let mut file = tempfile::Builder::new()
            .prefix("tutor-speech-")
            .suffix(".mp3")
            .tempfile()?;
        file.write_all(&audio)?;
        let (_, path) = file
            .keep()
            .map_err(|e| Error::SpeechSynthesisFailed(e.to_string()))?;
        log::debug!("Synthesized {} chunks to {}", chunks.len(), path.display());
        Ok(path)
    }
}

/// Split `text` into pieces of at most `max` characters, breaking between
/// words. A single word longer than `max` is cut; a zero `max` counts as one.
pub fn chunk_text(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max);
            chunks.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }

        let extra = if current.is_empty() { word.len() } else { word.len() + 1 };
        if current_len + extra > max {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
