//! Whisper transcription over multipart upload.

use crate::config::GroqConfig;
use crate::http;
use hound::{SampleFormat, WavSpec, WavWriter};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use serde_json::Value;
use std::io::Cursor;
use tutor_core::{AudioClip, Language, RemoteError, SpeechToText};

/// Sends clips to `audio/transcriptions`.
#[derive(Debug, Clone)]
pub struct WhisperTranscriber {
    client: Client,
    config: GroqConfig,
}

impl WhisperTranscriber {
    pub fn new(config: GroqConfig) -> Result<Self, RemoteError> {
        Ok(Self {
            client: http::client()?,
            config,
        })
    }
}

impl SpeechToText for WhisperTranscriber {
    fn transcribe(&self, clip: &AudioClip, language: Language) -> Result<String, RemoteError> {
        let wav = encode_wav(clip)?;
        log::debug!(
            "Transcribing {:.1}s of audio as {}",
            clip.duration().as_secs_f64(),
            language
        );

        let audio = Part::bytes(wav)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(http::transport)?;
        let form = Form::new()
            .part("file", audio)
            .text("model", self.config.transcription_model.clone())
            .text("response_format", "json")
            .text("language", language.code());

        let response = self
            .client
            .post(self.config.endpoint("audio/transcriptions"))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .map_err(http::transport)?;
        let parsed: Value = http::check_status(response)?.json().map_err(http::decode)?;
        parsed["text"]
            .as_str()
            .map(|t| t.trim().to_string())
            .ok_or_else(|| RemoteError::Decode("transcription has no text".into()))
    }
}

/// 16-bit mono WAV bytes for `clip`.
pub(crate) fn encode_wav(clip: &AudioClip) -> Result<Vec<u8>, RemoteError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let wav_err = |e: hound::Error| RemoteError::Decode(format!("Failed to encode WAV: {}", e));

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut buffer, spec).map_err(wav_err)?;
        for &sample in &clip.samples {
            writer.write_sample(sample).map_err(wav_err)?;
        }
        writer.finalize().map_err(wav_err)?;
    }
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;

    #[test]
    fn test_encode_wav_header() {
        let clip = AudioClip::new(vec![0, 1000, -1000, i16::MAX], 16_000);
        let bytes = encode_wav(&clip).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");

        let reader = WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16_000);
        let samples: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(samples, clip.samples);
    }
}
