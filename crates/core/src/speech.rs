//! Speech capabilities: capture, recognition and synthesis.

use crate::error::{RemoteError, Result};
use crate::language::Language;
use std::path::PathBuf;
use std::time::Duration;

/// How long a voice turn listens before giving up.
pub const LISTEN_WINDOW: Duration = Duration::from_secs(5);

/// Mono 16-bit PCM audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl AudioClip {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop everything past `window`.
    pub fn truncate_to(&mut self, window: Duration) {
        let max = (window.as_secs_f64() * self.sample_rate as f64) as usize;
        self.samples.truncate(max);
    }
}

/// Something that can capture an utterance.
pub trait Recorder {
    /// Capture at most `window` of audio.
    ///
    /// Failures should be reported as [`crate::Error::SpeechCaptureFailed`].
    fn record(&self, window: Duration) -> Result<AudioClip>;
}

/// A speech recognition service.
pub trait SpeechToText {
    fn transcribe(&self, clip: &AudioClip, language: Language) -> std::result::Result<String, RemoteError>;
}

/// A speech synthesis service.
pub trait TextToSpeech {
    /// Synthesize `text` and return the path of the audio file.
    fn synthesize(&self, text: &str, language: Language) -> Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_window() {
        let mut clip = AudioClip::new(vec![1; 16_000 * 8], 16_000);
        assert_eq!(clip.duration(), Duration::from_secs(8));
        clip.truncate_to(LISTEN_WINDOW);
        assert_eq!(clip.samples.len(), 16_000 * 5);
    }

    #[test]
    fn test_short_clip_untouched() {
        let mut clip = AudioClip::new(vec![0; 800], 16_000);
        clip.truncate_to(LISTEN_WINDOW);
        assert_eq!(clip.samples.len(), 800);
        assert!(!clip.is_empty());
    }
}
