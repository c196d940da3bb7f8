//! Audio capture for voice turns.
//!
//! [`WavFileRecorder`] replays a recording from disk. With the `microphone`
//! feature, [`MicRecorder`] captures from the default input device via CPAL.

use hound::{SampleFormat, WavReader};
use std::path::PathBuf;
use std::time::Duration;
use tutor_core::{AudioClip, Error, Recorder, Result};

/// Reads an utterance from a WAV file, keeping the first channel.
#[derive(Debug, Clone)]
pub struct WavFileRecorder {
    path: PathBuf,
}

impl WavFileRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Recorder for WavFileRecorder {
    fn record(&self, window: Duration) -> Result<AudioClip> {
        let capture_err =
            |e: hound::Error| Error::SpeechCaptureFailed(format!("{}: {}", self.path.display(), e));

        let reader = WavReader::open(&self.path).map_err(capture_err)?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<i16> = match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Int, 16) => reader
                .into_samples::<i16>()
                .collect::<std::result::Result<_, _>>()
                .map_err(capture_err)?,
            (SampleFormat::Int, bits) => reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| rescale(v, bits)))
                .collect::<std::result::Result<_, _>>()
                .map_err(capture_err)?,
            (SampleFormat::Float, _) => reader
                .into_samples::<f32>()
                .map(|s| s.map(to_pcm16))
                .collect::<std::result::Result<_, _>>()
                .map_err(capture_err)?,
        };

        let samples = interleaved.into_iter().step_by(channels).collect();
        let mut clip = AudioClip::new(samples, spec.sample_rate);
        clip.truncate_to(window);
        log::debug!(
            "Read {:.1}s from {}",
            clip.duration().as_secs_f64(),
            self.path.display()
        );
        Ok(clip)
    }
}

/// Scale an integer sample of `bits` width to 16 bits.
fn rescale(sample: i32, bits: u16) -> i16 {
    if bits > 16 {
        (sample >> (bits - 16)) as i16
    } else {
        (sample << (16 - bits)) as i16
    }
}

fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

#[cfg(feature = "microphone")]
pub use mic::MicRecorder;

#[cfg(feature = "microphone")]
mod mic {
    use super::to_pcm16;
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use cpal::{StreamConfig, StreamError};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tutor_core::{AudioClip, Error, Recorder, Result};

    /// Sample rate for live capture (16kHz), which Whisper prefers.
    const SAMPLE_RATE: u32 = 16_000;

    /// Records mono 16kHz audio from the default input device.
    #[derive(Debug, Clone, Default)]
    pub struct MicRecorder;

    impl MicRecorder {
        pub fn new() -> Self {
            Self
        }
    }

    impl Recorder for MicRecorder {
        fn record(&self, window: Duration) -> Result<AudioClip> {
            let device = cpal::default_host()
                .default_input_device()
                .ok_or_else(|| Error::SpeechCaptureFailed("No input device".into()))?;
            let config = StreamConfig {
                channels: 1,
                sample_rate: cpal::SampleRate(SAMPLE_RATE),
                buffer_size: cpal::BufferSize::Default,
            };

            let samples = Arc::new(Mutex::new(Vec::new()));
            let shared = Arc::clone(&samples);
            let stream = device
                .build_input_stream(
                    &config,
                    move |data: &[f32], _: &_| {
                        if let Ok(mut buffer) = shared.lock() {
                            buffer.extend(data.iter().copied().map(to_pcm16));
                        }
                    },
                    log_stream_error,
                    None,
                )
                .map_err(|e| Error::SpeechCaptureFailed(e.to_string()))?;

            stream
                .play()
                .map_err(|e| Error::SpeechCaptureFailed(e.to_string()))?;
            std::thread::sleep(window);
            drop(stream);

            let captured = samples
                .lock()
                .map(|buffer| buffer.clone())
                .map_err(|_| Error::SpeechCaptureFailed("capture buffer poisoned".into()))?;
            let mut clip = AudioClip::new(captured, SAMPLE_RATE);
            clip.truncate_to(window);
            Ok(clip)
        }
    }

    fn log_stream_error(err: StreamError) {
        log::warn!("Audio stream error: {}", err);
    }
}
