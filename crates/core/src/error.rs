//! Error types for the assistant pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a call to a hosted model or speech service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// No API key was configured.
    #[error("missing credentials: {0}")]
    Credentials(String),
}

/// Ways a slide-outline generation can fail. Each one is terminal for the turn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The chat completion call itself failed.
    #[error("{0}")]
    RemoteCall(#[from] RemoteError),

    /// The model answered without any `{` in its text.
    #[error("No valid JSON found.")]
    NoJsonFound,

    /// A brace-delimited span was found but is not a usable outline.
    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    /// Strict ordering was requested and the model broke the slide sequence.
    #[error("slide {position} is '{found}', expected '{expected}'")]
    SlideOrderMismatch {
        position: usize,
        expected: &'static str,
        found: String,
    },
}

/// Errors that terminate a single user turn.
#[derive(Error, Debug)]
pub enum Error {
    /// Slide-outline generation failed.
    #[error("Error generating presentation: {0}")]
    GenerationFailed(#[from] GenerationError),

    /// Plain chat completion failed.
    #[error("Error generating response: {0}")]
    ChatCallFailed(RemoteError),

    /// Microphone capture, timeout, or recognition failed.
    #[error("Speech recognition failed: {0}")]
    SpeechCaptureFailed(String),

    /// Text-to-speech synthesis failed.
    #[error("Audio error: {0}")]
    SpeechSynthesisFailed(String),

    /// Failed to write an artifact.
    #[error("Failed to write file: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),
}
