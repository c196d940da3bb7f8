//! Core domain types, intent classification, slide-outline generation
//! and turn handling for the classroom assistant.

pub mod chat;
pub mod classify;
pub mod error;
pub mod generate;
pub mod json;
pub mod language;
pub mod normalize;
pub mod session;
pub mod speech;
pub mod topic;
pub mod types;

pub use chat::ChatCompletion;
pub use classify::{Classification, ClassificationSource, IntentClassifier};
pub use error::{Error, GenerationError, RemoteError, Result};
pub use generate::ContentGenerator;
pub use json::extract_json;
pub use language::Language;
pub use normalize::{SchemaNormalizer, SlideOrder};
pub use session::{Assistant, DeckArtifact, DeckSink, PipelineOptions, Session, TurnOutcome};
pub use speech::{AudioClip, Recorder, SpeechToText, TextToSpeech};
pub use types::{
    ChatMessage, DeckOutline, Intent, PresentationSpec, Role, SlideBody, SlideKind, SlideSpec,
    Utterance, SLIDE_COUNT,
};
