//! Turn handling: one utterance in, one reply (and maybe a deck) out.
//!
//! All conversation state lives in a caller-owned [`Session`]. A turn either
//! completes and appends the user message plus the reply, or fails and leaves
//! the session exactly as it was. A failed chat call still completes the turn:
//! its error text becomes the reply.

use crate::chat::{self, ChatCompletion};
use crate::classify::IntentClassifier;
use crate::error::{Error, Result};
use crate::generate::ContentGenerator;
use crate::language::{self, Language};
use crate::normalize::{SchemaNormalizer, SlideOrder};
use crate::speech::{Recorder, SpeechToText};
use crate::topic;
use crate::types::{ChatMessage, DeckOutline, Intent, PresentationSpec, Utterance};
use std::path::PathBuf;
use std::time::Duration;

/// Renders and stores a finished outline.
pub trait DeckSink {
    /// Write `spec` as `file_name` and return the artifact path.
    fn publish(&self, spec: &PresentationSpec, file_name: &str) -> Result<PathBuf>;
}

/// Conversation state for one user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Messages in the order they were exchanged.
    pub history: Vec<ChatMessage>,

    /// Language used for voice input and when text turns carry no tag.
    pub language: Language,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            history: Vec::new(),
            language,
        }
    }

    /// The most recent assistant reply, for download-as-text.
    pub fn last_reply(&self) -> Option<&ChatMessage> {
        self.history
            .iter()
            .rev()
            .find(|m| m.role == crate::types::Role::Assistant)
    }
}

/// Knobs for the turn pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Slide type ordering policy for generated outlines.
    pub slide_order: SlideOrder,

    /// Ask the model for the language of untagged text turns. On by default.
    pub detect_language: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            slide_order: SlideOrder::default(),
            detect_language: true,
        }
    }
}

/// A deck produced by a turn.
#[derive(Debug, Clone)]
pub struct DeckArtifact {
    pub path: PathBuf,
    pub topic: String,
    pub outline: DeckOutline,
}

/// Result of a completed turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// What the user said (transcribed, for voice turns).
    pub utterance: String,
    pub intent: Intent,
    pub reply: String,
    /// The reply is an error message from a failed chat call.
    pub is_error: bool,
    /// Language the reply should be spoken in.
    pub language: Language,
    pub deck: Option<DeckArtifact>,
}

/// Runs turns against a chat capability and a deck sink.
pub struct Assistant<C, D> {
    chat: C,
    deck: D,
    classifier: IntentClassifier,
    generator: ContentGenerator,
    options: PipelineOptions,
}

impl<C: ChatCompletion, D: DeckSink> Assistant<C, D> {
    pub fn new(chat: C, deck: D, options: PipelineOptions) -> Self {
        let normalizer = SchemaNormalizer::new().with_slide_order(options.slide_order);
        Self {
            chat,
            deck,
            classifier: IntentClassifier::new(),
            generator: ContentGenerator::new(normalizer),
            options,
        }
    }

    /// Handle one typed (or already transcribed) utterance.
    pub fn handle_text_turn(&self, session: &mut Session, utterance: Utterance) -> Result<TurnOutcome> {
        let language = match utterance.language {
            Some(lang) => lang,
            None if self.options.detect_language => {
                language::detect_language(&self.chat, &utterance.text)
            }
            None => session.language,
        };

        let checkpoint = session.history.len();
        session
            .history
            .push(ChatMessage::user(utterance.text.as_str()).in_language(language));

        match self.run_turn(session, &utterance.text, language) {
            Ok(outcome) => {
                session
                    .history
                    .push(ChatMessage::assistant(outcome.reply.as_str()).in_language(language));
                Ok(outcome)
            }
            Err(e) => {
                session.history.truncate(checkpoint);
                Err(e)
            }
        }
    }

    /// Capture speech, transcribe it in the session language and handle it
    /// as a text turn.
    pub fn handle_voice_turn(
        &self,
        session: &mut Session,
        recorder: &dyn Recorder,
        recognizer: &dyn SpeechToText,
        window: Duration,
    ) -> Result<TurnOutcome> {
        let language = session.language;
        let clip = recorder.record(window).map_err(|e| match e {
            Error::SpeechCaptureFailed(_) => e,
            other => Error::SpeechCaptureFailed(other.to_string()),
        })?;
        if clip.is_empty() {
            return Err(Error::SpeechCaptureFailed("no audio captured".into()));
        }

        let text = recognizer
            .transcribe(&clip, language)
            .map_err(|e| Error::SpeechCaptureFailed(e.to_string()))?;
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::SpeechCaptureFailed("no speech recognized".into()));
        }

        log::debug!("Heard ({}): {}", language, text);
        self.handle_text_turn(session, Utterance::with_language(text, language))
    }

    /// Classify and dispatch. The user message is already in `session`.
    fn run_turn(&self, session: &Session, text: &str, language: Language) -> Result<TurnOutcome> {
        let hint = (language != Language::English).then_some(language);
        let intent = self.classifier.classify(&self.chat, text, hint);

        let (reply, is_error, deck) = match intent {
            Intent::PptGeneration => {
                let artifact = self.build_deck(text)?;
                let reply = format!(
                    "Your 6-slide presentation on '{}' is ready for download!",
                    artifact.topic
                );
                (reply, false, Some(artifact))
            }
            Intent::NormalQuery => match chat::reply(&self.chat, &session.history, text) {
                Ok(reply) => (reply, false, None),
                Err(e) => {
                    log::warn!("Chat call failed: {}", e);
                    (Error::ChatCallFailed(e).to_string(), true, None)
                }
            },
        };

        Ok(TurnOutcome {
            utterance: text.to_string(),
            intent,
            reply,
            is_error,
            language,
            deck,
        })
    }

    /// Topic extraction, outline generation and publishing. Nothing is
    /// written unless generation succeeded.
    fn build_deck(&self, text: &str) -> Result<DeckArtifact> {
        let topic = topic::display_topic(&topic::extract_topic(text));
        let spec = self.generator.generate(&self.chat, &topic)?;
        let path = self.deck.publish(&spec, &topic::deck_file_name(&topic))?;
        log::info!("Wrote deck for {:?} to {}", topic, path.display());

        Ok(DeckArtifact {
            path,
            topic,
            outline: spec.outline(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GenerationError, RemoteError};
    use crate::speech::AudioClip;
    use crate::types::{Role, SlideKind, SLIDE_COUNT};
    use std::cell::{Cell, RefCell};

    const CANONICAL_REPLY: &str = r#"{"title": "Photosynthesis", "slides": [
        {"title": "Photosynthesis", "type": "title_slide", "subtitle": "How plants make food"},
        {"title": "Introduction", "type": "bullet_points", "points": ["a", "b", "c", "d"]},
        {"title": "Chlorophyll", "type": "section_header", "content": "The green engine"},
        {"title": "Process", "type": "content_slide", "paragraphs": ["p1", "p2"]},
        {"title": "Facts", "type": "bullet_points", "points": ["a", "b", "c", "d"]},
        {"title": "Conclusion", "type": "conclusion_slide", "content": "Done", "key_takeaway": "Light is life"}
    ]}"#;

    /// Records every published outline instead of writing files.
    #[derive(Default)]
    struct MemorySink {
        published: RefCell<Vec<(String, PresentationSpec)>>,
    }

    impl DeckSink for &MemorySink {
        fn publish(&self, spec: &PresentationSpec, file_name: &str) -> Result<PathBuf> {
            self.published
                .borrow_mut()
                .push((file_name.to_string(), spec.clone()));
            Ok(PathBuf::from("/decks").join(file_name))
        }
    }

    struct FixedRecorder(AudioClip);

    impl Recorder for FixedRecorder {
        fn record(&self, _window: Duration) -> Result<AudioClip> {
            Ok(self.0.clone())
        }
    }

    struct BrokenMicrophone;

    impl Recorder for BrokenMicrophone {
        fn record(&self, _window: Duration) -> Result<AudioClip> {
            Err(Error::SpeechCaptureFailed("timed out waiting for phrase".into()))
        }
    }

    struct FixedTranscript(&'static str);

    impl SpeechToText for FixedTranscript {
        fn transcribe(&self, _clip: &AudioClip, _language: Language) -> std::result::Result<String, RemoteError> {
            Ok(self.0.to_string())
        }
    }

    fn clip() -> AudioClip {
        AudioClip::new(vec![100; 1600], 16_000)
    }

    fn without_detection() -> PipelineOptions {
        PipelineOptions {
            detect_language: false,
            ..PipelineOptions::default()
        }
    }

    #[test]
    fn test_end_to_end_deck_turn() {
        let calls = RefCell::new(Vec::new());
        let chat = |messages: &[ChatMessage]| -> std::result::Result<String, RemoteError> {
            calls.borrow_mut().push(messages[messages.len() - 1].content.clone());
            Ok(CANONICAL_REPLY.to_string())
        };
        let sink = MemorySink::default();
        let assistant = Assistant::new(chat, &sink, without_detection());
        let mut session = Session::default();

        let outcome = assistant
            .handle_text_turn(&mut session, Utterance::new("create a ppt about photosynthesis"))
            .unwrap();

        // Keyword fast-path: the only remote call is the generator's.
        assert_eq!(*calls.borrow(), vec!["Photosynthesis".to_string()]);
        assert_eq!(outcome.intent, Intent::PptGeneration);

        let deck = outcome.deck.unwrap();
        assert_eq!(deck.topic, "Photosynthesis");
        assert_eq!(deck.path, PathBuf::from("/decks/Photosynthesis_presentation.pptx"));
        assert_eq!(deck.outline.entries.len(), SLIDE_COUNT);

        let published = sink.published.borrow();
        assert_eq!(published.len(), 1);
        let spec = &published[0].1;
        assert_eq!(spec.slides.len(), SLIDE_COUNT);
        assert_eq!(spec.slides[0].kind(), Some(SlideKind::TitleSlide));
        assert_eq!(spec.slides[5].kind(), Some(SlideKind::ConclusionSlide));

        assert_eq!(session.history.len(), 2);
        assert_eq!(
            session.history[1].content,
            "Your 6-slide presentation on 'Photosynthesis' is ready for download!"
        );
    }

    #[test]
    fn test_generation_failure_leaves_history_untouched() {
        let chat = |_: &[ChatMessage]| -> std::result::Result<String, RemoteError> {
            Err(RemoteError::Transport("network unreachable".into()))
        };
        let sink = MemorySink::default();
        let assistant = Assistant::new(chat, &sink, PipelineOptions::default());
        let mut session = Session::default();
        session.history.push(ChatMessage::user("hi"));
        session.history.push(ChatMessage::assistant("hello"));

        let err = assistant
            .handle_text_turn(&mut session, Utterance::new("make slides on gravity"))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::GenerationFailed(GenerationError::RemoteCall(_))
        ));
        assert!(err.to_string().starts_with("Error generating presentation:"));
        assert!(sink.published.borrow().is_empty());
        assert_eq!(session.history.len(), 2);
    }

    #[test]
    fn test_no_json_surfaces_generation_error() {
        let chat = |_: &[ChatMessage]| -> std::result::Result<String, RemoteError> {
            Ok("Sorry, I cannot produce slides.".into())
        };
        let sink = MemorySink::default();
        let assistant = Assistant::new(chat, &sink, PipelineOptions::default());
        let mut session = Session::default();

        let err = assistant
            .handle_text_turn(&mut session, Utterance::new("presentation on rust"))
            .unwrap_err();
        assert!(matches!(err, Error::GenerationFailed(GenerationError::NoJsonFound)));
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_normal_query_uses_history() {
        let calls = Cell::new(0);
        let chat = |messages: &[ChatMessage]| -> std::result::Result<String, RemoteError> {
            calls.set(calls.get() + 1);
            if messages[0].role == Role::System {
                return Ok("normal_query".into());
            }
            assert_eq!(messages.len(), 3);
            assert_eq!(messages[2].content, "And its capital?");
            Ok("Its capital is Paris.".into())
        };
        let sink = MemorySink::default();
        let assistant = Assistant::new(chat, &sink, without_detection());
        let mut session = Session::default();
        session.history.push(ChatMessage::user("Tell me about France"));
        session.history.push(ChatMessage::assistant("France is in Europe."));

        let outcome = assistant
            .handle_text_turn(&mut session, Utterance::new("And its capital?"))
            .unwrap();

        assert_eq!(outcome.intent, Intent::NormalQuery);
        assert_eq!(outcome.reply, "Its capital is Paris.");
        assert!(outcome.deck.is_none());
        assert!(!outcome.is_error);
        assert_eq!(calls.get(), 2);
        assert_eq!(session.history.len(), 4);
        assert_eq!(session.last_reply().unwrap().content, "Its capital is Paris.");
    }

    #[test]
    fn test_chat_failure_becomes_error_reply() {
        let chat = |messages: &[ChatMessage]| -> std::result::Result<String, RemoteError> {
            if messages[0].role == Role::System {
                return Ok("normal_query".into());
            }
            Err(RemoteError::Status {
                status: 503,
                body: "overloaded".into(),
            })
        };
        let sink = MemorySink::default();
        let assistant = Assistant::new(chat, &sink, without_detection());
        let mut session = Session::default();

        let outcome = assistant
            .handle_text_turn(&mut session, Utterance::new("Why is the sky blue?"))
            .unwrap();
        assert!(outcome.is_error);
        assert_eq!(outcome.intent, Intent::NormalQuery);
        assert!(outcome.reply.starts_with("Error generating response:"));
        assert!(outcome.reply.contains("overloaded"));

        assert_eq!(session.history.len(), 2);
        assert_eq!(session.history[0].role, Role::User);
        assert_eq!(session.history[0].content, "Why is the sky blue?");
        assert_eq!(session.history[1].role, Role::Assistant);
        assert_eq!(session.history[1].content, outcome.reply);
    }

    #[test]
    fn test_detection_is_on_by_default() {
        let asked = Cell::new(false);
        let chat = |messages: &[ChatMessage]| -> std::result::Result<String, RemoteError> {
            if messages[0].content.contains("language detection") {
                asked.set(true);
                return Ok("Bengali".into());
            }
            if messages[0].role == Role::System {
                return Ok("normal_query".into());
            }
            Ok("ঠিক আছে".into())
        };
        let sink = MemorySink::default();
        let assistant = Assistant::new(chat, &sink, PipelineOptions::default());
        let mut session = Session::default();

        let outcome = assistant
            .handle_text_turn(&mut session, Utterance::new("কেমন আছো"))
            .unwrap();
        assert!(asked.get());
        assert_eq!(outcome.language, Language::Bengali);

        let tagged = assistant
            .handle_text_turn(&mut session, Utterance::with_language("hello", Language::English))
            .unwrap();
        assert_eq!(tagged.language, Language::English);
    }

    #[test]
    fn test_language_detection_tags_history() {
        let chat = |messages: &[ChatMessage]| -> std::result::Result<String, RemoteError> {
            let system = &messages[0].content;
            if messages[0].role == Role::System && system.contains("language detection") {
                Ok("Hindi".into())
            } else if messages[0].role == Role::System {
                Ok("normal_query".into())
            } else {
                Ok("नमस्ते!".into())
            }
        };
        let sink = MemorySink::default();
        let assistant = Assistant::new(chat, &sink, PipelineOptions::default());
        let mut session = Session::default();

        let outcome = assistant
            .handle_text_turn(&mut session, Utterance::new("आप कैसे हैं"))
            .unwrap();
        assert_eq!(outcome.language, Language::Hindi);
        assert_eq!(session.history[0].language, Some(Language::Hindi));
        assert_eq!(session.history[1].language, Some(Language::Hindi));
    }

    #[test]
    fn test_voice_turn_uses_session_language() {
        let chat = |messages: &[ChatMessage]| -> std::result::Result<String, RemoteError> {
            if messages[0].role == Role::System {
                return Ok("normal_query".into());
            }
            Ok("ok".into())
        };
        let sink = MemorySink::default();
        let assistant = Assistant::new(chat, &sink, PipelineOptions::default());
        let mut session = Session::new(Language::Tamil);

        let outcome = assistant
            .handle_voice_turn(
                &mut session,
                &FixedRecorder(clip()),
                &FixedTranscript(" வணக்கம் "),
                crate::speech::LISTEN_WINDOW,
            )
            .unwrap();
        assert_eq!(outcome.utterance, "வணக்கம்");
        assert_eq!(outcome.language, Language::Tamil);
        assert_eq!(session.history.len(), 2);
    }

    #[test]
    fn test_voice_capture_failure_keeps_session() {
        let chat = |_: &[ChatMessage]| -> std::result::Result<String, RemoteError> {
            panic!("nothing should reach the model")
        };
        let sink = MemorySink::default();
        let assistant = Assistant::new(chat, &sink, PipelineOptions::default());
        let mut session = Session::default();

        let err = assistant
            .handle_voice_turn(
                &mut session,
                &BrokenMicrophone,
                &FixedTranscript("unused"),
                crate::speech::LISTEN_WINDOW,
            )
            .unwrap_err();
        assert!(matches!(err, Error::SpeechCaptureFailed(_)));

        let err = assistant
            .handle_voice_turn(
                &mut session,
                &FixedRecorder(clip()),
                &FixedTranscript("   "),
                crate::speech::LISTEN_WINDOW,
            )
            .unwrap_err();
        assert!(matches!(err, Error::SpeechCaptureFailed(_)));
        assert!(session.history.is_empty());
    }
}
