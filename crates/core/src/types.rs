//! Domain types for utterances, conversation history and slide outlines.

use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of slides every generated deck has after normalization.
pub const SLIDE_COUNT: usize = 6;

/// A single piece of user input, typed or transcribed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// Raw text as received.
    pub text: String,

    /// Language the text is known to be in, if any.
    pub language: Option<Language>,
}

impl Utterance {
    /// Create an utterance with no language tag.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
        }
    }

    /// Create an utterance tagged with a language.
    pub fn with_language(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language: Some(language),
        }
    }
}

/// What the user wants done with an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Build a slide deck.
    PptGeneration,
    /// Answer conversationally.
    NormalQuery,
}

impl Intent {
    /// The wire label used in classifier prompts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PptGeneration => "ppt_generation",
            Self::NormalQuery => "normal_query",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One entry of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,

    /// Language the message was exchanged in. Never sent to the model.
    #[serde(skip)]
    pub language: Option<Language>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            language: None,
        }
    }

    /// Tag the message with the language it was exchanged in.
    pub fn in_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }
}

/// The five slide types a generated outline may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    TitleSlide,
    BulletPoints,
    SectionHeader,
    ContentSlide,
    ConclusionSlide,
}

impl SlideKind {
    /// The slide sequence the generator asks the model for.
    pub const CANONICAL_ORDER: [SlideKind; SLIDE_COUNT] = [
        SlideKind::TitleSlide,
        SlideKind::BulletPoints,
        SlideKind::SectionHeader,
        SlideKind::ContentSlide,
        SlideKind::BulletPoints,
        SlideKind::ConclusionSlide,
    ];

    /// Parse a `type` tag from model output.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "title_slide" => Some(Self::TitleSlide),
            "bullet_points" => Some(Self::BulletPoints),
            "section_header" => Some(Self::SectionHeader),
            "content_slide" => Some(Self::ContentSlide),
            "conclusion_slide" => Some(Self::ConclusionSlide),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TitleSlide => "title_slide",
            Self::BulletPoints => "bullet_points",
            Self::SectionHeader => "section_header",
            Self::ContentSlide => "content_slide",
            Self::ConclusionSlide => "conclusion_slide",
        }
    }
}

/// A normalized presentation outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationSpec {
    /// Presentation title.
    pub title: String,

    /// Slides in presentation order.
    pub slides: Vec<SlideSpec>,
}

impl PresentationSpec {
    /// Title plus per-slide title and type, for display next to the download.
    pub fn outline(&self) -> DeckOutline {
        DeckOutline {
            title: self.title.clone(),
            entries: self
                .slides
                .iter()
                .map(|s| (s.title.clone(), s.type_tag().to_string()))
                .collect(),
        }
    }
}

/// A single slide of an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSpec {
    pub title: String,
    pub body: SlideBody,
}

impl SlideSpec {
    pub fn new(title: impl Into<String>, body: SlideBody) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }

    /// The slide kind, or `None` for a type tag outside the known set.
    pub fn kind(&self) -> Option<SlideKind> {
        match &self.body {
            SlideBody::Title { .. } => Some(SlideKind::TitleSlide),
            SlideBody::BulletPoints { .. } => Some(SlideKind::BulletPoints),
            SlideBody::SectionHeader { .. } => Some(SlideKind::SectionHeader),
            SlideBody::Content { .. } => Some(SlideKind::ContentSlide),
            SlideBody::Conclusion { .. } => Some(SlideKind::ConclusionSlide),
            SlideBody::Unrecognized { .. } => None,
        }
    }

    /// The type tag as it appeared in the outline.
    pub fn type_tag(&self) -> &str {
        match &self.body {
            SlideBody::Unrecognized { tag, .. } => tag,
            _ => self.kind().map(|k| k.as_str()).unwrap_or_default(),
        }
    }
}

/// Type-specific slide content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlideBody {
    #[serde(rename = "title_slide")]
    Title {
        subtitle: String,
    },
    BulletPoints {
        points: Vec<String>,
    },
    SectionHeader {
        content: Option<String>,
    },
    #[serde(rename = "content_slide")]
    Content {
        paragraphs: Vec<String>,
    },
    #[serde(rename = "conclusion_slide")]
    Conclusion {
        content: String,
        key_takeaway: Option<String>,
    },
    /// A type tag the renderer has no rule for; drawn like bullet points.
    Unrecognized {
        tag: String,
        points: Vec<String>,
    },
}

/// Human-readable structure of a generated deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckOutline {
    pub title: String,

    /// `(slide title, type tag)` in slide order.
    pub entries: Vec<(String, String)>,
}

impl fmt::Display for DeckOutline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        for (idx, (title, tag)) in self.entries.iter().enumerate() {
            writeln!(f, "Slide {}: {} ({})", idx + 1, title, tag)?;
        }
        Ok(())
    }
}
