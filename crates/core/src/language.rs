//! Supported conversation languages and remote language detection.

use crate::chat::ChatCompletion;
use serde::{Deserialize, Serialize};
use std::fmt;

const DETECTION_PROMPT: &str = "\
You are a language detection expert. Given an input text, determine which language it is written in.
Focus specifically on Indian languages including Hindi, Bengali, Tamil, Telugu, Marathi, Gujarati,
Kannada, Malayalam, Punjabi, and Urdu, as well as English.

Return ONLY the language name as a single word, for example:
- \"English\"
- \"Hindi\"
- \"Bengali\"
- \"Tamil\"
- \"Telugu\"
- \"Marathi\"
- \"Gujarati\"
- \"Kannada\"
- \"Malayalam\"
- \"Punjabi\"
- \"Urdu\"

If you're not sure, default to \"English\".";

/// A language the assistant can listen, answer and speak in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Bengali,
    Tamil,
    Telugu,
    Marathi,
    Gujarati,
    Kannada,
    Malayalam,
    Punjabi,
    Urdu,
}

impl Language {
    pub const ALL: [Language; 11] = [
        Language::English,
        Language::Hindi,
        Language::Bengali,
        Language::Tamil,
        Language::Telugu,
        Language::Marathi,
        Language::Gujarati,
        Language::Kannada,
        Language::Malayalam,
        Language::Punjabi,
        Language::Urdu,
    ];

    /// English name, as used in prompts and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Bengali => "Bengali",
            Self::Tamil => "Tamil",
            Self::Telugu => "Telugu",
            Self::Marathi => "Marathi",
            Self::Gujarati => "Gujarati",
            Self::Kannada => "Kannada",
            Self::Malayalam => "Malayalam",
            Self::Punjabi => "Punjabi",
            Self::Urdu => "Urdu",
        }
    }

    /// BCP-47 locale for speech recognition.
    pub fn speech_locale(&self) -> &'static str {
        match self {
            Self::English => "en-IN",
            Self::Hindi => "hi-IN",
            Self::Bengali => "bn-IN",
            Self::Tamil => "ta-IN",
            Self::Telugu => "te-IN",
            Self::Marathi => "mr-IN",
            Self::Gujarati => "gu-IN",
            Self::Kannada => "kn-IN",
            Self::Malayalam => "ml-IN",
            Self::Punjabi => "pa-IN",
            Self::Urdu => "ur-IN",
        }
    }

    /// ISO 639-1 code, used by the TTS and transcription services.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Bengali => "bn",
            Self::Tamil => "ta",
            Self::Telugu => "te",
            Self::Marathi => "mr",
            Self::Gujarati => "gu",
            Self::Kannada => "kn",
            Self::Malayalam => "ml",
            Self::Punjabi => "pa",
            Self::Urdu => "ur",
        }
    }

    /// Name in the language's own script.
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "हिंदी",
            Self::Bengali => "বাংলা",
            Self::Tamil => "தமிழ்",
            Self::Telugu => "తెలుగు",
            Self::Marathi => "मराठी",
            Self::Gujarati => "ગુજરાતી",
            Self::Kannada => "ಕನ್ನಡ",
            Self::Malayalam => "മലയാളം",
            Self::Punjabi => "ਪੰਜਾਬੀ",
            Self::Urdu => "اردو",
        }
    }

    /// Case-insensitive lookup by English name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ask the model which supported language `text` is written in.
///
/// Any failure or unrecognized answer yields English.
pub fn detect_language<C: ChatCompletion + ?Sized>(chat: &C, text: &str) -> Language {
    match chat.prompt(DETECTION_PROMPT, text) {
        Ok(answer) => parse_language_answer(&answer).unwrap_or_else(|| {
            log::debug!("Language detector answered {:?}; using English", answer);
            Language::English
        }),
        Err(e) => {
            log::warn!("Language detection failed, using English: {}", e);
            Language::English
        }
    }
}

/// Take the first word of a detector answer and match it against the table.
fn parse_language_answer(answer: &str) -> Option<Language> {
    let first = answer.split_whitespace().next()?;
    let cleaned = first.trim_matches(|c| matches!(c, '.' | ',' | ':' | '"' | '\''));
    Language::from_name(cleaned)
}
