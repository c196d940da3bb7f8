//! Intent classification: keyword fast-path with a remote-model fallback.

use crate::chat::ChatCompletion;
use crate::language::Language;
use crate::types::Intent;
use unicode_normalization::UnicodeNormalization;

/// Trigger substrings that mark a deck request without asking the model.
pub const DECK_KEYWORDS: &[&str] = &[
    "ppt",
    "powerpoint",
    "presentation",
    "slide",
    "slides",
    "deck",
    "create a presentation",
    "make a presentation",
    "generate a presentation",
    "create a ppt",
    "make a ppt",
    "generate a ppt",
    "create slides",
    "make slides",
    "generate slides",
    // Hindi
    "प्रेजेंटेशन",
    "पावरपॉइंट",
    "पीपीटी",
    "स्लाइड",
    // Bengali
    "পাওয়ার পয়েন্ট",
    "প্রেজেন্টেশন",
    "স্লাইড",
    // Tamil
    "விளக்கக்காட்சி",
    "பவர்பாயிண்ட்",
    "ஸ்லைடு",
    // Telugu
    "ప్రజెంటేషన్",
    "పవర్ పాయింట్",
    "స్లైడ్",
    // Marathi
    "सादरीकरण",
    "पॉवरपॉइंट",
    "स्लाइड्स",
    // Gujarati
    "પ્રેઝન્ટેશન",
    "પાવરપોઈન્ટ",
    "સ્લાઇડ",
    // Kannada
    "ಪ್ರಸ್ತುತಿ",
    "ಪ್ರೆಸೆಂಟೇಶನ್",
    "ಸ್ಲೈಡ್",
    // Malayalam
    "അവതരണം",
    "പ്രസന്റേഷൻ",
    "സ്ലൈഡ്",
    // Punjabi
    "ਪ੍ਰੈਜ਼ੈਂਟੇਸ਼ਨ",
    "ਪੇਸ਼ਕਾਰੀ",
    "ਸਲਾਈਡ",
    // Urdu
    "پریزنٹیشن",
    "پاورپوائنٹ",
    "سلائیڈ",
];

const CLASSIFIER_PROMPT: &str = "\
You are an intent classifier. Determine if the user query is related to PowerPoint (PPT)
presentation generation or if it's a normal query. The query might be in any Indian language.

Return ONLY one of these exact strings:
- \"ppt_generation\" - if the query is about creating, generating, or making a PowerPoint presentation
- \"normal_query\" - for all other queries

Be strict about classifying as \"ppt_generation\" - only classify it as such if the user is clearly
asking for a PowerPoint presentation to be created.";

/// How a classification was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationSource {
    /// A trigger keyword matched; no remote call was made.
    Keyword(String),
    /// The model answered.
    Remote,
    /// The remote call failed and the conservative default was used.
    Degraded,
}

/// Intent plus how it was decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    pub source: ClassificationSource,
}

/// Decides whether an utterance asks for a slide deck.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    /// Keywords, NFC-normalized and lower-cased once up front.
    keywords: Vec<String>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::with_keywords(DECK_KEYWORDS.iter().copied())
    }
}

impl IntentClassifier {
    /// Create a classifier with the built-in multilingual keyword set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with a custom keyword set.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| fold(k.as_ref()))
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Return the first keyword contained in `text`, if any.
    pub fn keyword_match(&self, text: &str) -> Option<&str> {
        let folded = fold(text);
        self.keywords
            .iter()
            .find(|k| folded.contains(k.as_str()))
            .map(String::as_str)
    }

    /// Classify `text`, returning only the intent.
    pub fn classify<C: ChatCompletion + ?Sized>(
        &self,
        chat: &C,
        text: &str,
        language_hint: Option<Language>,
    ) -> Intent {
        self.classify_detailed(chat, text, language_hint).intent
    }

    /// Classify `text`, reporting whether the keyword path, the model, or the
    /// degraded default decided.
    ///
    /// Never fails: a remote error yields [`Intent::NormalQuery`].
    pub fn classify_detailed<C: ChatCompletion + ?Sized>(
        &self,
        chat: &C,
        text: &str,
        language_hint: Option<Language>,
    ) -> Classification {
        if let Some(keyword) = self.keyword_match(text) {
            log::debug!("Keyword {:?} matched; deck request", keyword);
            return Classification {
                intent: Intent::PptGeneration,
                source: ClassificationSource::Keyword(keyword.to_string()),
            };
        }

        let system = match language_hint {
            Some(lang) if lang != Language::English => {
                format!("{}\nThe query is written in {}.", CLASSIFIER_PROMPT, lang.name())
            }
            _ => CLASSIFIER_PROMPT.to_string(),
        };

        match chat.prompt(&system, text) {
            Ok(answer) => {
                let intent = if answer.to_lowercase().contains(Intent::PptGeneration.as_str()) {
                    Intent::PptGeneration
                } else {
                    Intent::NormalQuery
                };
                log::debug!("Model classified utterance as {}", intent);
                Classification {
                    intent,
                    source: ClassificationSource::Remote,
                }
            }
            Err(e) => {
                log::warn!("Intent classification degraded to normal_query: {}", e);
                Classification {
                    intent: Intent::NormalQuery,
                    source: ClassificationSource::Degraded,
                }
            }
        }
    }
}

/// Canonical form used for keyword matching.
fn fold(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}
