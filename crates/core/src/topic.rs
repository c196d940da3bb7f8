//! Topic extraction from deck requests.

use regex::Regex;
use std::sync::LazyLock;

/// Matches "create a ppt about X", "make slides on X", "prepare presentation covering X"...
static DECK_REQUEST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:generate|create|make|prepare)(?:\s+a)?\s+(?:ppt|powerpoint|presentation|slides)(?:\s+(?:on|about|for|covering))?\s+(.*)",
    )
    .unwrap()
});

/// Topic used when a request names none at all.
const FALLBACK_TOPIC: &str = "Presentation";

/// Pull the topic out of a deck request.
///
/// Matching runs on the lower-cased text, so a matched topic is lower case.
/// When the request does not follow the pattern, the whole trimmed text is
/// the topic.
pub fn extract_topic(text: &str) -> String {
    let lowered = text.to_lowercase();
    let matched = DECK_REQUEST_REGEX
        .captures(&lowered)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty());

    match matched {
        Some(topic) => topic,
        None => text.trim().to_string(),
    }
}

/// Topic as shown to the user and sent to the generator: first letter
/// upper-cased when it is alphabetic.
pub fn display_topic(topic: &str) -> String {
    let trimmed = topic.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => first.to_uppercase().chain(chars).collect(),
        Some(_) => trimmed.to_string(),
        None => FALLBACK_TOPIC.to_string(),
    }
}

/// File name of the rendered deck for a display topic.
pub fn deck_file_name(display_topic: &str) -> String {
    let stem: String = display_topic
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();
    format!("{}_presentation.pptx", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_topic_with_connective() {
        assert_eq!(extract_topic("create a ppt about photosynthesis"), "photosynthesis");
        assert_eq!(extract_topic("Make slides on The Water Cycle"), "the water cycle");
        assert_eq!(
            extract_topic("please generate a presentation covering plate tectonics"),
            "plate tectonics"
        );
        assert_eq!(extract_topic("prepare powerpoint for grade 5 fractions"), "grade 5 fractions");
    }

    #[test]
    fn test_extract_topic_without_connective() {
        assert_eq!(extract_topic("create a presentation volcanoes"), "volcanoes");
    }

    #[test]
    fn test_extract_topic_falls_back_to_input() {
        assert_eq!(extract_topic("  A deck about Mughal architecture "), "A deck about Mughal architecture");
        assert_eq!(extract_topic("create a ppt "), "create a ppt");
    }

    #[test]
    fn test_display_topic() {
        assert_eq!(display_topic("photosynthesis"), "Photosynthesis");
        assert_eq!(display_topic("1857 revolt"), "1857 revolt");
        assert_eq!(display_topic("  "), "Presentation");
        assert_eq!(display_topic("ñandú"), "Ñandú");
    }

    #[test]
    fn test_deck_file_name() {
        assert_eq!(
            deck_file_name("The water cycle"),
            "The_water_cycle_presentation.pptx"
        );
        assert_eq!(deck_file_name("AC/DC"), "AC_DC_presentation.pptx");
    }
}
