//! Schema normalization for model-generated slide outlines.
//!
//! The parsed model output is an untrusted `serde_json::Value`. This module is
//! the only place that turns it into a typed [`PresentationSpec`]: slide
//! fields are defaulted, the slide count is forced to [`SLIDE_COUNT`], and the
//! type sequence is optionally checked.

use crate::error::GenerationError;
use crate::types::{PresentationSpec, SlideBody, SlideKind, SlideSpec, SLIDE_COUNT};
use serde_json::{Map, Value};

/// Title used when the outline has none.
const FALLBACK_DECK_TITLE: &str = "Untitled Presentation";

/// Title of the slides appended to short outlines.
const FILLER_TITLE: &str = "Additional Information";

/// Points of the slides appended to short outlines.
const FILLER_POINTS: [&str; 4] = [
    "Key point about the topic",
    "Supporting information",
    "Additional detail",
    "Final point",
];

/// How strictly the slide type sequence is held to the canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideOrder {
    /// Only the slide count is corrected; types stay as the model sent them.
    #[default]
    Lenient,
    /// After count correction, every slide must match
    /// [`SlideKind::CANONICAL_ORDER`] at its position.
    Strict,
}

/// Converts parsed model output into a six-slide [`PresentationSpec`].
#[derive(Debug, Clone, Default)]
pub struct SchemaNormalizer {
    order: SlideOrder,
}

impl SchemaNormalizer {
    /// Create a normalizer that corrects count only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slide ordering policy.
    pub fn with_slide_order(mut self, order: SlideOrder) -> Self {
        self.order = order;
        self
    }

    /// Normalize a parsed outline.
    ///
    /// - Fewer than six slides: filler bullet slides are appended.
    /// - More than six: later slides are dropped.
    /// - Slide order is never changed.
    ///
    /// Fails with [`GenerationError::MalformedJson`] when the document is not
    /// an object with a `slides` array.
    pub fn normalize(&self, raw: &Value) -> Result<PresentationSpec, GenerationError> {
        let doc = raw.as_object().ok_or_else(|| {
            GenerationError::MalformedJson("expected a JSON object at the top level".into())
        })?;

        let raw_slides = doc
            .get("slides")
            .and_then(Value::as_array)
            .ok_or_else(|| GenerationError::MalformedJson("missing 'slides' array".into()))?;

        let title = text_field(doc, "title")
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_DECK_TITLE.to_string());

        let mut slides: Vec<SlideSpec> = raw_slides
            .iter()
            .filter_map(|entry| match entry.as_object() {
                Some(obj) => Some(obj),
                None => {
                    log::warn!("Dropping non-object slide entry: {}", entry);
                    None
                }
            })
            .enumerate()
            .map(|(idx, obj)| parse_slide(obj, idx + 1))
            .collect();

        if slides.len() != SLIDE_COUNT {
            log::debug!(
                "Outline has {} slides; correcting to {}",
                slides.len(),
                SLIDE_COUNT
            );
        }
        slides.truncate(SLIDE_COUNT);
        while slides.len() < SLIDE_COUNT {
            slides.push(filler_slide());
        }

        if self.order == SlideOrder::Strict {
            check_order(&slides)?;
        }

        Ok(PresentationSpec { title, slides })
    }
}

/// The bullet slide appended to outlines that came back short.
fn filler_slide() -> SlideSpec {
    SlideSpec::new(
        FILLER_TITLE,
        SlideBody::BulletPoints {
            points: FILLER_POINTS.iter().map(|p| p.to_string()).collect(),
        },
    )
}

fn check_order(slides: &[SlideSpec]) -> Result<(), GenerationError> {
    for (idx, (slide, expected)) in slides
        .iter()
        .zip(SlideKind::CANONICAL_ORDER.iter())
        .enumerate()
    {
        if slide.kind() != Some(*expected) {
            return Err(GenerationError::SlideOrderMismatch {
                position: idx + 1,
                expected: expected.as_str(),
                found: slide.type_tag().to_string(),
            });
        }
    }
    Ok(())
}

/// Build one typed slide from a weakly typed object. `number` is 1-based.
fn parse_slide(obj: &Map<String, Value>, number: usize) -> SlideSpec {
    let title = text_field(obj, "title").unwrap_or_else(|| format!("Slide {}", number));
    let tag = text_field(obj, "type").unwrap_or_default();

    let body = match SlideKind::from_tag(&tag) {
        Some(SlideKind::TitleSlide) => SlideBody::Title {
            subtitle: text_field(obj, "subtitle")
                .or_else(|| text_field(obj, "content"))
                .unwrap_or_default(),
        },
        Some(SlideKind::BulletPoints) => SlideBody::BulletPoints {
            points: list_field(obj, "points"),
        },
        Some(SlideKind::SectionHeader) => SlideBody::SectionHeader {
            content: text_field(obj, "content"),
        },
        Some(SlideKind::ContentSlide) => SlideBody::Content {
            paragraphs: list_field(obj, "paragraphs"),
        },
        Some(SlideKind::ConclusionSlide) => SlideBody::Conclusion {
            content: text_field(obj, "content").unwrap_or_default(),
            key_takeaway: text_field(obj, "key_takeaway"),
        },
        None => {
            log::debug!("Slide {} has unknown type {:?}", number, tag);
            SlideBody::Unrecognized {
                tag,
                points: list_field(obj, "points"),
            }
        }
    };

    SlideSpec { title, body }
}

/// Read a scalar field as text. Numbers and booleans are stringified; null,
/// arrays and objects count as absent.
fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(scalar_text)
}

/// Read a list of scalars as text. A lone scalar is treated as a one-item
/// list; non-scalar items are skipped.
fn list_field(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(other) => scalar_text(other).into_iter().collect(),
        None => Vec::new(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outline_with(count: usize) -> Value {
        let slides: Vec<Value> = (0..count)
            .map(|i| json!({"title": format!("S{}", i + 1), "type": "bullet_points", "points": ["a"]}))
            .collect();
        json!({"title": "Deck", "slides": slides})
    }

    fn canonical_outline() -> Value {
        json!({
            "title": "Photosynthesis",
            "slides": [
                {"title": "Photosynthesis", "type": "title_slide", "content": "How plants eat", "subtitle": "Light to sugar"},
                {"title": "Introduction", "type": "bullet_points", "points": ["Light", "Water", "CO2", "Chlorophyll"]},
                {"title": "The Calvin Cycle", "type": "section_header", "content": "Fixing carbon"},
                {"title": "Details", "type": "content_slide", "paragraphs": ["First.", "Second."]},
                {"title": "Key Facts", "type": "bullet_points", "points": ["1", "2", "3", "4"]},
                {"title": "Conclusion", "type": "conclusion_slide", "content": "Plants convert light.", "key_takeaway": "Light is food"}
            ]
        })
    }

    #[test]
    fn test_always_six_slides() {
        let normalizer = SchemaNormalizer::new();
        for count in [0, 3, 6, 10] {
            let spec = normalizer.normalize(&outline_with(count)).unwrap();
            assert_eq!(spec.slides.len(), SLIDE_COUNT, "input had {} slides", count);
        }
    }

    #[test]
    fn test_padding_uses_filler_bullets() {
        let spec = SchemaNormalizer::new().normalize(&outline_with(3)).unwrap();

        assert_eq!(spec.slides[2].title, "S3");
        for slide in &spec.slides[3..] {
            assert_eq!(slide.title, "Additional Information");
            assert_eq!(
                slide.body,
                SlideBody::BulletPoints {
                    points: vec![
                        "Key point about the topic".into(),
                        "Supporting information".into(),
                        "Additional detail".into(),
                        "Final point".into(),
                    ]
                }
            );
        }
    }

    #[test]
    fn test_truncation_keeps_first_six_in_order() {
        let spec = SchemaNormalizer::new().normalize(&outline_with(10)).unwrap();
        let titles: Vec<&str> = spec.slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["S1", "S2", "S3", "S4", "S5", "S6"]);
    }

    #[test]
    fn test_canonical_outline_types() {
        let spec = SchemaNormalizer::new().normalize(&canonical_outline()).unwrap();
        let kinds: Vec<Option<SlideKind>> = spec.slides.iter().map(|s| s.kind()).collect();
        let expected: Vec<Option<SlideKind>> =
            SlideKind::CANONICAL_ORDER.iter().copied().map(Some).collect();
        assert_eq!(kinds, expected);
        assert_eq!(
            spec.slides[0].body,
            SlideBody::Title {
                subtitle: "Light to sugar".into()
            }
        );
        assert_eq!(
            spec.slides[5].body,
            SlideBody::Conclusion {
                content: "Plants convert light.".into(),
                key_takeaway: Some("Light is food".into())
            }
        );
    }

    #[test]
    fn test_type_order_not_corrected_when_lenient() {
        let raw = json!({
            "title": "Shuffled",
            "slides": [
                {"title": "End", "type": "conclusion_slide", "content": "Bye"},
                {"title": "Start", "type": "title_slide", "subtitle": "Hi"}
            ]
        });
        let spec = SchemaNormalizer::new().normalize(&raw).unwrap();
        assert_eq!(spec.slides[0].kind(), Some(SlideKind::ConclusionSlide));
        assert_eq!(spec.slides[1].kind(), Some(SlideKind::TitleSlide));
    }

    #[test]
    fn test_strict_order_rejects_mismatch() {
        let normalizer = SchemaNormalizer::new().with_slide_order(SlideOrder::Strict);

        assert!(normalizer.normalize(&canonical_outline()).is_ok());

        let err = normalizer.normalize(&outline_with(6)).unwrap_err();
        assert_eq!(
            err,
            GenerationError::SlideOrderMismatch {
                position: 1,
                expected: "title_slide",
                found: "bullet_points".into(),
            }
        );
    }

    #[test]
    fn test_subtitle_falls_back_to_content() {
        let raw = json!({"title": "T", "slides": [{"title": "T", "type": "title_slide", "content": "From content"}]});
        let spec = SchemaNormalizer::new().normalize(&raw).unwrap();
        assert_eq!(
            spec.slides[0].body,
            SlideBody::Title {
                subtitle: "From content".into()
            }
        );
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let raw = json!({"slides": [
            {"type": "bullet_points"},
            {"title": "Odd", "type": "timeline", "points": ["2001", 2002, null]},
            "not a slide",
            {"title": "Numbers", "type": "content_slide", "paragraphs": "Only one"}
        ]});
        let spec = SchemaNormalizer::new().normalize(&raw).unwrap();

        assert_eq!(spec.title, "Untitled Presentation");
        assert_eq!(spec.slides[0].title, "Slide 1");
        assert_eq!(spec.slides[0].body, SlideBody::BulletPoints { points: vec![] });
        assert_eq!(
            spec.slides[1].body,
            SlideBody::Unrecognized {
                tag: "timeline".into(),
                points: vec!["2001".into(), "2002".into()]
            }
        );
        assert_eq!(
            spec.slides[2].body,
            SlideBody::Content {
                paragraphs: vec!["Only one".into()]
            }
        );
        assert_eq!(spec.slides.len(), SLIDE_COUNT);
    }

    #[test]
    fn test_rejects_non_object_and_missing_slides() {
        let normalizer = SchemaNormalizer::new();
        assert!(matches!(
            normalizer.normalize(&json!([1, 2, 3])),
            Err(GenerationError::MalformedJson(_))
        ));
        assert!(matches!(
            normalizer.normalize(&json!({"title": "No slides"})),
            Err(GenerationError::MalformedJson(_))
        ));
    }
}
