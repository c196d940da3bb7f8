//! Pure mapping from a normalized outline to positioned, styled text.
//!
//! Each slide type has one render rule. Nothing here touches the filesystem;
//! [`crate::PptxWriter`] serializes the result.

use crate::theme::{self, ColorScheme, Rgb, EMU_PER_INCH};
use serde::{Deserialize, Serialize};
use tutor_core::{PresentationSpec, SlideBody, SlideSpec};

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
}

/// Position and size of a text box, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Placement {
    pub const fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }
}

const TITLE_BOX: Placement = Placement::new(457_200, 274_638, 8_229_600, 1_143_000);
const BODY_BOX: Placement = Placement::new(457_200, 1_600_200, 8_229_600, 4_525_963);
const COVER_TITLE_BOX: Placement = Placement::new(685_800, 2_130_425, 7_772_400, 1_470_025);
const COVER_SUBTITLE_BOX: Placement = Placement::new(1_371_600, 3_886_200, 6_400_800, 1_752_600);
const SECTION_TITLE_BOX: Placement = Placement::new(722_313, 4_406_900, 7_772_400, 1_362_075);
const SECTION_TEXT_BOX: Placement = Placement::new(722_313, 2_906_713, 7_772_400, 1_500_187);
const CONTENT_TEXT_BOX: Placement = Placement::new(
    EMU_PER_INCH,
    2 * EMU_PER_INCH,
    8 * EMU_PER_INCH,
    5 * EMU_PER_INCH,
);

/// One paragraph with a single uniformly styled run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Empty text renders as a blank spacer line.
    pub text: String,
    pub size_pt: u32,
    pub bold: bool,
    pub italic: bool,
    pub color: Rgb,
    pub align: Align,
    pub space_before_pt: Option<u32>,
    pub bullet: bool,
}

impl Paragraph {
    fn new(text: impl Into<String>, size_pt: u32, color: Rgb) -> Self {
        Self {
            text: text.into(),
            size_pt,
            bold: false,
            italic: false,
            color,
            align: Align::Left,
            space_before_pt: None,
            bullet: false,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    fn space_before(mut self, pt: u32) -> Self {
        self.space_before_pt = Some(pt);
        self
    }

    fn bulleted(mut self) -> Self {
        self.bullet = true;
        self
    }
}

/// A text box on a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBox {
    pub name: String,
    pub placement: Placement,
    pub paragraphs: Vec<Paragraph>,
}

/// A slide ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSlide {
    /// Type tag of the outline slide this came from.
    pub source_type: String,
    pub shapes: Vec<TextBox>,
}

/// A whole deck ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDeck {
    pub title: String,
    pub slides: Vec<RenderedSlide>,
}

/// Applies the per-type render rules with a fixed color scheme.
#[derive(Debug, Clone)]
pub struct DeckRenderer {
    colors: ColorScheme,
}

impl Default for DeckRenderer {
    fn default() -> Self {
        Self {
            colors: theme::BLUE,
        }
    }
}

impl DeckRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render every slide of `spec`, in order.
    pub fn render(&self, spec: &PresentationSpec) -> RenderedDeck {
        RenderedDeck {
            title: spec.title.clone(),
            slides: spec.slides.iter().map(|s| self.render_slide(s)).collect(),
        }
    }

    fn render_slide(&self, slide: &SlideSpec) -> RenderedSlide {
        let shapes = match &slide.body {
            SlideBody::Title { subtitle } => vec![
                self.title_box(&slide.title, COVER_TITLE_BOX),
                text_box(
                    "Subtitle 2",
                    COVER_SUBTITLE_BOX,
                    vec![Paragraph::new(subtitle, theme::SUBTITLE_PT, self.colors.text)
                        .italic()
                        .centered()],
                ),
            ],
            SlideBody::BulletPoints { points } | SlideBody::Unrecognized { points, .. } => {
                vec![self.title_box(&slide.title, TITLE_BOX), self.bullet_box(points)]
            }
            SlideBody::SectionHeader { content } => {
                let mut shapes = vec![self.title_box(&slide.title, SECTION_TITLE_BOX)];
                if let Some(content) = content {
                    shapes.push(text_box(
                        "Text 2",
                        SECTION_TEXT_BOX,
                        vec![Paragraph::new(content, theme::SECTION_PT, self.colors.accent)
                            .bold()
                            .centered()],
                    ));
                }
                shapes
            }
            SlideBody::Content { paragraphs } => {
                let body = paragraphs
                    .iter()
                    .enumerate()
                    .map(|(i, text)| {
                        let p = Paragraph::new(text, theme::PARAGRAPH_PT, self.colors.text);
                        if i > 0 {
                            p.space_before(theme::PARAGRAPH_SPACING_PT)
                        } else {
                            p
                        }
                    })
                    .collect();
                vec![
                    self.title_box(&slide.title, TITLE_BOX),
                    text_box("TextBox 2", CONTENT_TEXT_BOX, body),
                ]
            }
            SlideBody::Conclusion {
                content,
                key_takeaway,
            } => {
                let mut body = vec![Paragraph::new(content, theme::CONCLUSION_PT, self.colors.text)];
                if let Some(takeaway) = key_takeaway {
                    body.push(
                        Paragraph::new("", theme::CONCLUSION_PT, self.colors.text)
                            .space_before(theme::TAKEAWAY_SPACER_PT),
                    );
                    body.push(
                        Paragraph::new(
                            format!("Key Takeaway: {}", takeaway),
                            theme::TAKEAWAY_PT,
                            self.colors.accent,
                        )
                        .bold()
                        .italic()
                        .centered(),
                    );
                }
                vec![
                    self.title_box(&slide.title, TITLE_BOX),
                    text_box("Content 2", BODY_BOX, body),
                ]
            }
        };

        RenderedSlide {
            source_type: slide.type_tag().to_string(),
            shapes,
        }
    }

    fn title_box(&self, title: &str, placement: Placement) -> TextBox {
        text_box(
            "Title 1",
            placement,
            vec![Paragraph::new(title, theme::TITLE_PT, self.colors.title)
                .bold()
                .centered()],
        )
    }

    fn bullet_box(&self, points: &[String]) -> TextBox {
        text_box(
            "Content 2",
            BODY_BOX,
            points
                .iter()
                .map(|p| Paragraph::new(p, theme::BULLET_PT, self.colors.text).bulleted())
                .collect(),
        )
    }
}

fn text_box(name: &str, placement: Placement, paragraphs: Vec<Paragraph>) -> TextBox {
    TextBox {
        name: name.to_string(),
        placement,
        paragraphs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::SlideKind;

    fn slide(title: &str, body: SlideBody) -> SlideSpec {
        SlideSpec::new(title, body)
    }

    fn render_one(body: SlideBody) -> RenderedSlide {
        let spec = PresentationSpec {
            title: "Deck".into(),
            slides: vec![slide("Heading", body)],
        };
        DeckRenderer::new().render(&spec).slides.remove(0)
    }

    #[test]
    fn test_every_title_is_32pt_bold_centered() {
        let rendered = render_one(SlideBody::BulletPoints { points: vec![] });
        let title = &rendered.shapes[0].paragraphs[0];
        assert_eq!(title.text, "Heading");
        assert_eq!(title.size_pt, 32);
        assert!(title.bold);
        assert_eq!(title.align, Align::Center);
        assert_eq!(title.color, theme::BLUE.title);
    }

    #[test]
    fn test_title_slide_subtitle() {
        let rendered = render_one(SlideBody::Title {
            subtitle: "An overview".into(),
        });
        assert_eq!(rendered.source_type, SlideKind::TitleSlide.as_str());
        let subtitle = &rendered.shapes[1].paragraphs[0];
        assert_eq!(subtitle.text, "An overview");
        assert_eq!(subtitle.size_pt, 24);
        assert!(subtitle.italic);
        assert!(!subtitle.bold);
        assert_eq!(subtitle.align, Align::Center);
    }

    #[test]
    fn test_bullet_points_flat() {
        let rendered = render_one(SlideBody::BulletPoints {
            points: vec!["One".into(), "Two".into(), "Three".into()],
        });
        let body = &rendered.shapes[1].paragraphs;
        assert_eq!(body.len(), 3);
        assert!(body.iter().all(|p| p.bullet && p.size_pt == 20 && p.align == Align::Left));
    }

    #[test]
    fn test_section_header() {
        let rendered = render_one(SlideBody::SectionHeader {
            content: Some("Part II".into()),
        });
        let line = &rendered.shapes[1].paragraphs[0];
        assert_eq!(line.size_pt, 28);
        assert!(line.bold);
        assert_eq!(line.color, theme::BLUE.accent);
        assert_eq!(line.align, Align::Center);

        let bare = render_one(SlideBody::SectionHeader { content: None });
        assert_eq!(bare.shapes.len(), 1);
    }

    #[test]
    fn test_content_paragraph_spacing() {
        let rendered = render_one(SlideBody::Content {
            paragraphs: vec!["First".into(), "Second".into(), "Third".into()],
        });
        let body = &rendered.shapes[1].paragraphs;
        assert_eq!(body[0].space_before_pt, None);
        assert_eq!(body[1].space_before_pt, Some(12));
        assert_eq!(body[2].space_before_pt, Some(12));
        assert!(body.iter().all(|p| !p.bullet && p.size_pt == 20));
    }

    #[test]
    fn test_conclusion_with_takeaway() {
        let rendered = render_one(SlideBody::Conclusion {
            content: "Summary".into(),
            key_takeaway: Some("Keep learning".into()),
        });
        let body = &rendered.shapes[1].paragraphs;
        assert_eq!(body.len(), 3);
        assert_eq!(body[0].text, "Summary");
        assert_eq!(body[0].size_pt, 22);
        assert_eq!(body[1].text, "");
        assert_eq!(body[1].space_before_pt, Some(20));
        assert_eq!(body[2].text, "Key Takeaway: Keep learning");
        assert_eq!(body[2].size_pt, 24);
        assert!(body[2].bold && body[2].italic);
        assert_eq!(body[2].color, theme::BLUE.accent);
    }

    #[test]
    fn test_conclusion_without_takeaway() {
        let rendered = render_one(SlideBody::Conclusion {
            content: "Summary".into(),
            key_takeaway: None,
        });
        assert_eq!(rendered.shapes[1].paragraphs.len(), 1);
    }

    #[test]
    fn test_unknown_type_uses_bullet_rule() {
        let unknown = render_one(SlideBody::Unrecognized {
            tag: "quiz".into(),
            points: vec!["Q1".into()],
        });
        let bullets = render_one(SlideBody::BulletPoints {
            points: vec!["Q1".into()],
        });
        assert_eq!(unknown.source_type, "quiz");
        assert_eq!(unknown.shapes, bullets.shapes);
    }

    #[test]
    fn test_render_is_deterministic() {
        let spec = PresentationSpec {
            title: "Deck".into(),
            slides: vec![
                slide("A", SlideBody::Title { subtitle: "s".into() }),
                slide("B", SlideBody::Content { paragraphs: vec!["p".into()] }),
            ],
        };
        let renderer = DeckRenderer::new();
        assert_eq!(renderer.render(&spec), renderer.render(&spec));
    }

    #[test]
    fn test_rendered_deck_serializes() {
        let spec = PresentationSpec {
            title: "Deck".into(),
            slides: vec![slide("A", SlideBody::SectionHeader { content: None })],
        };
        let json = serde_json::to_value(DeckRenderer::new().render(&spec)).unwrap();
        assert_eq!(json["slides"][0]["source_type"], "section_header");
        assert_eq!(json["slides"][0]["shapes"][0]["paragraphs"][0]["color"], serde_json::json!([0, 112, 192]));
    }
}
