//! Publishing: render an outline and write it as a `.pptx` under an output directory.

use crate::render::DeckRenderer;
use crate::writer::PptxWriter;
use std::path::PathBuf;
use tutor_core::{DeckSink, PresentationSpec, Result};

/// Renders outlines and writes them as `.pptx` files under one directory.
#[derive(Debug, Clone)]
pub struct DeckPublisher {
    renderer: DeckRenderer,
    writer: PptxWriter,
    output_dir: PathBuf,
}

impl DeckPublisher {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer: DeckRenderer::new(),
            writer: PptxWriter::new(),
            output_dir: output_dir.into(),
        }
    }
}

impl DeckSink for DeckPublisher {
    fn publish(&self, spec: &PresentationSpec, file_name: &str) -> Result<PathBuf> {
        let deck = self.renderer.render(spec);
        let path = self.output_dir.join(file_name);
        log::debug!("Rendering '{}' ({} slides)", deck.title, deck.slides.len());
        self.writer.write_file(&deck, &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::{SlideBody, SlideSpec};

    #[test]
    fn test_publish_overwrites_same_name() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = DeckPublisher::new(dir.path());
        let mut spec = PresentationSpec {
            title: "First".into(),
            slides: vec![SlideSpec::new("One", SlideBody::Content { paragraphs: vec!["a".into()] })],
        };

        let first = publisher.publish(&spec, "Deck_presentation.pptx").unwrap();
        spec.slides[0].title = "Replaced".into();
        let second = publisher.publish(&spec, "Deck_presentation.pptx").unwrap();

        assert_eq!(first, second);
        let slides = crate::inspect(&second).unwrap();
        assert_eq!(slides[0].title(), Some("Replaced"));
    }
}
