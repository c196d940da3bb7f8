//! Turns normalized outlines into `.pptx` decks with a fixed blue theme.
//!
//! [`DeckRenderer`] decides what goes on each slide, [`PptxWriter`] packages
//! it as PresentationML, and [`DeckPublisher`] joins the two behind
//! [`tutor_core::DeckSink`]. [`inspect`] reads a written deck back.

mod parts;

pub mod inspect;
pub mod publish;
pub mod render;
pub mod theme;
pub mod writer;

pub use inspect::{inspect, inspect_reader, InspectedShape, InspectedSlide};
pub use publish::DeckPublisher;
pub use render::{Align, DeckRenderer, Paragraph, Placement, RenderedDeck, RenderedSlide, TextBox};
pub use theme::{ColorScheme, Rgb};
pub use writer::PptxWriter;
