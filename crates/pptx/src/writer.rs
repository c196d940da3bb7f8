//! Serializes a [`RenderedDeck`] into a PresentationML package.

use crate::parts;
use crate::render::{Align, Paragraph, RenderedDeck, RenderedSlide, TextBox};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};
use tutor_core::{Error, Result};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

/// Bullet indent, in EMU.
const BULLET_INDENT: i64 = 342_900;

/// Writes `.pptx` packages. Output is byte-for-byte reproducible for the same deck.
#[derive(Debug, Clone, Default)]
pub struct PptxWriter;

impl PptxWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write `deck` to `path`, replacing any existing file.
    ///
    /// The package is assembled in memory first so a failure leaves nothing on disk.
    pub fn write_file(&self, deck: &RenderedDeck, path: &Path) -> Result<PathBuf> {
        let mut buffer = Cursor::new(Vec::new());
        self.write_to(deck, &mut buffer)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, buffer.into_inner())?;
        log::debug!("Wrote {} slides to {}", deck.slides.len(), path.display());
        Ok(path.to_path_buf())
    }

    /// Write the package to any seekable sink.
    pub fn write_to<W: Write + Seek>(&self, deck: &RenderedDeck, sink: W) -> Result<()> {
        let count = deck.slides.len();
        let mut zip = ZipWriter::new(sink);

        let mut entries: Vec<(String, Vec<u8>)> = vec![
            (parts::CONTENT_TYPES_PATH.into(), parts::content_types(count).into_bytes()),
            (parts::ROOT_RELS_PATH.into(), parts::root_rels().into_bytes()),
            (parts::APP_PATH.into(), parts::app_properties(count).into_bytes()),
            (parts::CORE_PATH.into(), parts::core_properties(&deck.title).into_bytes()),
            (parts::PRESENTATION_PATH.into(), parts::presentation(count).into_bytes()),
            (
                parts::PRESENTATION_RELS_PATH.into(),
                parts::presentation_rels(count).into_bytes(),
            ),
            (parts::MASTER_PATH.into(), parts::slide_master().into_bytes()),
            (parts::MASTER_RELS_PATH.into(), parts::master_rels().into_bytes()),
            (parts::LAYOUT_PATH.into(), parts::slide_layout().into_bytes()),
            (parts::LAYOUT_RELS_PATH.into(), parts::layout_rels().into_bytes()),
            (parts::THEME_PATH.into(), parts::theme().into_bytes()),
            (parts::PRES_PROPS_PATH.into(), parts::pres_props().into_bytes()),
            (parts::VIEW_PROPS_PATH.into(), parts::view_props().into_bytes()),
            (parts::TABLE_STYLES_PATH.into(), parts::table_styles().into_bytes()),
        ];
        for (index, slide) in deck.slides.iter().enumerate() {
            let number = index + 1;
            entries.push((parts::slide_path(number), slide_xml(slide)?));
            entries.push((parts::slide_rels_path(number), parts::slide_rels().into_bytes()));
        }

        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        for (name, bytes) in entries {
            zip.start_file(name.as_str(), options)
                .map_err(|e| Error::ZipError(format!("Failed to add {}: {}", name, e)))?;
            zip.write_all(&bytes)?;
        }
        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?;
        Ok(())
    }
}

fn xml_err(e: quick_xml::Error) -> Error {
    Error::XmlError(e.to_string())
}

/// Thin wrapper over the quick-xml writer for the handful of events a slide needs.
struct SlideXml {
    inner: Writer<Vec<u8>>,
}

impl SlideXml {
    fn new() -> Self {
        Self {
            inner: Writer::new(Vec::new()),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.inner.write_event(event).map_err(xml_err)
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut start = BytesStart::new(name);
        for attr in attrs {
            start.push_attribute(*attr);
        }
        self.event(Event::Start(start))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut start = BytesStart::new(name);
        for attr in attrs {
            start.push_attribute(*attr);
        }
        self.event(Event::Empty(start))
    }

    fn close(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.event(Event::Text(BytesText::new(text)))
    }

    fn finish(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

fn slide_xml(slide: &RenderedSlide) -> Result<Vec<u8>> {
    let mut xml = SlideXml::new();
    xml.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    xml.open("p:sld", &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)])?;
    xml.open("p:cSld", &[])?;
    xml.open("p:spTree", &[])?;

    xml.open("p:nvGrpSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    xml.empty("p:cNvGrpSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.close("p:nvGrpSpPr")?;
    xml.open("p:grpSpPr", &[])?;
    xml.open("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    xml.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    xml.close("a:xfrm")?;
    xml.close("p:grpSpPr")?;

    for (index, shape) in slide.shapes.iter().enumerate() {
        write_text_box(&mut xml, shape, index + 2)?;
    }

    xml.close("p:spTree")?;
    xml.close("p:cSld")?;
    xml.open("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.close("p:clrMapOvr")?;
    xml.close("p:sld")?;
    Ok(xml.finish())
}

fn write_text_box(xml: &mut SlideXml, shape: &TextBox, id: usize) -> Result<()> {
    let id = id.to_string();
    let placement = shape.placement;

    xml.open("p:sp", &[])?;
    xml.open("p:nvSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", id.as_str()), ("name", shape.name.as_str())])?;
    xml.empty("p:cNvSpPr", &[("txBox", "1")])?;
    xml.empty("p:nvPr", &[])?;
    xml.close("p:nvSpPr")?;

    xml.open("p:spPr", &[])?;
    xml.open("a:xfrm", &[])?;
    xml.empty(
        "a:off",
        &[
            ("x", placement.x.to_string().as_str()),
            ("y", placement.y.to_string().as_str()),
        ],
    )?;
    xml.empty(
        "a:ext",
        &[
            ("cx", placement.cx.to_string().as_str()),
            ("cy", placement.cy.to_string().as_str()),
        ],
    )?;
    xml.close("a:xfrm")?;
    xml.open("a:prstGeom", &[("prst", "rect")])?;
    xml.empty("a:avLst", &[])?;
    xml.close("a:prstGeom")?;
    xml.empty("a:noFill", &[])?;
    xml.close("p:spPr")?;

    xml.open("p:txBody", &[])?;
    xml.open("a:bodyPr", &[("wrap", "square"), ("rtlCol", "0")])?;
    xml.empty("a:normAutofit", &[])?;
    xml.close("a:bodyPr")?;
    xml.empty("a:lstStyle", &[])?;
    for paragraph in &shape.paragraphs {
        write_paragraph(xml, paragraph)?;
    }
    xml.close("p:txBody")?;
    xml.close("p:sp")
}

fn write_paragraph(xml: &mut SlideXml, paragraph: &Paragraph) -> Result<()> {
    let size = (paragraph.size_pt * 100).to_string();
    let align = match paragraph.align {
        Align::Left => "l",
        Align::Center => "ctr",
    };
    let indent = (-BULLET_INDENT).to_string();
    let margin = BULLET_INDENT.to_string();

    xml.open("a:p", &[])?;
    let mut ppr: Vec<(&str, &str)> = vec![("algn", align)];
    if paragraph.bullet {
        ppr.push(("marL", margin.as_str()));
        ppr.push(("indent", indent.as_str()));
    }
    xml.open("a:pPr", &ppr)?;
    if let Some(pt) = paragraph.space_before_pt {
        let spacing = (pt * 100).to_string();
        xml.open("a:spcBef", &[])?;
        xml.empty("a:spcPts", &[("val", spacing.as_str())])?;
        xml.close("a:spcBef")?;
    }
    if paragraph.bullet {
        xml.empty("a:buFont", &[("typeface", "Arial")])?;
        xml.empty("a:buChar", &[("char", "\u{2022}")])?;
    } else {
        xml.empty("a:buNone", &[])?;
    }
    xml.close("a:pPr")?;

    if !paragraph.text.is_empty() {
        let mut rpr: Vec<(&str, &str)> = vec![("lang", "en-US"), ("sz", size.as_str())];
        if paragraph.bold {
            rpr.push(("b", "1"));
        }
        if paragraph.italic {
            rpr.push(("i", "1"));
        }
        rpr.push(("dirty", "0"));
        let color = paragraph.color.to_string();

        xml.open("a:r", &[])?;
        xml.open("a:rPr", &rpr)?;
        xml.open("a:solidFill", &[])?;
        xml.empty("a:srgbClr", &[("val", color.as_str())])?;
        xml.close("a:solidFill")?;
        xml.close("a:rPr")?;
        xml.open("a:t", &[])?;
        xml.text(&paragraph.text)?;
        xml.close("a:t")?;
        xml.close("a:r")?;
    }
    xml.empty("a:endParaRPr", &[("lang", "en-US"), ("sz", size.as_str()), ("dirty", "0")])?;
    xml.close("a:p")
}
