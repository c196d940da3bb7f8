//! Reads a `.pptx` back into per-slide text, for checking written decks.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tutor_core::{Error, Result};
use zip::ZipArchive;

/// A text shape as found on a slide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectedShape {
    pub name: String,
    /// One entry per `a:p`, blank spacer lines included.
    pub paragraphs: Vec<String>,
    pub x: i64,
    pub y: i64,
}

/// A slide with its shapes sorted top-to-bottom, then left-to-right.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectedSlide {
    /// 1-based position in presentation order.
    pub number: usize,
    pub shapes: Vec<InspectedShape>,
}

impl InspectedSlide {
    /// First paragraph of the shape named like a title.
    pub fn title(&self) -> Option<&str> {
        self.shapes
            .iter()
            .find(|s| s.name.starts_with("Title"))
            .and_then(|s| s.paragraphs.first())
            .map(String::as_str)
    }

    /// Non-empty paragraphs of every non-title shape, in reading order.
    pub fn body_lines(&self) -> Vec<&str> {
        self.shapes
            .iter()
            .filter(|s| !s.name.starts_with("Title"))
            .flat_map(|s| s.paragraphs.iter())
            .map(String::as_str)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// Inspect the deck at `path`.
pub fn inspect(path: &Path) -> Result<Vec<InspectedSlide>> {
    let file = File::open(path)?;
    inspect_reader(BufReader::new(file))
}

/// Inspect a deck from any seekable reader.
pub fn inspect_reader<R: Read + Seek>(reader: R) -> Result<Vec<InspectedSlide>> {
    let mut archive =
        ZipArchive::new(reader).map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

    let order = slide_order(&mut archive)?;
    let mut slides = Vec::with_capacity(order.len());
    for (idx, slide_path) in order.iter().enumerate() {
        let content = read_file_from_archive(&mut archive, slide_path)?;
        let mut shapes = extract_shapes(&content)?;
        shapes.sort_by(|a, b| a.y.cmp(&b.y).then(a.x.cmp(&b.x)));
        slides.push(InspectedSlide {
            number: idx + 1,
            shapes,
        });
    }
    Ok(slides)
}

/// Slide part paths in presentation order, from `presentation.xml.rels`.
fn slide_order<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
    let rels = read_file_from_archive(archive, "ppt/_rels/presentation.xml.rels")?;
    let mut slides: Vec<(String, Option<usize>)> = Vec::new();

    let mut reader = Reader::from_str(&rels);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let rel_type = attr_value(e, b"Type").unwrap_or_default();
                if !rel_type.ends_with("/slide") {
                    continue;
                }
                let target = attr_value(e, b"Target").unwrap_or_default();
                let id = attr_value(e, b"Id").unwrap_or_default();
                let order = extract_slide_number(&id).or_else(|| extract_slide_number(&target));
                let path = match target.strip_prefix('/') {
                    Some(absolute) => absolute.to_string(),
                    None => format!("ppt/{}", target),
                };
                slides.push((path, order));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing relationships: {}", e)));
            }
            _ => {}
        }
    }

    slides.sort_by(|a, b| match (a.1, b.1) {
        (Some(na), Some(nb)) => na.cmp(&nb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });

    Ok(slides.into_iter().map(|(path, _)| path).collect())
}

fn extract_shapes(xml: &str) -> Result<Vec<InspectedShape>> {
    let mut shapes = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut current: Option<InspectedShape> = None;
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => current = Some(InspectedShape::default()),
                b"p" => {
                    if let Some(shape) = current.as_mut() {
                        shape.paragraphs.push(String::new());
                        in_paragraph = true;
                    }
                }
                b"t" => in_text = in_paragraph,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if let Some(shape) = current.as_mut() {
                    read_shape_attrs(shape, e);
                }
            }
            Ok(Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::XmlError(format!("Bad slide text: {}", err)))?;
                if let Some(last) = current.as_mut().and_then(|s| s.paragraphs.last_mut()) {
                    last.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    if let Some(shape) = current.take() {
                        shapes.push(shape);
                    }
                    in_paragraph = false;
                    in_text = false;
                }
                b"p" => in_paragraph = false,
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(format!("Error parsing slide: {}", e))),
            _ => {}
        }
    }

    Ok(shapes)
}

fn read_shape_attrs(shape: &mut InspectedShape, e: &BytesStart<'_>) {
    match local_name(e.name().as_ref()) {
        b"cNvPr" => shape.name = attr_value(e, b"name").unwrap_or_default(),
        b"off" => {
            shape.x = attr_value(e, b"x").and_then(|v| v.parse().ok()).unwrap_or(0);
            shape.y = attr_value(e, b"y").and_then(|v| v.parse().ok()).unwrap_or(0);
        }
        _ => {}
    }
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

fn read_file_from_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Strip a namespace prefix from an element name.
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Trailing number of "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml");
    let start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    s[start..].parse().ok()
}
