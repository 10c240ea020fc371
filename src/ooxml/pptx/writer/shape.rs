//! Shape writers for slide, layout and master shape trees.
//!
//! Each function appends one complete element to an [`XmlWriter`]; ids and
//! relationship ids are decided by the caller.

use crate::common::xml::XmlWriter;
use crate::ooxml::error::Result;
use crate::ooxml::pptx::deck::{Geometry, TitleStyle};

/// Language tag written on every run.
const LANG: &str = "en-US";

/// Placeholder reference of a shape (`<p:ph>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Placeholder {
    /// `type` attribute, omitted for generic content placeholders
    pub kind: Option<&'static str>,
    /// `idx` attribute, omitted for the implicit index 0
    pub idx: Option<u32>,
}

impl Placeholder {
    /// Title placeholder of the given style.
    pub fn title(style: TitleStyle) -> Self {
        Self {
            kind: Some(style.placeholder_type()),
            idx: None,
        }
    }

    /// Body placeholder (index 1).
    pub fn body() -> Self {
        Self {
            kind: None,
            idx: Some(1),
        }
    }

    fn write(&self, w: &mut XmlWriter) -> Result<()> {
        let mut buf = itoa::Buffer::new();
        let mut attrs = Vec::with_capacity(2);
        if let Some(kind) = self.kind {
            attrs.push(("type", kind));
        }
        if let Some(idx) = self.idx {
            attrs.push(("idx", buf.format(idx)));
        }
        w.empty("p:ph", &attrs)?;
        Ok(())
    }
}

/// Write the non-visual and transform header of the root group shape (id 1).
pub(crate) fn write_group_header(w: &mut XmlWriter) -> Result<()> {
    w.start("p:nvGrpSpPr", &[])?;
    w.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    w.empty("p:cNvGrpSpPr", &[])?;
    w.empty("p:nvPr", &[])?;
    w.end()?;

    w.start("p:grpSpPr", &[])?;
    w.start("a:xfrm", &[])?;
    w.empty("a:off", &[("x", "0"), ("y", "0")])?;
    w.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    w.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    w.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    w.end()?;
    w.end()?;
    Ok(())
}

/// Write a picture background (`<p:bg>`) stretched over the whole slide.
pub(crate) fn write_background(w: &mut XmlWriter, r_id: &str) -> Result<()> {
    w.start("p:bg", &[])?;
    w.start("p:bgPr", &[])?;
    w.start("a:blipFill", &[("dpi", "0"), ("rotWithShape", "1")])?;
    w.empty("a:blip", &[("r:embed", r_id)])?;
    w.empty("a:srcRect", &[])?;
    w.start("a:stretch", &[])?;
    w.empty("a:fillRect", &[])?;
    w.end()?;
    w.end()?;
    w.empty("a:effectLst", &[])?;
    w.end()?;
    w.end()?;
    Ok(())
}

/// Write a title placeholder holding a single run.
pub(crate) fn write_title(
    w: &mut XmlWriter,
    shape_id: u32,
    text: &str,
    style: TitleStyle,
) -> Result<()> {
    let name = format!("Title {}", shape_id - 1);
    write_placeholder(w, shape_id, &name, Placeholder::title(style), None, &[text])
}

/// Write a body placeholder with one paragraph per item, in order.
pub(crate) fn write_bullets(w: &mut XmlWriter, shape_id: u32, items: &[String]) -> Result<()> {
    let name = format!("Content Placeholder {}", shape_id - 1);
    write_placeholder(w, shape_id, &name, Placeholder::body(), None, items)
}

/// Write a placeholder shape (`<p:sp>`).
///
/// Without a geometry the shape inherits its position from the layout.
/// An empty paragraph list still yields one empty paragraph, as a text body
/// requires at least one.
pub(crate) fn write_placeholder<S: AsRef<str>>(
    w: &mut XmlWriter,
    shape_id: u32,
    name: &str,
    placeholder: Placeholder,
    geometry: Option<Geometry>,
    paragraphs: &[S],
) -> Result<()> {
    let mut buf = itoa::Buffer::new();

    w.start("p:sp", &[])?;
    w.start("p:nvSpPr", &[])?;
    w.empty("p:cNvPr", &[("id", buf.format(shape_id)), ("name", name)])?;
    w.start("p:cNvSpPr", &[])?;
    w.empty("a:spLocks", &[("noGrp", "1")])?;
    w.end()?;
    w.start("p:nvPr", &[])?;
    placeholder.write(w)?;
    w.end()?;
    w.end()?;

    match geometry {
        Some(geometry) => {
            w.start("p:spPr", &[])?;
            write_xfrm(w, &geometry)?;
            w.end()?;
        },
        None => w.empty("p:spPr", &[])?,
    }

    w.start("p:txBody", &[])?;
    w.empty("a:bodyPr", &[])?;
    w.empty("a:lstStyle", &[])?;
    if paragraphs.is_empty() {
        w.start("a:p", &[])?;
        w.empty("a:endParaRPr", &[("lang", LANG), ("dirty", "0")])?;
        w.end()?;
    }
    for paragraph in paragraphs {
        write_paragraph(w, paragraph.as_ref())?;
    }
    w.end()?;

    w.end()?;
    Ok(())
}

/// Write a picture (`<p:pic>`) referencing an embedded image.
pub(crate) fn write_picture(
    w: &mut XmlWriter,
    shape_id: u32,
    r_id: &str,
    geometry: &Geometry,
    description: Option<&str>,
) -> Result<()> {
    let mut buf = itoa::Buffer::new();
    let name = format!("Picture {}", shape_id - 1);

    w.start("p:pic", &[])?;
    w.start("p:nvPicPr", &[])?;
    let mut attrs = vec![("id", buf.format(shape_id)), ("name", name.as_str())];
    if let Some(description) = description {
        attrs.push(("descr", description));
    }
    w.empty("p:cNvPr", &attrs)?;
    w.start("p:cNvPicPr", &[])?;
    w.empty("a:picLocks", &[("noChangeAspect", "1")])?;
    w.end()?;
    w.empty("p:nvPr", &[])?;
    w.end()?;

    w.start("p:blipFill", &[])?;
    w.empty("a:blip", &[("r:embed", r_id)])?;
    w.start("a:stretch", &[])?;
    w.empty("a:fillRect", &[])?;
    w.end()?;
    w.end()?;

    w.start("p:spPr", &[])?;
    write_xfrm(w, geometry)?;
    w.start("a:prstGeom", &[("prst", "rect")])?;
    w.empty("a:avLst", &[])?;
    w.end()?;
    w.end()?;

    w.end()?;
    Ok(())
}

fn write_xfrm(w: &mut XmlWriter, geometry: &Geometry) -> Result<()> {
    let mut first = itoa::Buffer::new();
    let mut second = itoa::Buffer::new();

    w.start("a:xfrm", &[])?;
    w.empty(
        "a:off",
        &[("x", first.format(geometry.x)), ("y", second.format(geometry.y))],
    )?;
    w.empty(
        "a:ext",
        &[("cx", first.format(geometry.cx)), ("cy", second.format(geometry.cy))],
    )?;
    w.end()?;
    Ok(())
}

fn write_paragraph(w: &mut XmlWriter, text: &str) -> Result<()> {
    w.start("a:p", &[])?;
    w.start("a:r", &[])?;
    w.empty("a:rPr", &[("lang", LANG), ("dirty", "0")])?;
    w.leaf("a:t", &[], text)?;
    w.end()?;
    w.end()?;
    Ok(())
}
