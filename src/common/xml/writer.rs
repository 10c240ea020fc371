//! A thin element writer over `quick-xml`.
//!
//! Every part this crate emits is produced through [`XmlWriter`], so text and
//! attribute values are always escaped and start/end tags always pair up. The
//! writer keeps a stack of open element names; [`XmlWriter::end`] closes the
//! innermost one and [`XmlWriter::finish`] refuses to return a document that
//! still has open elements.

use crate::ooxml::opc::error::{OpcError, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Structured XML builder producing a UTF-8 document.
///
/// # Example
///
/// ```
/// use slidepack::common::xml::XmlWriter;
///
/// let mut w = XmlWriter::with_declaration()?;
/// w.start("p:txBody", &[])?;
/// w.leaf("a:t", &[], "Fish & Chips")?;
/// w.end()?;
/// let xml = w.finish()?;
/// assert!(xml.ends_with("<p:txBody><a:t>Fish &amp; Chips</a:t></p:txBody>"));
/// # Ok::<(), slidepack::ooxml::opc::error::OpcError>(())
/// ```
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
    open: Vec<String>,
}

impl XmlWriter {
    /// Create a writer without an XML declaration (for fragments).
    pub fn new() -> Self {
        Self {
            inner: Writer::new(Vec::with_capacity(2048)),
            open: Vec::new(),
        }
    }

    /// Create a writer that begins with the standalone UTF-8 declaration
    /// OOXML parts carry.
    pub fn with_declaration() -> Result<Self> {
        let mut writer = Self::new();
        writer.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        writer.write(Event::Text(BytesText::from_escaped("\n")))?;
        Ok(writer)
    }

    /// Open an element with the given attributes.
    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Start(Self::element(name, attrs)))?;
        self.open.push(name.to_string());
        Ok(())
    }

    /// Write a self-closing element.
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Empty(Self::element(name, attrs)))
    }

    /// Write escaped character data inside the current element.
    pub fn text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.write(Event::Text(BytesText::new(text)))
    }

    /// Close the innermost open element.
    pub fn end(&mut self) -> Result<()> {
        let name = self
            .open
            .pop()
            .ok_or_else(|| OpcError::Xml("end() called with no open element".to_string()))?;
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// Write `<name attrs>text</name>`.
    pub fn leaf(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end()
    }

    /// Finish the document and return it as a string.
    pub fn finish(self) -> Result<String> {
        if let Some(name) = self.open.last() {
            return Err(OpcError::Xml(format!("unclosed element <{}>", name)));
        }
        String::from_utf8(self.inner.into_inner()).map_err(|e| OpcError::Xml(e.to_string()))
    }

    fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
        let mut elem = BytesStart::new(name);
        for &attr in attrs {
            elem.push_attribute(attr);
        }
        elem
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.inner
            .write_event(event)
            .map_err(|e| OpcError::Xml(e.to_string()))
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}
