//! Document properties parts for OOXML packages.
//!
//! `docProps/core.xml` carries the Dublin Core metadata of the document and
//! `docProps/app.xml` the application-level summary (slide count, titles).

use crate::common::xml::XmlWriter;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::opc::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

/// Application name written into `docProps/app.xml`.
pub const APPLICATION_NAME: &str = "slidepack";

/// Document core properties (metadata).
///
/// These properties are stored in the `docProps/core.xml` file in the OPC package.
/// Timestamps are caller-supplied; nothing here reads the clock, so two builds
/// with the same properties produce the same part.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentProperties {
    /// Document title
    pub title: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document creator/author
    pub creator: Option<String>,
    /// Document keywords (comma-separated)
    pub keywords: Option<String>,
    /// Document description
    pub description: Option<String>,
    /// Last modified by
    pub last_modified_by: Option<String>,
    /// Document category
    pub category: Option<String>,
    /// Creation date
    pub created: Option<DateTime<Utc>>,
    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl DocumentProperties {
    /// Create a new empty document properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the document subject.
    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Set the document creator/author.
    pub fn creator(mut self, creator: &str) -> Self {
        self.creator = Some(creator.to_string());
        self
    }

    /// Set the document keywords.
    pub fn keywords(mut self, keywords: &str) -> Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    /// Set the document description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Set who last modified the document.
    pub fn last_modified_by(mut self, name: &str) -> Self {
        self.last_modified_by = Some(name.to_string());
        self
    }

    /// Set the document category.
    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// Set the creation timestamp.
    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.created = Some(at);
        self
    }

    /// Set the last modification timestamp.
    pub fn modified(mut self, at: DateTime<Utc>) -> Self {
        self.modified = Some(at);
        self
    }

    /// Generate core.xml content for this properties set.
    pub fn to_xml(&self) -> Result<String> {
        let mut w = XmlWriter::with_declaration()?;
        w.start(
            "cp:coreProperties",
            &[
                ("xmlns:cp", namespace::CORE_PROPERTIES),
                ("xmlns:dc", namespace::DC),
                ("xmlns:dcterms", namespace::DC_TERMS),
                ("xmlns:dcmitype", namespace::DC_MITYPE),
                ("xmlns:xsi", namespace::XSI),
            ],
        )?;

        let fields = [
            ("dc:title", &self.title),
            ("dc:subject", &self.subject),
            ("dc:creator", &self.creator),
            ("cp:keywords", &self.keywords),
            ("dc:description", &self.description),
            ("cp:lastModifiedBy", &self.last_modified_by),
            ("cp:category", &self.category),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                w.leaf(name, &[], value)?;
            }
        }

        for (name, stamp) in [("dcterms:created", &self.created), ("dcterms:modified", &self.modified)] {
            if let Some(stamp) = stamp {
                let text = stamp.to_rfc3339_opts(SecondsFormat::Secs, true);
                w.leaf(name, &[("xsi:type", "dcterms:W3CDTF")], &text)?;
            }
        }

        w.end()?;
        w.finish()
    }
}

/// Extended (application) properties for a presentation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppProperties {
    /// Name of the theme, listed first among the titles of parts
    pub theme_name: String,
    /// One title per slide, in presentation order
    pub slide_titles: Vec<String>,
}

impl AppProperties {
    /// Create app properties for a deck with the given slide titles.
    pub fn new(theme_name: &str, slide_titles: Vec<String>) -> Self {
        Self {
            theme_name: theme_name.to_string(),
            slide_titles,
        }
    }

    /// Generate app.xml content.
    pub fn to_xml(&self) -> Result<String> {
        let mut buf = itoa::Buffer::new();
        let slides = self.slide_titles.len();

        let mut w = XmlWriter::with_declaration()?;
        w.start(
            "Properties",
            &[
                ("xmlns", namespace::EXTENDED_PROPERTIES),
                ("xmlns:vt", namespace::DOC_PROPS_VTYPES),
            ],
        )?;
        w.leaf("TotalTime", &[], "0")?;
        w.leaf("Application", &[], APPLICATION_NAME)?;
        w.leaf("Slides", &[], buf.format(slides))?;
        w.leaf("Notes", &[], "0")?;
        w.leaf("HiddenSlides", &[], "0")?;
        w.leaf("ScaleCrop", &[], "false")?;

        // Heading pairs: ("Theme", 1) and, when there are slides, ("Slide Titles", n).
        let pairs: &[(&str, usize)] = if slides == 0 {
            &[("Theme", 1)]
        } else {
            &[("Theme", 1), ("Slide Titles", slides)]
        };
        w.start("HeadingPairs", &[])?;
        w.start(
            "vt:vector",
            &[("size", buf.format(pairs.len() * 2)), ("baseType", "variant")],
        )?;
        for &(heading, count) in pairs {
            w.start("vt:variant", &[])?;
            w.leaf("vt:lpstr", &[], heading)?;
            w.end()?;
            w.start("vt:variant", &[])?;
            w.leaf("vt:i4", &[], buf.format(count))?;
            w.end()?;
        }
        w.end()?;
        w.end()?;

        w.start("TitlesOfParts", &[])?;
        w.start(
            "vt:vector",
            &[("size", buf.format(slides + 1)), ("baseType", "lpstr")],
        )?;
        w.leaf("vt:lpstr", &[], &self.theme_name)?;
        for title in &self.slide_titles {
            w.leaf("vt:lpstr", &[], title)?;
        }
        w.end()?;
        w.end()?;

        w.leaf("LinksUpToDate", &[], "false")?;
        w.leaf("SharedDoc", &[], "false")?;
        w.leaf("HyperlinksChanged", &[], "false")?;
        w.end()?;
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_document_properties_builder() {
        let props = DocumentProperties::new()
            .title("Test Document")
            .creator("John Doe")
            .subject("Testing")
            .keywords("test, document, rust");

        assert_eq!(props.title, Some("Test Document".to_string()));
        assert_eq!(props.creator, Some("John Doe".to_string()));
        assert_eq!(props.subject, Some("Testing".to_string()));
        assert_eq!(props.keywords, Some("test, document, rust".to_string()));
    }

    #[test]
    fn test_core_xml_generation() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let props = DocumentProperties::new()
            .title("My Document")
            .creator("Test Author")
            .created(created)
            .modified(created);

        let xml = props.to_xml().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
        assert!(xml.contains("<dc:title>My Document</dc:title>"));
        assert!(xml.contains("<dc:creator>Test Author</dc:creator>"));
        assert!(xml.contains(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">2024-03-01T09:30:00Z</dcterms:created>"#
        ));
        assert!(!xml.contains("dc:subject"));
    }

    #[test]
    fn test_core_xml_escaping() {
        let props = DocumentProperties::new().title("Test & <Special>");

        let xml = props.to_xml().unwrap();
        assert!(xml.contains("<dc:title>Test &amp; &lt;Special&gt;</dc:title>"));
    }

    #[test]
    fn test_app_xml_lists_slide_titles() {
        let app = AppProperties::new("Office Theme", vec!["Intro".into(), "Q&A".into()]);
        let xml = app.to_xml().unwrap();

        assert!(xml.contains("<Slides>2</Slides>"));
        assert!(xml.contains(r#"<vt:vector size="3" baseType="lpstr">"#));
        assert!(xml.contains("<vt:lpstr>Q&amp;A</vt:lpstr>"));
        assert!(xml.contains("<vt:lpstr>Slide Titles</vt:lpstr>"));
    }

    #[test]
    fn test_app_xml_without_slides() {
        let xml = AppProperties::new("Office Theme", Vec::new()).to_xml().unwrap();
        assert!(xml.contains("<Slides>0</Slides>"));
        assert!(xml.contains(r#"<vt:vector size="2" baseType="variant">"#));
        assert!(!xml.contains("Slide Titles"));
    }
}
