//! Presentation template module.
//!
//! Generates the scaffolding parts every presentation needs: one theme, one
//! slide master and one slide layout ("Title and Content"). Slides inherit
//! their title and body placeholder positions from the layout, which in turn
//! takes them from the master.

use crate::common::xml::XmlWriter;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::pptx::deck::{Geometry, PresentationSettings};
use crate::ooxml::pptx::writer::shape::{self, Placeholder};

/// Name of the generated theme.
pub const THEME_NAME: &str = "Office Theme";

/// Id of the only slide layout in the master's layout list.
pub const SLIDE_LAYOUT_ID: u32 = 2_147_483_649;

/// Scheme colours in theme order, as (element, sRGB value).
const SCHEME_COLORS: [(&str, &str); 10] = [
    ("a:dk2", "1F497D"),
    ("a:lt2", "EEECE1"),
    ("a:accent1", "4F81BD"),
    ("a:accent2", "C0504D"),
    ("a:accent3", "9BBB59"),
    ("a:accent4", "8064A2"),
    ("a:accent5", "4BACC6"),
    ("a:accent6", "F79646"),
    ("a:hlink", "0000FF"),
    ("a:folHlink", "800080"),
];

/// Attributes of `<p:clrMap>` mapping the master to the theme colours.
const COLOR_MAP: [(&str, &str); 12] = [
    ("bg1", "lt1"),
    ("tx1", "dk1"),
    ("bg2", "lt2"),
    ("tx2", "dk2"),
    ("accent1", "accent1"),
    ("accent2", "accent2"),
    ("accent3", "accent3"),
    ("accent4", "accent4"),
    ("accent5", "accent5"),
    ("accent6", "accent6"),
    ("hlink", "hlink"),
    ("folHlink", "folHlink"),
];

/// Title placeholder position for the given slide size.
pub fn title_geometry(settings: &PresentationSettings) -> Geometry {
    let (w, h) = (settings.slide_width, settings.slide_height);
    Geometry::new(w / 20, h / 25, w * 9 / 10, h / 6)
}

/// Body placeholder position for the given slide size.
pub fn body_geometry(settings: &PresentationSettings) -> Geometry {
    let (w, h) = (settings.slide_width, settings.slide_height);
    Geometry::new(w / 20, h * 7 / 30, w * 9 / 10, h * 2 / 3)
}

/// Generate a minimal valid theme.xml content.
pub fn theme_xml() -> Result<String> {
    let mut w = XmlWriter::with_declaration()?;
    w.start("a:theme", &[("xmlns:a", namespace::DML_MAIN), ("name", THEME_NAME)])?;
    w.start("a:themeElements", &[])?;

    w.start("a:clrScheme", &[("name", "Office")])?;
    w.start("a:dk1", &[])?;
    w.empty("a:sysClr", &[("val", "windowText"), ("lastClr", "000000")])?;
    w.end()?;
    w.start("a:lt1", &[])?;
    w.empty("a:sysClr", &[("val", "window"), ("lastClr", "FFFFFF")])?;
    w.end()?;
    for (name, rgb) in SCHEME_COLORS {
        w.start(name, &[])?;
        w.empty("a:srgbClr", &[("val", rgb)])?;
        w.end()?;
    }
    w.end()?;

    w.start("a:fontScheme", &[("name", "Office")])?;
    for font in ["a:majorFont", "a:minorFont"] {
        w.start(font, &[])?;
        w.empty("a:latin", &[("typeface", "Calibri")])?;
        w.empty("a:ea", &[("typeface", "")])?;
        w.empty("a:cs", &[("typeface", "")])?;
        w.end()?;
    }
    w.end()?;

    w.start("a:fmtScheme", &[("name", "Office")])?;
    w.start("a:fillStyleLst", &[])?;
    for _ in 0..3 {
        write_placeholder_fill(&mut w)?;
    }
    w.end()?;
    w.start("a:lnStyleLst", &[])?;
    for width in ["9525", "25400", "38100"] {
        w.start("a:ln", &[("w", width), ("cap", "flat"), ("cmpd", "sng"), ("algn", "ctr")])?;
        write_placeholder_fill(&mut w)?;
        w.empty("a:prstDash", &[("val", "solid")])?;
        w.end()?;
    }
    w.end()?;
    w.start("a:effectStyleLst", &[])?;
    for _ in 0..3 {
        w.start("a:effectStyle", &[])?;
        w.empty("a:effectLst", &[])?;
        w.end()?;
    }
    w.end()?;
    w.start("a:bgFillStyleLst", &[])?;
    for _ in 0..3 {
        write_placeholder_fill(&mut w)?;
    }
    w.end()?;
    w.end()?; // fmtScheme

    w.end()?; // themeElements
    w.empty("a:objectDefaults", &[])?;
    w.empty("a:extraClrSchemeLst", &[])?;
    w.end()?;
    Ok(w.finish()?)
}

/// Generate slideMaster1.xml content.
///
/// `layout_r_id` is the master's relationship id for its only layout.
pub fn slide_master_xml(settings: &PresentationSettings, layout_r_id: &str) -> Result<String> {
    let mut buf = itoa::Buffer::new();

    let mut w = XmlWriter::with_declaration()?;
    w.start(
        "p:sldMaster",
        &[
            ("xmlns:a", namespace::DML_MAIN),
            ("xmlns:r", namespace::OFC_RELATIONSHIPS),
            ("xmlns:p", namespace::PML_MAIN),
        ],
    )?;
    w.start("p:cSld", &[])?;
    w.start("p:bg", &[])?;
    w.start("p:bgRef", &[("idx", "1001")])?;
    w.empty("a:schemeClr", &[("val", "bg1")])?;
    w.end()?;
    w.end()?;

    w.start("p:spTree", &[])?;
    shape::write_group_header(&mut w)?;
    shape::write_placeholder(
        &mut w,
        2,
        "Title Placeholder 1",
        Placeholder {
            kind: Some("title"),
            idx: None,
        },
        Some(title_geometry(settings)),
        &["Click to edit Master title style"],
    )?;
    shape::write_placeholder(
        &mut w,
        3,
        "Text Placeholder 2",
        Placeholder {
            kind: Some("body"),
            idx: Some(1),
        },
        Some(body_geometry(settings)),
        &["Click to edit Master text styles"],
    )?;
    w.end()?; // spTree
    w.end()?; // cSld

    w.empty("p:clrMap", &COLOR_MAP)?;

    w.start("p:sldLayoutIdLst", &[])?;
    w.empty(
        "p:sldLayoutId",
        &[("id", buf.format(SLIDE_LAYOUT_ID)), ("r:id", layout_r_id)],
    )?;
    w.end()?;

    w.start("p:txStyles", &[])?;
    w.start("p:titleStyle", &[])?;
    w.start("a:lvl1pPr", &[("algn", "ctr")])?;
    w.empty("a:defRPr", &[("sz", "4400")])?;
    w.end()?;
    w.end()?;
    w.start("p:bodyStyle", &[])?;
    w.start("a:lvl1pPr", &[("marL", "342900"), ("indent", "-342900")])?;
    w.empty("a:buFont", &[("typeface", "Arial")])?;
    w.empty("a:buChar", &[("char", "\u{2022}")])?;
    w.empty("a:defRPr", &[("sz", "3200")])?;
    w.end()?;
    w.end()?;
    w.start("p:otherStyle", &[])?;
    w.start("a:defPPr", &[])?;
    w.empty("a:defRPr", &[("lang", "en-US")])?;
    w.end()?;
    w.end()?;
    w.end()?; // txStyles

    w.end()?;
    Ok(w.finish()?)
}

/// Generate slideLayout1.xml content (Title and Content).
pub fn slide_layout_xml() -> Result<String> {
    let no_text: &[&str] = &[];

    let mut w = XmlWriter::with_declaration()?;
    w.start(
        "p:sldLayout",
        &[
            ("xmlns:a", namespace::DML_MAIN),
            ("xmlns:r", namespace::OFC_RELATIONSHIPS),
            ("xmlns:p", namespace::PML_MAIN),
            ("type", "obj"),
            ("preserve", "1"),
        ],
    )?;
    w.start("p:cSld", &[("name", "Title and Content")])?;
    w.start("p:spTree", &[])?;
    shape::write_group_header(&mut w)?;
    shape::write_placeholder(
        &mut w,
        2,
        "Title 1",
        Placeholder {
            kind: Some("title"),
            idx: None,
        },
        None,
        no_text,
    )?;
    shape::write_placeholder(&mut w, 3, "Content Placeholder 2", Placeholder::body(), None, no_text)?;
    w.end()?; // spTree
    w.end()?; // cSld
    w.start("p:clrMapOvr", &[])?;
    w.empty("a:masterClrMapping", &[])?;
    w.end()?;
    w.end()?;
    Ok(w.finish()?)
}

fn write_placeholder_fill(w: &mut XmlWriter) -> Result<()> {
    w.start("a:solidFill", &[])?;
    w.empty("a:schemeClr", &[("val", "phClr")])?;
    w.end()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme() {
        let xml = theme_xml().unwrap();
        assert!(xml.contains(r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">"#));
        assert_eq!(xml.matches("<a:effectStyle>").count(), 3);
        assert!(xml.contains(r#"<a:accent6><a:srgbClr val="F79646"/></a:accent6>"#));
    }

    #[test]
    fn test_master_references_layout() {
        let xml = slide_master_xml(&PresentationSettings::default(), "rId1").unwrap();
        assert!(xml.contains(r#"<p:sldLayoutId id="2147483649" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains(r#"<p:ph type="body" idx="1"/>"#));
        assert!(xml.contains(r#"<p:clrMap bg1="lt1" tx1="dk1""#));
    }

    #[test]
    fn test_master_geometry_follows_slide_size() {
        let settings = PresentationSettings::default();
        let xml = slide_master_xml(&settings, "rId1").unwrap();
        let title = title_geometry(&settings);
        assert_eq!(title, Geometry::new(457200, 274320, 8229600, 1143000));
        assert!(xml.contains(r#"<a:off x="457200" y="274320"/>"#));
    }

    #[test]
    fn test_layout() {
        let xml = slide_layout_xml().unwrap();
        assert!(xml.contains(r#"type="obj""#));
        assert!(xml.contains(r#"<p:ph idx="1"/>"#));
        assert!(xml.contains("<a:masterClrMapping/>"));
    }
}
