//! Presentation package assembly.
//!
//! Turns a [`Deck`] and its [`MediaLibrary`] into a complete, validated-on-
//! write [`OpcPackage`]: scaffolding parts, one part per slide, embedded media,
//! and every relationship and content type entry linking them.

use crate::ooxml::common::properties::AppProperties;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use crate::ooxml::opc::rel::Relationships;
use crate::ooxml::pptx::deck::{Deck, PresentationSettings, ShapeSpec, SlideSpec};
use crate::ooxml::pptx::media::{EmbeddedMedia, MediaLibrary};
use crate::ooxml::pptx::template;
use crate::ooxml::pptx::writer::pres::PresentationPart;
use crate::ooxml::pptx::writer::relmap::RelationshipMapper;
use crate::ooxml::pptx::writer::slide::SlideBuilder;
use tracing::debug;

const THEME_URI: &str = "/ppt/theme/theme1.xml";
const SLIDE_MASTER_URI: &str = "/ppt/slideMasters/slideMaster1.xml";
const SLIDE_LAYOUT_URI: &str = "/ppt/slideLayouts/slideLayout1.xml";
const PRESENTATION_URI: &str = "/ppt/presentation.xml";
const CORE_PROPS_URI: &str = "/docProps/core.xml";
const APP_PROPS_URI: &str = "/docProps/app.xml";

/// Partnames of the scaffolding parts every slide refers to.
struct Scaffolding {
    theme: PackURI,
    master: PackURI,
    layout: PackURI,
}

/// Builds presentation packages.
///
/// Each call to [`assemble`](Self::assemble) works on a fresh package, so one
/// assembler can be reused for any number of independent builds.
#[derive(Debug, Clone, Default)]
pub struct PackageAssembler {
    settings: PresentationSettings,
}

impl PackageAssembler {
    /// Create an assembler. These settings take precedence over the ones
    /// carried by the deck.
    pub fn new(settings: PresentationSettings) -> Self {
        Self { settings }
    }

    /// Create an assembler using the deck's own settings.
    pub fn for_deck(deck: &Deck) -> Self {
        Self::new(deck.settings.clone())
    }

    /// Get the settings used for assembly.
    pub fn settings(&self) -> &PresentationSettings {
        &self.settings
    }

    /// Assemble the package for a deck.
    ///
    /// Slides appear in the presentation in deck order. Each distinct asset
    /// name is embedded once, the first time a slide uses it; every slide
    /// using it gets its own relationship to that media part.
    pub fn assemble(&self, deck: &Deck, media: &MediaLibrary) -> Result<OpcPackage> {
        self.settings.validate()?;
        let mut package = OpcPackage::new();

        let scaffolding = self.add_scaffolding(&mut package)?;

        let mut embedded = EmbeddedMedia::new();
        let mut slide_uris = Vec::with_capacity(deck.slides.len());
        for (index, slide) in deck.slides.iter().enumerate() {
            let uri = self.add_slide(
                &mut package,
                &mut embedded,
                media,
                &scaffolding,
                index + 1,
                slide,
            )?;
            slide_uris.push(uri);
        }

        let presentation = self.add_presentation(&mut package, &scaffolding, &slide_uris)?;
        package.relate_to(&presentation, rt::OFFICE_DOCUMENT);

        let core = PackURI::new(CORE_PROPS_URI)?;
        package.add_part_with_override(
            Part::xml(core.clone(), deck.properties.to_xml()?),
            ct::OPC_CORE_PROPERTIES,
        )?;
        package.relate_to(&core, rt::CORE_PROPERTIES);

        let titles = deck
            .slides
            .iter()
            .map(|slide| slide.title_text().unwrap_or_default().to_string())
            .collect();
        let app = PackURI::new(APP_PROPS_URI)?;
        package.add_part_with_override(
            Part::xml(app.clone(), AppProperties::new(template::THEME_NAME, titles).to_xml()?),
            ct::OFC_EXTENDED_PROPERTIES,
        )?;
        package.relate_to(&app, rt::EXTENDED_PROPERTIES);

        debug!(
            slides = slide_uris.len(),
            media = embedded.len(),
            parts = package.part_count(),
            "assembled presentation"
        );
        Ok(package)
    }

    /// Assemble the package for a deck and serialize it.
    pub fn build(&self, deck: &Deck, media: &MediaLibrary) -> Result<Vec<u8>> {
        let package = self.assemble(deck, media)?;
        Ok(PackageWriter::to_bytes(&package)?)
    }

    /// Add theme, slide master and slide layout, wired to each other.
    fn add_scaffolding(&self, package: &mut OpcPackage) -> Result<Scaffolding> {
        let theme = PackURI::new(THEME_URI)?;
        let master = PackURI::new(SLIDE_MASTER_URI)?;
        let layout = PackURI::new(SLIDE_LAYOUT_URI)?;

        package.add_part_with_override(Part::xml(theme.clone(), template::theme_xml()?), ct::OFC_THEME)?;

        let mut master_rels = Relationships::for_source(&master);
        let layout_r_id = master_rels.relate_to(&layout, rt::SLIDE_LAYOUT);
        master_rels.relate_to(&theme, rt::THEME);
        let master_xml = template::slide_master_xml(&self.settings, &layout_r_id)?;
        package.add_part_with_override(
            Part::xml(master.clone(), master_xml).with_rels(master_rels),
            ct::PML_SLIDE_MASTER,
        )?;

        let mut layout_rels = Relationships::for_source(&layout);
        layout_rels.relate_to(&master, rt::SLIDE_MASTER);
        package.add_part_with_override(
            Part::xml(layout.clone(), template::slide_layout_xml()?).with_rels(layout_rels),
            ct::PML_SLIDE_LAYOUT,
        )?;

        Ok(Scaffolding {
            theme,
            master,
            layout,
        })
    }

    /// Add slide `number` (1-based) with its media relationships.
    fn add_slide(
        &self,
        package: &mut OpcPackage,
        embedded: &mut EmbeddedMedia,
        media: &MediaLibrary,
        scaffolding: &Scaffolding,
        number: usize,
        slide: &SlideSpec,
    ) -> Result<PackURI> {
        let uri = PackURI::new(format!("/ppt/slides/slide{}.xml", number))?;
        let mut rels = Relationships::for_source(&uri);
        let mut map = RelationshipMapper::new();

        let mut picture_index = 0;
        for shape in &slide.shapes {
            match shape {
                ShapeSpec::Background { asset } => {
                    let target = embedded.embed(package, media, asset)?;
                    map.add_background(rels.relate_to(&target, rt::IMAGE));
                },
                ShapeSpec::Picture { asset, .. } => {
                    let target = embedded.embed(package, media, asset)?;
                    map.add_image(picture_index, rels.relate_to(&target, rt::IMAGE));
                    picture_index += 1;
                },
                ShapeSpec::Title { .. } | ShapeSpec::Bullets { .. } => {},
            }
        }

        if self.settings.link_slide_layout {
            rels.relate_to(&scaffolding.layout, rt::SLIDE_LAYOUT);
        }

        let content = SlideBuilder::new(&self.settings).build(slide, &map)?;
        debug!(
            slide = number,
            shapes = content.shape_count,
            rels = rels.len(),
            timing_steps = content.timing_steps.len(),
            "built slide"
        );

        package.add_part_with_override(
            Part::xml(uri.clone(), content.xml).with_rels(rels),
            ct::PML_SLIDE,
        )?;
        Ok(uri)
    }

    /// Add the presentation part, relating master, slides (in order) and theme.
    fn add_presentation(
        &self,
        package: &mut OpcPackage,
        scaffolding: &Scaffolding,
        slide_uris: &[PackURI],
    ) -> Result<PackURI> {
        let uri = PackURI::new(PRESENTATION_URI)?;
        let mut rels = Relationships::for_source(&uri);

        let master_r_id = rels.relate_to(&scaffolding.master, rt::SLIDE_MASTER);
        let slide_r_ids: Vec<String> = slide_uris
            .iter()
            .map(|slide| rels.relate_to(slide, rt::SLIDE))
            .collect();
        rels.relate_to(&scaffolding.theme, rt::THEME);

        let xml = PresentationPart {
            settings: &self.settings,
            master_r_id: &master_r_id,
            slide_r_ids: &slide_r_ids,
        }
        .to_xml()?;

        package.add_part_with_override(
            Part::xml(uri.clone(), xml).with_rels(rels),
            ct::PML_PRESENTATION_MAIN,
        )?;
        Ok(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::error::OoxmlError;
    use crate::ooxml::opc::error::OpcError;
    use crate::ooxml::pptx::deck::{Geometry, TitleStyle};
    use proptest::prelude::*;

    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn library() -> MediaLibrary {
        let mut media = MediaLibrary::new();
        media.insert("bg", PNG.to_vec(), "png").unwrap();
        media.insert("photo", PNG.to_vec(), "png").unwrap();
        media
    }

    fn uri(s: &str) -> PackURI {
        PackURI::new(s).unwrap()
    }

    fn part_xml<'a>(package: &'a OpcPackage, name: &str) -> &'a str {
        package.get_part(&uri(name)).unwrap().payload().as_xml().unwrap()
    }

    #[test]
    fn test_scaffolding_wiring() {
        let package = PackageAssembler::default()
            .assemble(&Deck::default(), &MediaLibrary::new())
            .unwrap();

        let master = package.get_part(&uri(SLIDE_MASTER_URI)).unwrap();
        let targets: Vec<&str> = master.rels().iter().map(|r| r.target_ref()).collect();
        assert_eq!(targets, ["../slideLayouts/slideLayout1.xml", "../theme/theme1.xml"]);

        let layout = package.get_part(&uri(SLIDE_LAYOUT_URI)).unwrap();
        assert_eq!(
            layout.rels().get("rId1").unwrap().target_ref(),
            "../slideMasters/slideMaster1.xml"
        );

        let pkg_rels: Vec<&str> = package.rels().iter().map(|r| r.target_ref()).collect();
        assert_eq!(pkg_rels, ["ppt/presentation.xml", "docProps/core.xml", "docProps/app.xml"]);
        assert_eq!(package.main_document_part().unwrap().partname().as_str(), PRESENTATION_URI);
        assert!(PackageWriter::validate(&package).is_ok());
    }

    #[test]
    fn test_presentation_relationships() {
        let deck = Deck::new(vec![SlideSpec::new(), SlideSpec::new()]);
        let package = PackageAssembler::default()
            .assemble(&deck, &MediaLibrary::new())
            .unwrap();

        let pres = package.get_part(&uri(PRESENTATION_URI)).unwrap();
        let rels: Vec<(&str, &str)> = pres
            .rels()
            .iter()
            .map(|r| (r.r_id(), r.target_ref()))
            .collect();
        assert_eq!(
            rels,
            [
                ("rId1", "slideMasters/slideMaster1.xml"),
                ("rId2", "slides/slide1.xml"),
                ("rId3", "slides/slide2.xml"),
                ("rId4", "theme/theme1.xml"),
            ]
        );
    }

    #[test]
    fn test_media_is_embedded_once() {
        let deck = Deck::new(vec![
            SlideSpec::new().background("bg"),
            SlideSpec::new().background("bg").picture("bg", Geometry::default()),
        ]);
        let package = PackageAssembler::default().assemble(&deck, &library()).unwrap();

        let media: Vec<&str> = package
            .iter_parts()
            .map(|p| p.partname().as_str())
            .filter(|name| name.starts_with("/ppt/media/"))
            .collect();
        assert_eq!(media, ["/ppt/media/image1.png"]);

        let slide2 = package.get_part(&uri("/ppt/slides/slide2.xml")).unwrap();
        assert_eq!(slide2.rels().len(), 2);
        assert!(slide2.rels().iter().all(|r| r.target_ref() == "../media/image1.png"));
    }

    #[test]
    fn test_media_numbering_follows_first_use() {
        let deck = Deck::new(vec![
            SlideSpec::new().picture("photo", Geometry::default()),
            SlideSpec::new().background("bg"),
        ]);
        let package = PackageAssembler::default().assemble(&deck, &library()).unwrap();
        let slide2 = package.get_part(&uri("/ppt/slides/slide2.xml")).unwrap();
        assert_eq!(slide2.rels().get("rId1").unwrap().target_ref(), "../media/image2.png");
    }

    #[test]
    fn test_link_slide_layout() {
        let settings = PresentationSettings {
            link_slide_layout: true,
            ..PresentationSettings::default()
        };
        let deck = Deck::new(vec![SlideSpec::new().background("bg")]);
        let package = PackageAssembler::new(settings).assemble(&deck, &library()).unwrap();

        let slide = package.get_part(&uri("/ppt/slides/slide1.xml")).unwrap();
        let rels: Vec<(&str, &str)> = slide
            .rels()
            .iter()
            .map(|r| (r.r_id(), r.reltype()))
            .collect();
        assert_eq!(rels, [("rId1", rt::IMAGE), ("rId2", rt::SLIDE_LAYOUT)]);
    }

    #[test]
    fn test_missing_asset() {
        let deck = Deck::new(vec![SlideSpec::new().picture("nope", Geometry::default())]);
        let err = PackageAssembler::default()
            .assemble(&deck, &library())
            .unwrap_err();
        assert!(matches!(err, OoxmlError::MissingAsset(name) if name == "nope"));
    }

    #[test]
    fn test_media_extension_conflict() {
        let deck = Deck::new(vec![SlideSpec::new().background("a")]);

        // Unknown extensions are stored as octet-stream, which clashes with
        // the package's own `xml` Default.
        let mut odd = MediaLibrary::new();
        odd.insert("a", b"<svg/>".to_vec(), "xml").unwrap();
        let err = PackageAssembler::default().assemble(&deck, &odd).unwrap_err();
        assert!(matches!(
            err,
            OoxmlError::Opc(OpcError::ContentTypeConflict { ref key, .. }) if key == "xml"
        ));
    }

    #[test]
    fn test_oversized_slide_is_rejected_before_scaffolding() {
        let settings = PresentationSettings {
            slide_width: i64::MAX,
            ..PresentationSettings::default()
        };
        let deck = Deck::new(vec![SlideSpec::new().title("Big", TitleStyle::Heading)]);
        let err = PackageAssembler::new(settings)
            .assemble(&deck, &MediaLibrary::new())
            .unwrap_err();
        assert!(matches!(err, OoxmlError::InvalidFormat(_)));
    }

    #[test]
    fn test_yaml_slide_size_out_of_range() {
        let yaml = "settings:\n  slide_width: 9223372036854775807\nslides: []\n";
        let deck = Deck::from_yaml(yaml).unwrap();
        let err = PackageAssembler::for_deck(&deck)
            .build(&deck, &MediaLibrary::new())
            .unwrap_err();
        assert!(matches!(err, OoxmlError::InvalidFormat(_)));
    }

    #[test]
    fn test_app_properties_list_titles() {
        let deck = Deck::new(vec![
            SlideSpec::new().title("Intro", TitleStyle::Centered),
            SlideSpec::new(),
        ]);
        let package = PackageAssembler::default()
            .assemble(&deck, &MediaLibrary::new())
            .unwrap();
        let app = part_xml(&package, APP_PROPS_URI);
        assert!(app.contains("<Slides>2</Slides>"));
        assert!(app.contains("<vt:lpstr>Intro</vt:lpstr>"));
    }

    proptest! {
        #[test]
        fn prop_slide_order_matches_input(titles in prop::collection::vec("[a-z]{1,8}", 0..12)) {
            let slides = titles
                .iter()
                .map(|t| SlideSpec::new().title(t, TitleStyle::Heading))
                .collect();
            let package = PackageAssembler::default()
                .assemble(&Deck::new(slides), &MediaLibrary::new())
                .unwrap();

            let pres = part_xml(&package, PRESENTATION_URI);
            let pres_part = package.get_part(&uri(PRESENTATION_URI)).unwrap();
            for (i, title) in titles.iter().enumerate() {
                let sld_id = format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 2);
                prop_assert!(pres.contains(&sld_id));

                let target = pres_part.rels().get(&format!("rId{}", i + 2)).unwrap().target_ref();
                prop_assert_eq!(target, format!("slides/slide{}.xml", i + 1));

                let slide = part_xml(&package, &format!("/ppt/slides/slide{}.xml", i + 1));
                let expected_title = format!("<a:t>{}</a:t>", title);
                prop_assert!(slide.contains(&expected_title));
            }
            prop_assert_eq!(pres.matches("<p:sldId ").count(), titles.len());
        }
    }
}
