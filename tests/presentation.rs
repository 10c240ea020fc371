//! End-to-end builds read back through the `zip` crate.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use slidepack::ooxml::DocumentProperties;
use slidepack::ooxml::opc::Relationships;
use slidepack::ooxml::pptx::{
    Deck, Geometry, MediaLibrary, PresentationSettings, Reveal, SlideSpec, TitleStyle,
};
use slidepack::{OoxmlError, PackageAssembler, build_presentation, write_presentation};
use std::io::{Cursor, Read};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];

/// Archive contents in member order.
fn read_archive(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            file.read_to_end(&mut content).unwrap();
            (file.name().to_string(), content)
        })
        .collect()
}

fn member<'a>(members: &'a [(String, Vec<u8>)], name: &str) -> &'a str {
    let (_, content) = members
        .iter()
        .find(|(n, _)| n == name)
        .unwrap_or_else(|| panic!("missing member {name}"));
    std::str::from_utf8(content).unwrap()
}

fn scenario() -> (Deck, MediaLibrary) {
    let mut media = MediaLibrary::new();
    media.insert("background", PNG.to_vec(), "png").unwrap();
    media.insert_detected("picture", JPEG.to_vec()).unwrap();

    let mut deck = Deck::new(vec![
        SlideSpec::new()
            .background("background")
            .title("My Presentation", TitleStyle::Centered),
        SlideSpec::new()
            .background("background")
            .title("First page", TitleStyle::Heading)
            .bullets(["One", "Two", "Three", "Four"]),
        SlideSpec::new()
            .background("background")
            .title("the end", TitleStyle::Heading)
            .picture("picture", Geometry::new(914_400, 1_828_800, 3_657_600, 2_743_200)),
    ]);
    let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    deck.properties = DocumentProperties::new()
        .title("Scenario")
        .creator("slidepack")
        .created(stamp)
        .modified(stamp);
    (deck, media)
}

#[test]
fn scenario_relationships_and_timing() {
    let (deck, media) = scenario();
    let members = read_archive(&build_presentation(&deck, &media).unwrap());

    let slides: Vec<&str> = members
        .iter()
        .map(|(name, _)| name.as_str())
        .filter(|name| name.starts_with("ppt/slides/slide"))
        .collect();
    assert_eq!(
        slides,
        ["ppt/slides/slide1.xml", "ppt/slides/slide2.xml", "ppt/slides/slide3.xml"]
    );

    let slide2_rels = member(&members, "ppt/slides/_rels/slide2.xml.rels");
    assert_eq!(slide2_rels.matches("<Relationship ").count(), 1);
    assert!(slide2_rels.contains(r#"Target="../media/image1.png""#));

    let slide3_rels = member(&members, "ppt/slides/_rels/slide3.xml.rels");
    assert_eq!(slide3_rels.matches("<Relationship ").count(), 2);
    assert!(slide3_rels.contains(r#"Id="rId2""#));
    assert!(slide3_rels.contains(r#"Target="../media/image2.jpeg""#));

    let slide2 = member(&members, "ppt/slides/slide2.xml");
    let ranges: Vec<&str> = slide2
        .match_indices("<p:pRg ")
        .map(|(i, _)| {
            let len = slide2[i..].find("/>").unwrap() + 2;
            &slide2[i..i + len]
        })
        .collect();
    assert_eq!(
        ranges,
        [
            r#"<p:pRg st="0" end="0"/>"#,
            r#"<p:pRg st="1" end="1"/>"#,
            r#"<p:pRg st="2" end="2"/>"#,
            r#"<p:pRg st="3" end="3"/>"#,
        ]
    );
    assert!(!member(&members, "ppt/slides/slide1.xml").contains("<p:timing>"));
    assert!(!member(&members, "ppt/slides/slide3.xml").contains("<p:timing>"));
}

#[test]
fn archive_layout() {
    let (deck, media) = scenario();
    let members = read_archive(&build_presentation(&deck, &media).unwrap());
    let names: Vec<&str> = members.iter().map(|(name, _)| name.as_str()).collect();

    assert_eq!(names[0], "[Content_Types].xml");
    assert_eq!(names[1], "_rels/.rels");
    for required in [
        "docProps/core.xml",
        "docProps/app.xml",
        "ppt/presentation.xml",
        "ppt/_rels/presentation.xml.rels",
        "ppt/slideMasters/slideMaster1.xml",
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        "ppt/slideLayouts/slideLayout1.xml",
        "ppt/theme/theme1.xml",
        "ppt/media/image1.png",
        "ppt/media/image2.jpeg",
    ] {
        assert!(names.contains(&required), "missing {required}");
    }
    // One media part per asset, even though the background is used three times.
    assert_eq!(names.iter().filter(|n| n.starts_with("ppt/media/")).count(), 2);
    assert!(!names.iter().any(|n| n.starts_with('/')));

    let content_types = member(&members, "[Content_Types].xml");
    assert!(content_types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
    assert!(content_types.contains(r#"<Default Extension="jpeg" ContentType="image/jpeg"/>"#));
    assert_eq!(
        content_types
            .matches("application/vnd.openxmlformats-officedocument.presentationml.slide+xml")
            .count(),
        3
    );

    let pres = member(&members, "ppt/presentation.xml");
    let ids: Vec<usize> = ["256", "257", "258"]
        .iter()
        .map(|id| pres.find(&format!(r#"<p:sldId id="{id}""#)).unwrap())
        .collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    let core = member(&members, "docProps/core.xml");
    assert!(core.contains("<dc:title>Scenario</dc:title>"));
    assert!(core.contains("2024-05-01T12:00:00Z"));
}

#[test]
fn builds_are_byte_identical() {
    let (deck, media) = scenario();
    let first = build_presentation(&deck, &media).unwrap();
    let second = build_presentation(&deck, &media).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_asset_fails_without_output() {
    let (mut deck, media) = scenario();
    deck.slides.push(SlideSpec::new().background("nowhere"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.pptx");
    let err = write_presentation(&path, &deck, &media).unwrap_err();
    assert!(matches!(err, OoxmlError::MissingAsset(name) if name == "nowhere"));
    assert!(!path.exists());
}

#[test]
fn yaml_deck_round_trip_to_file() {
    let deck = Deck::from_yaml(
        r#"
properties:
  title: From YAML
slides:
  - shapes:
      - kind: background
        asset: bg
      - kind: title
        text: Hello
        style: centered
  - shapes:
      - kind: title
        text: Points
      - kind: bullets
        items: [alpha, beta]
"#,
    )
    .unwrap();
    let mut media = MediaLibrary::new();
    media.insert("bg", PNG.to_vec(), "png").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("yaml.pptx");
    write_presentation(&path, &deck, &media).unwrap();

    let members = read_archive(&std::fs::read(&path).unwrap());
    let slide2 = member(&members, "ppt/slides/slide2.xml");
    assert_eq!(slide2.matches("<p:pRg ").count(), 2);
    assert!(member(&members, "docProps/app.xml").contains("<vt:lpstr>Points</vt:lpstr>"));
    // A slide without media gets no relationships part.
    assert!(!members.iter().any(|(n, _)| n == "ppt/slides/_rels/slide2.xml.rels"));
}

#[test]
fn yaml_pictures_in_flow_and_block_style() {
    let deck = Deck::from_yaml(
        r#"
slides:
  - shapes:
      - kind: picture
        asset: photo
        geometry: { x: 914400, y: 1828800, cx: 3657600, cy: 2743200 }
  - shapes:
      - kind: picture
        asset: photo
        description: Same photo
        geometry:
          x: 1
          y: 2
          cx: 3
          cy: 4
"#,
    )
    .unwrap();
    let mut media = MediaLibrary::new();
    media.insert("photo", JPEG.to_vec(), "jpeg").unwrap();

    let members = read_archive(&build_presentation(&deck, &media).unwrap());
    let slide1 = member(&members, "ppt/slides/slide1.xml");
    assert!(slide1.contains(r#"<a:off x="914400" y="1828800"/>"#));
    assert!(slide1.contains(r#"<a:ext cx="3657600" cy="2743200"/>"#));

    let slide2 = member(&members, "ppt/slides/slide2.xml");
    assert!(slide2.contains(r#"<a:off x="1" y="2"/>"#));
    assert!(slide2.contains(r#"<a:ext cx="3" cy="4"/>"#));
    assert!(slide2.contains(r#"descr="Same photo""#));

    for rels in ["ppt/slides/_rels/slide1.xml.rels", "ppt/slides/_rels/slide2.xml.rels"] {
        assert!(member(&members, rels).contains(r#"Target="../media/image1.jpeg""#));
    }
}

/// Ids of a registry in allocation order.
fn r_ids(rels: &Relationships) -> Vec<String> {
    rels.iter().map(|r| r.r_id().to_string()).collect()
}

fn slide_strategy() -> impl Strategy<Value = SlideSpec> {
    (
        any::<bool>(),
        prop::option::of("[A-Za-z ]{1,12}"),
        prop::option::of((prop::collection::vec("[a-z]{1,6}", 0..5), any::<bool>())),
        prop::collection::vec(prop::sample::select(vec!["bg", "photo"]), 0..4),
    )
        .prop_map(|(background, title, bullets, pictures)| {
            let mut slide = SlideSpec::new();
            if background {
                slide = slide.background("bg");
            }
            if let Some(title) = title {
                slide = slide.title(&title, TitleStyle::Heading);
            }
            if let Some((items, by_paragraph)) = bullets {
                let reveal = if by_paragraph { Reveal::ByParagraph } else { Reveal::AllAtOnce };
                slide = slide.bullets_with(items, reveal);
            }
            for (i, asset) in pictures.into_iter().enumerate() {
                let offset = i as i64 * 100_000;
                slide = slide.picture(asset, Geometry::new(offset, offset, 914_400, 914_400));
            }
            slide
        })
}

proptest! {
    #[test]
    fn relationship_ids_are_gap_free_in_every_registry(
        slides in prop::collection::vec(slide_strategy(), 0..6),
        link_slide_layout in any::<bool>(),
    ) {
        let mut media = MediaLibrary::new();
        media.insert("bg", PNG.to_vec(), "png").unwrap();
        media.insert("photo", JPEG.to_vec(), "jpeg").unwrap();
        let settings = PresentationSettings {
            link_slide_layout,
            ..PresentationSettings::default()
        };
        let package = PackageAssembler::new(settings)
            .assemble(&Deck::new(slides), &media)
            .unwrap();

        let registries = std::iter::once(package.rels())
            .chain(package.iter_parts().map(|part| part.rels()));
        for rels in registries {
            let expected: Vec<String> = (1..=rels.len()).map(|n| format!("rId{n}")).collect();
            prop_assert_eq!(r_ids(rels), expected);
        }
    }
}
