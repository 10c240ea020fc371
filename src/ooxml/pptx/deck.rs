//! Declarative slide deck descriptions.
//!
//! A [`Deck`] is the input of a build: presentation settings, document
//! properties and the ordered list of slides, each an ordered list of shapes.
//! Decks can be built in code or loaded from YAML:
//!
//! ```
//! use slidepack::ooxml::pptx::deck::{Deck, ShapeSpec};
//!
//! let deck = Deck::from_yaml(r#"
//! slides:
//!   - shapes:
//!       - kind: title
//!         text: Quarterly review
//!         style: centered
//!   - shapes:
//!       - kind: bullets
//!         items: [Revenue, Costs]
//! "#)?;
//! assert_eq!(deck.slides.len(), 2);
//! assert!(matches!(deck.slides[1].shapes[0], ShapeSpec::Bullets { .. }));
//! # Ok::<(), slidepack::ooxml::error::OoxmlError>(())
//! ```

use crate::ooxml::common::properties::DocumentProperties;
use crate::ooxml::error::{OoxmlError, Result};
use serde::Deserialize;
use std::path::Path;

/// Default slide width in EMU (10 inches).
pub const DEFAULT_SLIDE_WIDTH: i64 = 9_144_000;
/// Default slide height in EMU (7.5 inches).
pub const DEFAULT_SLIDE_HEIGHT: i64 = 6_858_000;
/// Smallest slide edge PowerPoint accepts in EMU (1 inch).
pub const MIN_SLIDE_SIZE: i64 = 914_400;
/// Largest slide edge PowerPoint accepts in EMU (56 inches).
pub const MAX_SLIDE_SIZE: i64 = 51_206_400;
/// Default duration of one paragraph reveal.
pub const DEFAULT_REVEAL_DURATION_MS: u32 = 500;

/// Presentation-wide build settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PresentationSettings {
    /// Slide width in EMU
    pub slide_width: i64,
    /// Slide height in EMU
    pub slide_height: i64,
    /// Duration of each paragraph reveal step in milliseconds
    pub reveal_duration_ms: u32,
    /// Relate every slide to the slide layout, after its media relationships
    pub link_slide_layout: bool,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            slide_width: DEFAULT_SLIDE_WIDTH,
            slide_height: DEFAULT_SLIDE_HEIGHT,
            reveal_duration_ms: DEFAULT_REVEAL_DURATION_MS,
            link_slide_layout: false,
        }
    }
}

impl PresentationSettings {
    /// Check that both slide edges lie in `MIN_SLIDE_SIZE..=MAX_SLIDE_SIZE`.
    pub fn validate(&self) -> Result<()> {
        let range = MIN_SLIDE_SIZE..=MAX_SLIDE_SIZE;
        if !range.contains(&self.slide_width) || !range.contains(&self.slide_height) {
            return Err(OoxmlError::InvalidFormat(format!(
                "invalid slide size {}x{}: each edge must be {}..={} EMU",
                self.slide_width, self.slide_height, MIN_SLIDE_SIZE, MAX_SLIDE_SIZE
            )));
        }
        Ok(())
    }
}

/// Position and size of a shape in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Geometry {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Geometry {
    /// Create a new geometry.
    pub fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }
}

/// Placeholder flavour of a title shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleStyle {
    /// Centered title, as on a title slide (`ctrTitle`)
    Centered,
    /// Regular slide heading (`title`)
    #[default]
    Heading,
}

impl TitleStyle {
    /// Placeholder type attribute value.
    pub fn placeholder_type(&self) -> &'static str {
        match self {
            TitleStyle::Centered => "ctrTitle",
            TitleStyle::Heading => "title",
        }
    }
}

/// How a bullet list appears during the slide show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reveal {
    /// One click per paragraph, in list order
    #[default]
    ByParagraph,
    /// The whole list is visible when the slide appears
    AllAtOnce,
}

/// One visual element of a slide.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    /// Full-slide background picture
    Background { asset: String },
    /// Title text
    Title {
        text: String,
        #[serde(default)]
        style: TitleStyle,
    },
    /// Bulleted body text, one paragraph per item
    Bullets {
        items: Vec<String>,
        #[serde(default)]
        reveal: Reveal,
    },
    /// Picture placed at the given geometry
    Picture {
        asset: String,
        geometry: Geometry,
        #[serde(default)]
        description: Option<String>,
    },
}

impl ShapeSpec {
    /// Name of the media asset this shape embeds, if any.
    pub fn asset(&self) -> Option<&str> {
        match self {
            ShapeSpec::Background { asset } | ShapeSpec::Picture { asset, .. } => {
                Some(asset.as_str())
            },
            ShapeSpec::Title { .. } | ShapeSpec::Bullets { .. } => None,
        }
    }
}

/// Ordered shapes of one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SlideSpec {
    #[serde(default)]
    pub shapes: Vec<ShapeSpec>,
}

impl SlideSpec {
    /// Create an empty slide.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a background picture.
    pub fn background(mut self, asset: &str) -> Self {
        self.shapes.push(ShapeSpec::Background {
            asset: asset.to_string(),
        });
        self
    }

    /// Add a title.
    pub fn title(mut self, text: &str, style: TitleStyle) -> Self {
        self.shapes.push(ShapeSpec::Title {
            text: text.to_string(),
            style,
        });
        self
    }

    /// Add a bullet list revealed one paragraph at a time.
    pub fn bullets<I, S>(self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets_with(items, Reveal::ByParagraph)
    }

    /// Add a bullet list with an explicit reveal mode.
    pub fn bullets_with<I, S>(mut self, items: I, reveal: Reveal) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shapes.push(ShapeSpec::Bullets {
            items: items.into_iter().map(Into::into).collect(),
            reveal,
        });
        self
    }

    /// Add a picture.
    pub fn picture(mut self, asset: &str, geometry: Geometry) -> Self {
        self.shapes.push(ShapeSpec::Picture {
            asset: asset.to_string(),
            geometry,
            description: None,
        });
        self
    }

    /// Text of the first title shape, if any.
    pub fn title_text(&self) -> Option<&str> {
        self.shapes.iter().find_map(|shape| match shape {
            ShapeSpec::Title { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// A complete presentation description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub settings: PresentationSettings,
    #[serde(default)]
    pub properties: DocumentProperties,
    #[serde(default)]
    pub slides: Vec<SlideSpec>,
}

impl Deck {
    /// Create a deck from slides with default settings and properties.
    pub fn new(slides: Vec<SlideSpec>) -> Self {
        Self {
            slides,
            ..Self::default()
        }
    }

    /// Parse a deck description from YAML.
    ///
    /// Only `true` and `false` are booleans; YAML 1.1 forms such as `y` or
    /// `on` stay strings, so geometry keys like `y` are read as field names.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let options = serde_saphyr::options! { strict_booleans: true };
        serde_saphyr::from_str_with_options(yaml, options)
            .map_err(|e| OoxmlError::Deck(e.to_string()))
    }

    /// Read and parse a YAML deck description from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }
}
