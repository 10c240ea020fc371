//! PowerPoint (.pptx) presentation output.
//!
//! This module turns a declarative [`Deck`] into a PresentationML package:
//!
//! - [`deck`]: slide descriptions, settings and YAML loading
//! - [`media`]: caller-supplied images and their one-time embedding
//! - [`template`]: theme, slide master and slide layout scaffolding
//! - [`writer`]: slide building and package assembly
//!
//! # Example
//!
//! ```rust
//! use slidepack::ooxml::pptx::{Deck, MediaLibrary, SlideSpec, TitleStyle, build_presentation};
//!
//! let deck = Deck::new(vec![
//!     SlideSpec::new().title("Hello", TitleStyle::Centered),
//!     SlideSpec::new().title("Agenda", TitleStyle::Heading).bullets(["One", "Two"]),
//! ]);
//! let bytes = build_presentation(&deck, &MediaLibrary::new())?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok::<(), slidepack::ooxml::OoxmlError>(())
//! ```

pub mod deck;
pub mod format;
pub mod media;
pub mod template;
pub mod writer;

use crate::ooxml::error::Result;
use std::path::Path;

// Re-exports for convenience
pub use deck::{Deck, Geometry, PresentationSettings, Reveal, ShapeSpec, SlideSpec, TitleStyle};
pub use format::ImageFormat;
pub use media::{MediaAsset, MediaLibrary};
pub use writer::PackageAssembler;

/// Build a deck into `.pptx` archive bytes using the deck's own settings.
pub fn build_presentation(deck: &Deck, media: &MediaLibrary) -> Result<Vec<u8>> {
    PackageAssembler::for_deck(deck).build(deck, media)
}

/// Build a deck and write the archive to `path`.
///
/// The file is only created once the whole archive has been built.
pub fn write_presentation<P: AsRef<Path>>(path: P, deck: &Deck, media: &MediaLibrary) -> Result<()> {
    let bytes = build_presentation(deck, media)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
