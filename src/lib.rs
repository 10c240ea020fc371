//! Slidepack - assembles PowerPoint (.pptx) packages from declarative decks
//!
//! This library builds Office Open XML presentations: it keeps the package's
//! parts, relationships and content types consistent while slides are built,
//! and serializes the result as a deterministic ZIP archive.
//!
//! # Features
//!
//! - **OPC package model**: append-only part tree, per-part relationship
//!   registries with gap-free `rId` allocation, Default/Override content types
//! - **Slides**: picture backgrounds, titles, bullet lists, pictures
//! - **Paragraph reveal timing**: one step per bullet, in list order
//! - **Media deduplication**: each asset is stored once however often it is used
//! - **YAML decks**: load slide descriptions with `serde`
//! - **Deterministic output**: the same deck always yields the same bytes
//!
//! # Example - Building a presentation
//!
//! ```no_run
//! use slidepack::ooxml::pptx::{Deck, Geometry, MediaLibrary, SlideSpec, TitleStyle};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut media = MediaLibrary::new();
//! media.insert_file("background", "background.png")?;
//! media.insert_file("chart", "chart.jpg")?;
//!
//! let deck = Deck::new(vec![
//!     SlideSpec::new()
//!         .background("background")
//!         .title("My Presentation", TitleStyle::Centered),
//!     SlideSpec::new()
//!         .background("background")
//!         .title("First page", TitleStyle::Heading)
//!         .bullets(["Revenue", "Costs", "Outlook"]),
//!     SlideSpec::new()
//!         .background("background")
//!         .title("The end", TitleStyle::Heading)
//!         .picture("chart", Geometry::new(1_524_000, 1_905_000, 6_096_000, 4_064_000)),
//! ]);
//!
//! slidepack::write_presentation("deck.pptx", &deck, &media)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Low-level package access
//!
//! ```
//! use slidepack::ooxml::opc::{OpcPackage, PackURI, PackageWriter, Part};
//! use slidepack::ooxml::opc::constants::{content_type, relationship_type};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pkg = OpcPackage::new();
//! let doc = PackURI::new("/ppt/presentation.xml")?;
//! pkg.add_part_with_override(
//!     Part::xml(doc.clone(), "<p:presentation/>".to_string()),
//!     content_type::PML_PRESENTATION_MAIN,
//! )?;
//! pkg.relate_to(&doc, relationship_type::OFFICE_DOCUMENT);
//!
//! let bytes = PackageWriter::to_bytes(&pkg)?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok(())
//! # }
//! ```

/// Common utilities (structured XML writing)
pub mod common;

/// OOXML (Office Open XML) package model and PresentationML output
pub mod ooxml;

// Re-export commonly used types for convenience
pub use ooxml::pptx::{
    Deck, MediaLibrary, PackageAssembler, PresentationSettings, SlideSpec, build_presentation,
    write_presentation,
};
pub use ooxml::{OoxmlError, Result};
