//! Office Open XML (OOXML) package output.
//!
//! The module is organized into layers:
//!
//! 1. **OPC Layer** (`opc`): package model (parts, relationships, content
//!    types) and the ZIP serializer
//! 2. **Shared Parts** (`common`): document property parts
//! 3. **PresentationML** (`pptx`): deck descriptions, slide building and
//!    package assembly
//!
//! # Example
//!
//! ```rust,no_run
//! use slidepack::ooxml::pptx::{Deck, MediaLibrary, write_presentation};
//!
//! let deck = Deck::open("deck.yaml")?;
//! let mut media = MediaLibrary::new();
//! media.insert_file("background", "images/background.png")?;
//! write_presentation("deck.pptx", &deck, &media)?;
//! # Ok::<(), slidepack::ooxml::OoxmlError>(())
//! ```
pub mod common;
pub mod error;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export common utilities
pub use common::DocumentProperties;

// Re-export error types
pub use error::{OoxmlError, Result};
