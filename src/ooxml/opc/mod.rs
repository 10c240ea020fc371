//! Open Packaging Conventions (OPC) implementation.
//!
//! This module provides the write side of the OPC specification, which defines
//! the structure and packaging format for Office Open XML documents.
//! It includes support for:
//!
//! - Package structure (parts, relationships)
//! - Content type management (Default and Override entries)
//! - ZIP-based physical packaging with deterministic output
//!
//! The model is append-only: parts, relationships and content types are
//! registered once during assembly and serialized in a stable order.

pub mod constants;
pub mod content_types;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use content_types::ContentTypes;
pub use error::{OpcError, Result};
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{Part, Payload};
pub use pkgwriter::PackageWriter;
pub use rel::{Relationship, Relationships, TargetMode};
