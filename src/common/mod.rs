//! Common utilities shared across formats.

// Submodule declarations
pub mod xml;

// Re-exports for convenience
pub use xml::XmlWriter;
