//! Presentation writer components for PPTX.
//!
//! The [`PackageAssembler`] drives the build; the other modules each produce
//! one kind of XML (slides, shapes, timing, the presentation part) or track
//! ids while a slide is written.

pub mod assembler;
pub mod pres;
pub mod relmap;
pub(crate) mod shape;
pub mod slide;
pub mod timing;

// Re-export main types
pub use assembler::PackageAssembler;
pub use pres::PresentationPart;
pub use relmap::RelationshipMapper;
pub use slide::{ShapeIds, SlideBuilder, SlideContent};
pub use timing::{TimingGraph, TimingStep};
