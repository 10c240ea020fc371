//! XML generation helpers shared by every generated part.

mod writer;

pub use writer::XmlWriter;
