//! Open Packaging Convention (OPC) objects related to package parts.
//!
//! Parts are the fundamental units of content in an OPC package, each with a
//! unique partname, a payload, and its own relationship registry.

use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::rel::Relationships;

/// Content held by a part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Serialized XML text
    Xml(String),
    /// Raw bytes (images and other media)
    Binary(Vec<u8>),
}

impl Payload {
    /// Get the bytes written to the archive for this payload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Xml(xml) => xml.as_bytes(),
            Payload::Binary(data) => data,
        }
    }

    /// Get the XML text, if this is an XML payload.
    pub fn as_xml(&self) -> Option<&str> {
        match self {
            Payload::Xml(xml) => Some(xml),
            Payload::Binary(_) => None,
        }
    }

    /// Payload size in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Check if the payload is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A part in an OPC package.
///
/// A part is built completely (payload and relationships) before it is handed
/// to the package; once inserted it is only reachable through shared
/// references.
#[derive(Debug, Clone)]
pub struct Part {
    /// The partname (URI) of this part
    partname: PackURI,

    /// The content of this part
    payload: Payload,

    /// Relationships from this part to other parts
    rels: Relationships,
}

impl Part {
    /// Create a part with an empty relationship registry.
    pub fn new(partname: PackURI, payload: Payload) -> Self {
        let rels = Relationships::for_source(&partname);
        Self {
            partname,
            payload,
            rels,
        }
    }

    /// Create an XML part.
    pub fn xml(partname: PackURI, xml: String) -> Self {
        Self::new(partname, Payload::Xml(xml))
    }

    /// Create a binary part.
    pub fn binary(partname: PackURI, data: Vec<u8>) -> Self {
        Self::new(partname, Payload::Binary(data))
    }

    /// Attach a relationship registry built for this part.
    ///
    /// The registry must have been created for this part's directory
    /// (see [`Relationships::for_source`]), since its targets are stored
    /// relative to it.
    pub fn with_rels(mut self, rels: Relationships) -> Self {
        debug_assert_eq!(rels.base_uri(), self.partname.base_uri());
        self.rels = rels;
        self
    }

    /// Get the partname of this part.
    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    /// Get the payload of this part.
    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Get the binary content of this part.
    #[inline]
    pub fn blob(&self) -> &[u8] {
        self.payload.as_bytes()
    }

    /// Get the relationships for this part.
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Add a relationship to another part and return its rId.
    pub fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        self.rels.relate_to(target, reltype)
    }
}
