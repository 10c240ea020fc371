//! The in-memory OPC package being assembled.
//!
//! This module provides the main OpcPackage type: the part tree, the content type
//! registry and the package-level relationships of one build. The model is
//! append-only; parts are never replaced or removed once added.

use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::content_types::ContentTypes;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::rel::Relationships;
use std::collections::HashMap;
use tracing::debug;

/// Main API class for building OPC packages.
///
/// Owns every part (in insertion order), the content type registry and the
/// package-level relationships. Each build uses its own instance.
#[derive(Debug)]
pub struct OpcPackage {
    /// Package-level relationships (serialized as `/_rels/.rels`)
    rels: Relationships,

    /// All parts in insertion order
    parts: Vec<Part>,

    /// Partname to position in `parts`
    index: HashMap<PackURI, usize>,

    /// Default and Override content type entries
    content_types: ContentTypes,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    ///
    /// The content type registry starts with the `rels` and `xml` Defaults.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI),
            parts: Vec::new(),
            index: HashMap::new(),
            content_types: ContentTypes::with_package_defaults(),
        }
    }

    /// Add a new part to the package.
    ///
    /// Fails with `DuplicatePart` if the partname is taken, or if it names a part
    /// the serializer derives itself (`[Content_Types].xml` and `.rels` parts).
    pub fn add_part(&mut self, part: Part) -> Result<&Part> {
        self.check_free(part.partname())?;

        let partname = part.partname().clone();
        debug!(
            partname = %partname,
            bytes = part.blob().len(),
            rels = part.rels().len(),
            "adding part"
        );
        let position = self.parts.len();
        self.index.insert(partname, position);
        self.parts.push(part);
        Ok(&self.parts[position])
    }

    /// Add a part together with an Override for its content type.
    ///
    /// Nothing is registered if either the partname or the override conflicts.
    pub fn add_part_with_override(&mut self, part: Part, content_type: &str) -> Result<&Part> {
        self.check_free(part.partname())?;
        self.content_types
            .register_override(part.partname(), content_type)?;
        self.add_part(part)
    }

    /// Get a part by its partname.
    pub fn get_part(&self, partname: &PackURI) -> Result<&Part> {
        self.index
            .get(partname)
            .map(|&position| &self.parts[position])
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get the part the package-level officeDocument relationship points at.
    pub fn main_document_part(&self) -> Result<&Part> {
        let rel = self
            .rels
            .iter()
            .find(|rel| rel.reltype() == relationship_type::OFFICE_DOCUMENT)
            .ok_or_else(|| {
                OpcError::PartNotFound("no officeDocument relationship".to_string())
            })?;
        match rel.target_partname()? {
            Some(partname) => self.get_part(&partname),
            None => Err(OpcError::PartNotFound(rel.target_ref().to_string())),
        }
    }

    /// Check if a part exists in the package.
    #[inline]
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.index.contains_key(partname)
    }

    /// Get an iterator over all parts in insertion order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    /// Get the number of parts in the package.
    #[inline]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Get the content type registry.
    #[inline]
    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// Get mutable access to the content type registry.
    #[inline]
    pub fn content_types_mut(&mut self) -> &mut ContentTypes {
        &mut self.content_types
    }

    /// Get a reference to the package-level relationships.
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Relate the package to a part and return the new rId.
    pub fn relate_to(&mut self, partname: &PackURI, reltype: &str) -> String {
        self.rels.relate_to(partname, reltype)
    }

    fn check_free(&self, partname: &PackURI) -> Result<()> {
        if self.contains_part(partname)
            || partname.as_str() == CONTENT_TYPES_URI
            || partname.as_str() == PACKAGE_URI
            || partname.is_rels_part()
        {
            return Err(OpcError::DuplicatePart(partname.to_string()));
        }
        Ok(())
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}
