//! Relationship-related objects for OPC packages.
//!
//! This module provides the per-source relationship registry: every part (and the
//! package itself) owns one `Relationships` collection, which is the only place
//! relationship ids are ever produced.

use crate::common::xml::XmlWriter;
use crate::ooxml::opc::constants::{namespace, target_mode};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;

/// Whether a relationship points inside the package or at an external resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// Target is a part in the same package, referenced relative to the source
    Internal,
    /// Target is an absolute URI outside the package
    External,
}

impl TargetMode {
    /// Value of the `TargetMode` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetMode::Internal => target_mode::INTERNAL,
            TargetMode::External => target_mode::EXTERNAL,
        }
    }
}

/// A single relationship from a source part to a target.
///
/// Identified by an rId that is unique within its owning collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a relative part reference or an external URL
    target_ref: String,

    /// Base URI of the source, used to resolve relative references
    base_uri: String,

    /// Internal or external target
    mode: TargetMode,
}

impl Relationship {
    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    ///
    /// For internal relationships, this is a reference relative to the source
    /// part's directory. For external relationships, this is an absolute URL.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Get the target mode.
    #[inline]
    pub fn mode(&self) -> TargetMode {
        self.mode
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.mode == TargetMode::External
    }

    /// Get the absolute target partname for internal relationships.
    ///
    /// Returns `Ok(None)` for external relationships.
    pub fn target_partname(&self) -> Result<Option<PackURI>> {
        if self.is_external() {
            return Ok(None);
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map(Some)
    }
}

/// Collection of relationships from a single source.
///
/// Relationships are kept in allocation order. Ids come from a counter owned by
/// the collection, so they are gap-free from `rId1` and are never handed out
/// twice.
#[derive(Debug, Clone)]
pub struct Relationships {
    /// Base URI for resolving relative references
    base_uri: String,

    /// Relationships in allocation order
    rels: Vec<Relationship>,

    /// Number of the next rId to allocate
    next_id: u32,
}

impl Relationships {
    /// Create a new empty relationships collection.
    ///
    /// # Arguments
    /// * `base_uri` - Base URI of the source (e.g. "/ppt/slides", or "/" for the package)
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            rels: Vec::new(),
            next_id: 1,
        }
    }

    /// Create the collection owned by a given source partname.
    pub fn for_source(source: &PackURI) -> Self {
        Self::new(source.base_uri())
    }

    /// Add a relationship and return its newly allocated rId.
    ///
    /// # Arguments
    /// * `reltype` - Relationship type URI
    /// * `target_ref` - Target reference (relative part reference or external URL)
    /// * `mode` - Internal or external target
    pub fn add(&mut self, reltype: &str, target_ref: &str, mode: TargetMode) -> String {
        let mut buf = itoa::Buffer::new();
        let r_id = format!("rId{}", buf.format(self.next_id));
        self.next_id += 1;

        self.rels.push(Relationship {
            r_id: r_id.clone(),
            reltype: reltype.to_string(),
            target_ref: target_ref.to_string(),
            base_uri: self.base_uri.clone(),
            mode,
        });
        r_id
    }

    /// Add an internal relationship to a target part.
    ///
    /// The stored target reference is computed relative to this collection's
    /// base URI.
    pub fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        let target_ref = target.relative_ref(&self.base_uri);
        self.add(reltype, &target_ref, TargetMode::Internal)
    }

    /// Add an external relationship.
    pub fn relate_to_ext(&mut self, target_url: &str, reltype: &str) -> String {
        self.add(reltype, target_url, TargetMode::External)
    }

    /// Get a relationship by its ID.
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id == r_id)
    }

    /// Get the base URI relative references resolve against.
    #[inline]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Get an iterator over all relationships in allocation order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Get the number of relationships in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Check that every internal target names an existing part.
    ///
    /// # Arguments
    /// * `source` - Partname of the owner, used in error messages
    /// * `exists` - Predicate answering whether a partname is in the package
    pub fn verify_targets<F>(&self, source: &PackURI, exists: F) -> Result<()>
    where
        F: Fn(&PackURI) -> bool,
    {
        for rel in &self.rels {
            let unresolved = match rel.target_partname() {
                Ok(Some(partname)) => !exists(&partname),
                Ok(None) => false,
                Err(_) => true,
            };
            if unresolved {
                return Err(OpcError::UnresolvedRelationship {
                    source_uri: source.to_string(),
                    r_id: rel.r_id.clone(),
                    target: rel.target_ref.clone(),
                });
            }
        }
        Ok(())
    }

    /// Serialize relationships to the XML of a .rels part.
    pub fn to_xml(&self) -> Result<String> {
        let mut w = XmlWriter::with_declaration()?;
        w.start("Relationships", &[("xmlns", namespace::OPC_RELATIONSHIPS)])?;

        for rel in &self.rels {
            let mut attrs = vec![
                ("Id", rel.r_id.as_str()),
                ("Type", rel.reltype.as_str()),
                ("Target", rel.target_ref.as_str()),
            ];
            if rel.is_external() {
                attrs.push(("TargetMode", rel.mode.as_str()));
            }
            w.empty("Relationship", &attrs)?;
        }

        w.end()?;
        w.finish()
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new("/")
    }
}
