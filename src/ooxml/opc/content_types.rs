//! Content type registry for OPC packages.
//!
//! Maps file extensions (Default entries) and individual partnames (Override
//! entries) to content types, and serializes them as `[Content_Types].xml`.

use crate::common::xml::XmlWriter;
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::collections::BTreeMap;

/// Registry of Default and Override content type entries.
///
/// Extensions are compared case-insensitively and stored lower-case. Every
/// registration either succeeds completely or leaves the registry untouched.
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    /// Default content types by lower-case extension
    defaults: BTreeMap<String, String>,

    /// Override content types by partname
    overrides: BTreeMap<PackURI, String>,
}

impl ContentTypes {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the Defaults every package needs
    /// (`rels` and `xml`).
    pub fn with_package_defaults() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());
        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    /// Map an extension to a default content type.
    ///
    /// Registering the same pair again is a no-op; a different content type for
    /// an already mapped extension fails with `ContentTypeConflict`.
    pub fn register_default(&mut self, ext: &str, content_type: &str) -> Result<()> {
        let key = ext.to_ascii_lowercase();
        if let Some(existing) = self.defaults.get(&key) {
            if existing == content_type {
                return Ok(());
            }
            return Err(OpcError::ContentTypeConflict {
                key,
                existing: existing.clone(),
                requested: content_type.to_string(),
            });
        }
        self.defaults.insert(key, content_type.to_string());
        Ok(())
    }

    /// Map a specific partname to a content type.
    pub fn register_override(&mut self, partname: &PackURI, content_type: &str) -> Result<()> {
        if let Some(existing) = self.overrides.get(partname) {
            if existing == content_type {
                return Ok(());
            }
            return Err(OpcError::ContentTypeConflict {
                key: partname.to_string(),
                existing: existing.clone(),
                requested: content_type.to_string(),
            });
        }
        self.overrides
            .insert(partname.clone(), content_type.to_string());
        Ok(())
    }

    /// Resolve the content type of a partname.
    ///
    /// An Override for the exact partname wins over the Default for its extension.
    pub fn resolve(&self, partname: &PackURI) -> Result<&str> {
        if let Some(content_type) = self.overrides.get(partname) {
            return Ok(content_type.as_str());
        }
        self.defaults
            .get(&partname.ext().to_ascii_lowercase())
            .map(String::as_str)
            .ok_or_else(|| OpcError::UnknownContentType(partname.to_string()))
    }

    /// Get the Default content type registered for an extension.
    pub fn default_for(&self, ext: &str) -> Option<&str> {
        self.defaults
            .get(&ext.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Generate the XML for `[Content_Types].xml`.
    ///
    /// Defaults are written sorted by extension, then Overrides sorted by partname.
    pub fn to_xml(&self) -> Result<String> {
        let mut w = XmlWriter::with_declaration()?;
        w.start("Types", &[("xmlns", namespace::OPC_CONTENT_TYPES)])?;

        for (ext, content_type) in &self.defaults {
            w.empty(
                "Default",
                &[("Extension", ext.as_str()), ("ContentType", content_type.as_str())],
            )?;
        }

        for (partname, content_type) in &self.overrides {
            w.empty(
                "Override",
                &[("PartName", partname.as_str()), ("ContentType", content_type.as_str())],
            )?;
        }

        w.end()?;
        w.finish()
    }
}
