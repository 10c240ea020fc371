//! Image media for PPTX presentations.
//!
//! A [`MediaLibrary`] holds the caller-supplied image bytes keyed by asset name.
//! [`EmbeddedMedia`] tracks which assets have already been written into a
//! package so each one is stored exactly once, however often it is referenced.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::Part;
use crate::ooxml::pptx::format::{ImageFormat, content_type_for_extension};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Raw bytes of one media asset plus the extension it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    bytes: Vec<u8>,
    ext: String,
}

impl MediaAsset {
    /// Create an asset, normalizing the extension to lower case without a dot.
    pub fn new(bytes: Vec<u8>, ext: &str) -> Result<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
        if ext.is_empty() || !ext.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(OoxmlError::InvalidFormat(format!(
                "invalid media extension '{}'",
                ext
            )));
        }
        Ok(Self { bytes, ext })
    }

    /// Get the asset bytes.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the lower-case extension.
    #[inline]
    pub fn ext(&self) -> &str {
        &self.ext
    }

    /// Content type registered as the Default for this asset's extension.
    pub fn content_type(&self) -> &'static str {
        content_type_for_extension(&self.ext)
    }
}

/// Caller-supplied media, keyed by asset name.
///
/// The asset name is the identity used for deduplication: slides referring to
/// the same name share one embedded media part.
#[derive(Debug, Clone, Default)]
pub struct MediaLibrary {
    assets: HashMap<String, MediaAsset>,
}

impl MediaLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset with an explicit extension, replacing any previous asset
    /// of the same name.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>, ext: &str) -> Result<()> {
        let asset = MediaAsset::new(bytes, ext)?;
        self.assets.insert(name.into(), asset);
        Ok(())
    }

    /// Add an asset whose extension is detected from its magic number.
    pub fn insert_detected(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> Result<()> {
        let name = name.into();
        let format = ImageFormat::detect_from_bytes(&bytes).ok_or_else(|| {
            OoxmlError::InvalidFormat(format!("unrecognised image data for asset '{}'", name))
        })?;
        self.insert(name, bytes, format.extension())
    }

    /// Read an asset from disk, taking the extension from the file name.
    pub fn insert_file<P: AsRef<Path>>(&mut self, name: impl Into<String>, path: P) -> Result<()> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                OoxmlError::InvalidFormat(format!("no extension on '{}'", path.display()))
            })?
            .to_string();
        let bytes = std::fs::read(path)?;
        self.insert(name, bytes, &ext)
    }

    /// Look up an asset by name.
    pub fn get(&self, name: &str) -> Option<&MediaAsset> {
        self.assets.get(name)
    }

    /// Check if an asset is present.
    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }

    /// Number of assets in the library.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if the library is empty.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Media parts already written into a package during one build.
///
/// Partnames are `/ppt/media/image<N>.<ext>` with N counting from 1 in
/// first-use order across the whole package.
#[derive(Debug, Default)]
pub struct EmbeddedMedia {
    by_name: HashMap<String, PackURI>,
    next_index: u32,
}

impl EmbeddedMedia {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the partname for an asset, embedding it on first use.
    ///
    /// The first embedding registers the extension Default and adds the media
    /// part. Fails with `MissingAsset` when the library has no such asset.
    pub fn embed(
        &mut self,
        package: &mut OpcPackage,
        library: &MediaLibrary,
        name: &str,
    ) -> Result<PackURI> {
        if let Some(partname) = self.by_name.get(name) {
            return Ok(partname.clone());
        }

        let asset = library
            .get(name)
            .ok_or_else(|| OoxmlError::MissingAsset(name.to_string()))?;

        package
            .content_types_mut()
            .register_default(asset.ext(), asset.content_type())?;

        let index = self.next_index + 1;
        let partname = PackURI::new(format!("/ppt/media/image{}.{}", index, asset.ext()))?;
        package.add_part(Part::binary(partname.clone(), asset.bytes().to_vec()))?;
        self.next_index = index;

        debug!(asset = name, partname = %partname, bytes = asset.bytes().len(), "embedded media");
        self.by_name.insert(name.to_string(), partname.clone());
        Ok(partname)
    }

    /// Number of distinct assets embedded so far.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if nothing has been embedded yet.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
