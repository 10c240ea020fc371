//! Provides the PackURI value type and utilities for working with package URIs.
//!
//! A PackURI represents a part name within an OPC package. Partnames are kept in
//! their canonical form with a single leading slash ("/ppt/slides/slide1.xml");
//! the ZIP member name is the same string with that slash removed.

use crate::ooxml::opc::error::{OpcError, Result};

/// Represents a package URI, which is a partname within an OPC package.
///
/// Construction rejects anything that could escape the package or name two
/// different members in the archive: empty segments, `.` and `..` segments,
/// backslashes and trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackURI {
    /// The full pack URI string (e.g., "/ppt/presentation.xml")
    uri: String,
}

impl PackURI {
    /// Create a new PackURI from a string.
    ///
    /// # Arguments
    /// * `uri` - The URI string, which must begin with a forward slash
    ///
    /// # Returns
    /// * `Ok(PackURI)` if the URI is a valid partname (or the package root "/")
    /// * `Err(OpcError::InvalidPackUri)` otherwise
    pub fn new<S: Into<String>>(uri: S) -> Result<Self> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(OpcError::InvalidPackUri(format!(
                "PackURI must begin with slash, got '{}'",
                uri
            )));
        }
        if uri != PACKAGE_URI {
            if uri.contains('\\') {
                return Err(OpcError::InvalidPackUri(format!(
                    "backslash in partname '{}'",
                    uri
                )));
            }
            if uri[1..]
                .split('/')
                .any(|segment| segment.is_empty() || segment == "." || segment == "..")
            {
                return Err(OpcError::InvalidPackUri(format!(
                    "empty or relative segment in partname '{}'",
                    uri
                )));
            }
        }
        Ok(PackURI { uri })
    }

    /// Create a PackURI from a relative reference and a base URI.
    ///
    /// This translates a relative reference (like "../media/image1.png") onto a
    /// base URI (like "/ppt/slides") to produce an absolute PackURI
    /// (like "/ppt/media/image1.png"). References that climb above the package
    /// root are rejected.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self> {
        let joined = if relative_ref.starts_with('/') {
            relative_ref.to_string()
        } else if base_uri.ends_with('/') {
            format!("{}{}", base_uri, relative_ref)
        } else {
            format!("{}/{}", base_uri, relative_ref)
        };

        let mut segments: Vec<&str> = Vec::new();
        for segment in joined.split('/') {
            match segment {
                "" | "." => {},
                ".." => {
                    if segments.pop().is_none() {
                        return Err(OpcError::InvalidPackUri(format!(
                            "'{}' escapes the package root from '{}'",
                            relative_ref, base_uri
                        )));
                    }
                },
                _ => segments.push(segment),
            }
        }

        Self::new(format!("/{}", segments.join("/")))
    }

    /// Get the base URI (directory portion) of this PackURI.
    ///
    /// For example, "/ppt/slides" for "/ppt/slides/slide1.xml".
    /// For the package pseudo-partname "/", returns "/".
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// Get the filename portion of this PackURI.
    ///
    /// For example, "slide1.xml" for "/ppt/slides/slide1.xml".
    /// For the package pseudo-partname "/", returns an empty string.
    pub fn filename(&self) -> &str {
        match self.uri.rfind('/') {
            Some(pos) => &self.uri[pos + 1..],
            None => "",
        }
    }

    /// Get the extension portion of this PackURI (no leading period).
    pub fn ext(&self) -> &str {
        let filename = self.filename();
        match filename.rfind('.') {
            Some(pos) => &filename[pos + 1..],
            None => "",
        }
    }

    /// Get the membername (URI with leading slash stripped).
    ///
    /// This is the form used as the Zip file membername for the package item.
    /// Returns an empty string for the package pseudo-partname "/".
    #[inline]
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// Get the relative reference from a base URI to this PackURI.
    ///
    /// For example, PackURI("/ppt/slideLayouts/slideLayout1.xml") returns
    /// "../slideLayouts/slideLayout1.xml" for base_uri "/ppt/slides".
    pub fn relative_ref(&self, base_uri: &str) -> String {
        if base_uri == PACKAGE_URI {
            return self.membername().to_string();
        }

        let from_parts: Vec<&str> = base_uri.split('/').filter(|s| !s.is_empty()).collect();
        let to_parts: Vec<&str> = self.uri.split('/').filter(|s| !s.is_empty()).collect();

        // The filename itself never counts towards the shared directory prefix.
        let to_dirs = to_parts.len().saturating_sub(1);
        let common = from_parts
            .iter()
            .zip(to_parts[..to_dirs].iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut result = String::new();
        for _ in common..from_parts.len() {
            result.push_str("../");
        }
        result.push_str(&to_parts[common..].join("/"));
        result
    }

    /// Get the PackURI of the .rels part corresponding to this PackURI.
    ///
    /// For example, "/ppt/slides/_rels/slide1.xml.rels" for
    /// "/ppt/slides/slide1.xml", and "/_rels/.rels" for the package itself.
    pub fn rels_uri(&self) -> PackURI {
        let base_uri = self.base_uri();
        let uri = if base_uri == PACKAGE_URI {
            format!("/_rels/{}.rels", self.filename())
        } else {
            format!("{}/_rels/{}.rels", base_uri, self.filename())
        };
        // Derived from an already validated partname, so always well formed.
        PackURI { uri }
    }

    /// Whether this partname lives where relationship parts are derived.
    ///
    /// Such names are reserved: the serializer generates them from each part's
    /// relationship registry.
    pub fn is_rels_part(&self) -> bool {
        self.base_uri().rsplit('/').next() == Some("_rels") && self.ext() == "rels"
    }

    /// Get the full URI string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

/// The package pseudo-partname, representing the package itself
pub const PACKAGE_URI: &str = "/";

/// The URI for the [Content_Types].xml part
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";
