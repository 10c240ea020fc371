//! Package writer for OPC packages.
//!
//! This module serializes an assembled OPC package: it checks the package for
//! consistency, lays out the archive members in a stable order and writes them
//! through the physical ZIP writer.

use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgWriter;
use std::path::Path;
use tracing::{debug, info};

/// Package writer that serializes an OPC package to a ZIP file.
///
/// This is the main entry point for saving packages. It handles writing:
/// - [Content_Types].xml
/// - _rels/.rels (package relationships)
/// - All parts and their relationships, in insertion order
///
/// Serialization is all-or-nothing: the package is validated before the first
/// byte is produced, so a failing package never yields a partial archive.
///
/// # Example
///
/// ```no_run
/// use slidepack::ooxml::opc::package::OpcPackage;
/// use slidepack::ooxml::opc::pkgwriter::PackageWriter;
///
/// let pkg = OpcPackage::new();
/// // ... add parts to package ...
/// PackageWriter::write("output.pptx", &pkg)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct PackageWriter;

impl PackageWriter {
    /// Write an OPC package to a file.
    ///
    /// # Arguments
    /// * `path` - Path where the package should be written
    /// * `package` - The OPC package to write
    pub fn write<P: AsRef<Path>>(path: P, package: &OpcPackage) -> Result<()> {
        let bytes = Self::to_bytes(package)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Write an OPC package to a stream.
    ///
    /// # Arguments
    /// * `writer` - A writer that implements Write
    /// * `package` - The OPC package to write
    pub fn write_to_stream<W: std::io::Write>(mut writer: W, package: &OpcPackage) -> Result<()> {
        let bytes = Self::to_bytes(package)?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// Serialize an OPC package to bytes.
    ///
    /// # Arguments
    /// * `package` - The OPC package to serialize
    ///
    /// # Returns
    /// The serialized package as a byte vector
    pub fn to_bytes(package: &OpcPackage) -> Result<Vec<u8>> {
        let entries = Self::entries(package)?;

        let mut phys_writer = PhysPkgWriter::new();
        for (uri, blob) in &entries {
            phys_writer.write(uri, blob)?;
        }
        let bytes = phys_writer.finish()?;

        info!(
            parts = package.part_count(),
            members = entries.len(),
            bytes = bytes.len(),
            "serialized package"
        );
        Ok(bytes)
    }

    /// Validate the package and lay out every archive member in write order.
    ///
    /// The order is `[Content_Types].xml`, `_rels/.rels`, then each part in
    /// insertion order, immediately followed by its relationships part when it
    /// has any relationships.
    pub fn entries(package: &OpcPackage) -> Result<Vec<(PackURI, Vec<u8>)>> {
        Self::validate(package)?;

        let mut entries = Vec::with_capacity(package.part_count() * 2 + 2);

        let content_types_uri = PackURI::new(CONTENT_TYPES_URI)?;
        entries.push((
            content_types_uri,
            package.content_types().to_xml()?.into_bytes(),
        ));

        let package_uri = PackURI::new(PACKAGE_URI)?;
        entries.push((package_uri.rels_uri(), package.rels().to_xml()?.into_bytes()));

        for part in package.iter_parts() {
            entries.push((part.partname().clone(), part.blob().to_vec()));
            if !part.rels().is_empty() {
                entries.push((part.partname().rels_uri(), part.rels().to_xml()?.into_bytes()));
            }
        }

        Ok(entries)
    }

    /// Final consistency sweep over an assembled package.
    ///
    /// Fails with `UnknownContentType` when a part (or a relationships part)
    /// has neither an Override nor a matching Default, and with
    /// `UnresolvedRelationship` when an internal relationship points at a
    /// partname that was never added.
    pub fn validate(package: &OpcPackage) -> Result<()> {
        let content_types = package.content_types();
        let package_uri = PackURI::new(PACKAGE_URI)?;

        content_types.resolve(&package_uri.rels_uri())?;
        package
            .rels()
            .verify_targets(&package_uri, |uri| package.contains_part(uri))?;

        for part in package.iter_parts() {
            content_types.resolve(part.partname())?;
            if !part.rels().is_empty() {
                content_types.resolve(&part.partname().rels_uri())?;
                part.rels()
                    .verify_targets(part.partname(), |uri| package.contains_part(uri))?;
            }
        }

        debug!(parts = package.part_count(), "package validated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
    use crate::ooxml::opc::error::OpcError;
    use crate::ooxml::opc::part::Part;
    use crate::ooxml::opc::rel::Relationships;

    fn uri(s: &str) -> PackURI {
        PackURI::new(s).unwrap()
    }

    fn small_package() -> OpcPackage {
        let mut pkg = OpcPackage::new();
        let pres = uri("/ppt/presentation.xml");
        let image = uri("/ppt/media/image1.png");

        pkg.content_types_mut()
            .register_default("png", ct::PNG)
            .unwrap();
        pkg.add_part(Part::binary(image.clone(), vec![1, 2, 3])).unwrap();

        let mut rels = Relationships::for_source(&pres);
        rels.relate_to(&image, rt::IMAGE);
        pkg.add_part_with_override(
            Part::xml(pres.clone(), "<p:presentation/>".into()).with_rels(rels),
            ct::PML_PRESENTATION_MAIN,
        )
        .unwrap();
        pkg.relate_to(&pres, rt::OFFICE_DOCUMENT);
        pkg
    }

    #[test]
    fn test_entry_order() {
        let entries = PackageWriter::entries(&small_package()).unwrap();
        let names: Vec<&str> = entries.iter().map(|(u, _)| u.as_str()).collect();
        assert_eq!(
            names,
            [
                "/[Content_Types].xml",
                "/_rels/.rels",
                "/ppt/media/image1.png",
                "/ppt/presentation.xml",
                "/ppt/_rels/presentation.xml.rels",
            ]
        );
    }

    #[test]
    fn test_rels_target_is_relative() {
        let entries = PackageWriter::entries(&small_package()).unwrap();
        let (_, rels) = entries
            .iter()
            .find(|(u, _)| u.as_str() == "/ppt/_rels/presentation.xml.rels")
            .unwrap();
        let rels = String::from_utf8(rels.clone()).unwrap();
        assert!(rels.contains(r#"Id="rId1""#));
        assert!(rels.contains(r#"Target="media/image1.png""#));
    }

    #[test]
    fn test_missing_default_fails() {
        let mut pkg = OpcPackage::new();
        pkg.add_part(Part::binary(uri("/ppt/media/image1.png"), vec![0]))
            .unwrap();
        let err = PackageWriter::to_bytes(&pkg).unwrap_err();
        assert!(
            matches!(err, OpcError::UnknownContentType(p) if p == "/ppt/media/image1.png")
        );
    }

    #[test]
    fn test_dangling_relationship_fails() {
        let mut pkg = OpcPackage::new();
        let pres = uri("/ppt/presentation.xml");
        let mut rels = Relationships::for_source(&pres);
        rels.relate_to(&uri("/ppt/slides/slide9.xml"), rt::SLIDE);
        pkg.add_part_with_override(
            Part::xml(pres, "<p:presentation/>".into()).with_rels(rels),
            ct::PML_PRESENTATION_MAIN,
        )
        .unwrap();

        let err = PackageWriter::to_bytes(&pkg).unwrap_err();
        match err {
            OpcError::UnresolvedRelationship { source_uri, r_id, target } => {
                assert_eq!(source_uri, "/ppt/presentation.xml");
                assert_eq!(r_id, "rId1");
                assert_eq!(target, "slides/slide9.xml");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_external_targets_are_not_resolved() {
        let mut pkg = OpcPackage::new();
        let slide = uri("/ppt/slides/slide1.xml");
        let mut rels = Relationships::for_source(&slide);
        rels.relate_to_ext("https://example.com/", rt::HYPERLINK);
        pkg.add_part_with_override(Part::xml(slide, "<p:sld/>".into()).with_rels(rels), ct::PML_SLIDE)
            .unwrap();
        assert!(PackageWriter::validate(&pkg).is_ok());
    }

    #[test]
    fn test_write_to_stream_matches_to_bytes() {
        let pkg = small_package();
        let mut out = Vec::new();
        PackageWriter::write_to_stream(&mut out, &pkg).unwrap();
        assert_eq!(out, PackageWriter::to_bytes(&pkg).unwrap());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pptx");
        PackageWriter::write(&path, &small_package()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
