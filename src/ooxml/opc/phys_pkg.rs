//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! This module handles the low-level writing of OPC packages into ZIP archives.
//! Every member is Deflate-compressed with a fixed modification time so that the
//! same logical package always produces the same bytes.

use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::packuri::PackURI;
use std::io::{Cursor, Write};
use tracing::trace;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Physical package writer that stores parts into an in-memory ZIP archive.
///
/// Members are written in call order; the ZIP member name is the partname
/// without its leading slash.
pub struct PhysPkgWriter {
    /// The underlying ZIP archive writer
    archive: ZipWriter<Cursor<Vec<u8>>>,

    /// Options shared by every member
    options: SimpleFileOptions,
}

impl PhysPkgWriter {
    /// Create a new package writer that writes to memory.
    pub fn new() -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
            options,
        }
    }

    /// Write a part to the package with Deflate compression.
    ///
    /// # Arguments
    /// * `pack_uri` - The PackURI for the part
    /// * `blob` - The binary content to write
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        trace!(member = pack_uri.membername(), bytes = blob.len(), "writing member");
        self.archive.start_file(pack_uri.membername(), self.options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the package bytes.
    ///
    /// Consumes the writer and returns the complete ZIP archive.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.archive.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_member(data: &[u8], name: &str) -> Vec<u8> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = Vec::new();
        file.read_to_end(&mut content).unwrap();
        content
    }

    #[test]
    fn test_member_names_drop_leading_slash() {
        let mut writer = PhysPkgWriter::new();
        let pack_uri = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        writer.write(&pack_uri, b"<p:sld/>").unwrap();
        let zip_data = writer.finish().unwrap();

        assert_eq!(read_member(&zip_data, "ppt/slides/slide1.xml"), b"<p:sld/>");
    }

    #[test]
    fn test_members_keep_write_order() {
        let mut writer = PhysPkgWriter::new();

        let content_types = PackURI::new("/[Content_Types].xml").unwrap();
        let rels = PackURI::new("/_rels/.rels").unwrap();
        let presentation = PackURI::new("/ppt/presentation.xml").unwrap();

        writer.write(&content_types, b"<Types/>").unwrap();
        writer.write(&rels, b"<Relationships/>").unwrap();
        writer.write(&presentation, b"<p:presentation/>").unwrap();

        let zip_data = writer.finish().unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(zip_data.as_slice())).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            ["[Content_Types].xml", "_rels/.rels", "ppt/presentation.xml"]
        );
    }

    #[test]
    fn test_output_is_deterministic() {
        let build = || {
            let mut writer = PhysPkgWriter::new();
            let uri = PackURI::new("/ppt/media/image1.png").unwrap();
            writer.write(&uri, &[0x89, b'P', b'N', b'G', 1, 2, 3]).unwrap();
            writer.finish().unwrap()
        };
        assert_eq!(build(), build());
    }
}
