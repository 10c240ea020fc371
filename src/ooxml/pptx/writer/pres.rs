//! Presentation part writer for PPTX.

use crate::common::xml::XmlWriter;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::pptx::deck::{DEFAULT_SLIDE_HEIGHT, DEFAULT_SLIDE_WIDTH, PresentationSettings};

/// Id of the only slide master in `sldMasterIdLst`.
pub const SLIDE_MASTER_ID: u32 = 2_147_483_648;

/// First slide id in `sldIdLst`; later slides count up from here.
pub const FIRST_SLIDE_ID: u32 = 256;

/// Largest slide id PowerPoint accepts.
const MAX_SLIDE_ID: u32 = 2_147_483_647;

/// Notes page size in EMU (portrait 7.5" x 10").
const NOTES_WIDTH: i64 = 6_858_000;
const NOTES_HEIGHT: i64 = 9_144_000;

/// Inputs of `ppt/presentation.xml`.
///
/// Slide relationship ids are listed in presentation order; the slide-id list
/// is written in exactly that order.
#[derive(Debug, Clone, Copy)]
pub struct PresentationPart<'a> {
    /// Slide size and other settings
    pub settings: &'a PresentationSettings,
    /// Relationship id of the slide master
    pub master_r_id: &'a str,
    /// Relationship ids of the slides, in presentation order
    pub slide_r_ids: &'a [String],
}

impl PresentationPart<'_> {
    /// Generate presentation.xml content.
    pub fn to_xml(&self) -> Result<String> {
        if self.slide_r_ids.len() as u64 > u64::from(MAX_SLIDE_ID - FIRST_SLIDE_ID) + 1 {
            return Err(OoxmlError::InvalidFormat(format!(
                "too many slides: {}",
                self.slide_r_ids.len()
            )));
        }
        self.settings.validate()?;

        let mut first = itoa::Buffer::new();
        let mut second = itoa::Buffer::new();

        let mut w = XmlWriter::with_declaration()?;
        w.start(
            "p:presentation",
            &[
                ("xmlns:a", namespace::DML_MAIN),
                ("xmlns:r", namespace::OFC_RELATIONSHIPS),
                ("xmlns:p", namespace::PML_MAIN),
                ("saveSubsetFonts", "1"),
            ],
        )?;

        w.start("p:sldMasterIdLst", &[])?;
        w.empty(
            "p:sldMasterId",
            &[("id", first.format(SLIDE_MASTER_ID)), ("r:id", self.master_r_id)],
        )?;
        w.end()?;

        if !self.slide_r_ids.is_empty() {
            w.start("p:sldIdLst", &[])?;
            for (slide_id, r_id) in (FIRST_SLIDE_ID..).zip(self.slide_r_ids) {
                w.empty("p:sldId", &[("id", first.format(slide_id)), ("r:id", r_id.as_str())])?;
            }
            w.end()?;
        }

        let (cx, cy) = (self.settings.slide_width, self.settings.slide_height);
        let mut size = vec![("cx", first.format(cx)), ("cy", second.format(cy))];
        if (cx, cy) == (DEFAULT_SLIDE_WIDTH, DEFAULT_SLIDE_HEIGHT) {
            size.push(("type", "screen4x3"));
        }
        w.empty("p:sldSz", &size)?;

        w.empty(
            "p:notesSz",
            &[("cx", first.format(NOTES_WIDTH)), ("cy", second.format(NOTES_HEIGHT))],
        )?;

        w.end()?;
        Ok(w.finish()?)
    }
}
