//! Slide XML generation for PPTX presentations.

use crate::common::xml::XmlWriter;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::pptx::deck::{PresentationSettings, Reveal, ShapeSpec, SlideSpec};
use crate::ooxml::pptx::writer::relmap::RelationshipMapper;
use crate::ooxml::pptx::writer::shape;
use crate::ooxml::pptx::writer::timing::{TimingGraph, TimingStep};

/// Sequential shape id allocator for one slide.
///
/// Id 1 belongs to the root group shape, so the first shape gets id 2.
#[derive(Debug)]
pub struct ShapeIds {
    next: u32,
}

impl ShapeIds {
    /// Create an allocator whose first id is 2.
    pub fn new() -> Self {
        Self { next: 2 }
    }

    /// Allocate the next shape id.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.next - 2
    }
}

impl Default for ShapeIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of building one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideContent {
    /// Complete slide part XML
    pub xml: String,
    /// Number of shapes in the shape tree, excluding the root group
    pub shape_count: u32,
    /// Reveal steps of the slide's timing graph, in playback order
    pub timing_steps: Vec<TimingStep>,
}

/// Builds the XML payload of a slide from its description.
///
/// Media relationships must already be allocated in the slide's registry and
/// recorded in the [`RelationshipMapper`]; the builder never creates
/// relationships itself.
#[derive(Debug, Clone, Copy)]
pub struct SlideBuilder<'a> {
    settings: &'a PresentationSettings,
}

impl<'a> SlideBuilder<'a> {
    /// Create a builder using the given presentation settings.
    pub fn new(settings: &'a PresentationSettings) -> Self {
        Self { settings }
    }

    /// Build one slide.
    ///
    /// Fails with `MissingAsset` when a background or picture has no recorded
    /// relationship, and with `InvalidFormat` when the slide has more than one
    /// background.
    pub fn build(&self, slide: &SlideSpec, rels: &RelationshipMapper) -> Result<SlideContent> {
        let mut backgrounds = slide.shapes.iter().filter_map(|shape| match shape {
            ShapeSpec::Background { asset } => Some(asset.as_str()),
            _ => None,
        });
        let background = backgrounds.next();
        if backgrounds.next().is_some() {
            return Err(OoxmlError::InvalidFormat(
                "a slide can have at most one background".to_string(),
            ));
        }

        let mut w = XmlWriter::with_declaration()?;
        w.start(
            "p:sld",
            &[
                ("xmlns:a", namespace::DML_MAIN),
                ("xmlns:r", namespace::OFC_RELATIONSHIPS),
                ("xmlns:p", namespace::PML_MAIN),
            ],
        )?;
        w.start("p:cSld", &[])?;

        if let Some(asset) = background {
            let r_id = rels
                .background_id()
                .ok_or_else(|| OoxmlError::MissingAsset(asset.to_string()))?;
            shape::write_background(&mut w, r_id)?;
        }

        w.start("p:spTree", &[])?;
        shape::write_group_header(&mut w)?;

        let mut ids = ShapeIds::new();
        let mut timing = TimingGraph::new(self.settings.reveal_duration_ms);
        let mut picture_index = 0;

        for spec in &slide.shapes {
            match spec {
                ShapeSpec::Background { .. } => {},
                ShapeSpec::Title { text, style } => {
                    shape::write_title(&mut w, ids.next_id(), text, *style)?;
                },
                ShapeSpec::Bullets { items, reveal } => {
                    let spid = ids.next_id();
                    shape::write_bullets(&mut w, spid, items)?;
                    if *reveal == Reveal::ByParagraph {
                        timing.reveal_paragraphs(spid, items.len());
                    }
                },
                ShapeSpec::Picture {
                    asset,
                    geometry,
                    description,
                } => {
                    let r_id = rels
                        .image_id(picture_index)
                        .ok_or_else(|| OoxmlError::MissingAsset(asset.clone()))?;
                    picture_index += 1;
                    shape::write_picture(
                        &mut w,
                        ids.next_id(),
                        r_id,
                        geometry,
                        description.as_deref(),
                    )?;
                },
            }
        }

        w.end()?; // spTree
        w.end()?; // cSld

        w.start("p:clrMapOvr", &[])?;
        w.empty("a:masterClrMapping", &[])?;
        w.end()?;

        timing.write(&mut w)?;

        w.end()?; // sld

        Ok(SlideContent {
            xml: w.finish()?,
            shape_count: ids.issued(),
            timing_steps: timing.into_steps(),
        })
    }
}
