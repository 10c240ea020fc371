//! Relationship ID mapper for one slide.
//!
//! The assembler allocates a slide's media relationships first, in shape
//! order, and records the resulting ids here. The slide builder then looks
//! them up while writing XML, so every `r:embed` in the slide names a
//! relationship that already exists in the slide's registry.

/// Maps the media-bearing shapes of a slide to their relationship IDs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelationshipMapper {
    /// Background image relationship ID
    background_id: Option<String>,
    /// Picture relationship IDs, indexed by picture order within the slide
    image_ids: Vec<Option<String>>,
}

impl RelationshipMapper {
    /// Create a new empty relationship mapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the background image relationship.
    ///
    /// # Arguments
    /// * `rel_id` - The relationship ID (e.g., "rId1")
    pub fn add_background(&mut self, rel_id: String) {
        self.background_id = Some(rel_id);
    }

    /// Get the background image relationship ID.
    pub fn background_id(&self) -> Option<&str> {
        self.background_id.as_deref()
    }

    /// Record the relationship of a picture.
    ///
    /// # Arguments
    /// * `image_index` - The index of the picture within the slide (0-based)
    /// * `rel_id` - The relationship ID (e.g., "rId2")
    pub fn add_image(&mut self, image_index: usize, rel_id: String) {
        if self.image_ids.len() <= image_index {
            self.image_ids.resize(image_index + 1, None);
        }
        self.image_ids[image_index] = Some(rel_id);
    }

    /// Get the relationship ID of a picture.
    ///
    /// # Arguments
    /// * `image_index` - The index of the picture within the slide (0-based)
    pub fn image_id(&self, image_index: usize) -> Option<&str> {
        self.image_ids.get(image_index)?.as_deref()
    }
}
