//! Error types for OPC package operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcError {
    #[error("Duplicate part: {0}")]
    DuplicatePart(String),

    #[error("Content type conflict for '{key}': registered as '{existing}', requested '{requested}'")]
    ContentTypeConflict {
        key: String,
        existing: String,
        requested: String,
    },

    #[error("Content type not found for partname: {0}")]
    UnknownContentType(String),

    #[error("Unresolved relationship {r_id} from '{source_uri}': no part at '{target}'")]
    UnresolvedRelationship {
        source_uri: String,
        r_id: String,
        target: String,
    },

    #[error("Part not found: {0}")]
    PartNotFound(String),

    #[error("Invalid pack URI: {0}")]
    InvalidPackUri(String),

    #[error("XML writing error: {0}")]
    Xml(String),

    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OpcError>;
