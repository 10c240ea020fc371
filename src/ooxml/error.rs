//! Error types for OOXML operations.

use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// OPC package error
    #[error("OPC error: {0}")]
    Opc(#[from] crate::ooxml::opc::error::OpcError),

    /// A shape referenced a media asset that was never supplied
    #[error("Missing media asset: {0}")]
    MissingAsset(String),

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Deck description could not be parsed
    #[error("Invalid deck description: {0}")]
    Deck(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
