use catalog_core::ImageError;
use thiserror::Error;

/// Errors that can occur while writing or reading an image asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The encoded payload could not be decoded.
    #[error("image decode failed: {0}")]
    Image(#[from] ImageError),

    /// The identifier is not a plain file name inside the images root.
    #[error("invalid asset identifier: {0}")]
    InvalidIdentifier(String),

    /// No asset exists under the resolved file name.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// A filesystem error occurred.
    #[error("asset storage error: {0}")]
    Io(#[from] std::io::Error),
}
