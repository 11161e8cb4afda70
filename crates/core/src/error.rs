use thiserror::Error;

/// A request was rejected before any state was touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// An encoded image could not be turned into bytes.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The string started with `data:` but had no `,` separator.
    #[error("malformed data URI")]
    MalformedDataUri,

    /// The declared media type does not yield a usable file extension.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The payload decoded to zero bytes.
    #[error("image payload is empty")]
    Empty,
}
