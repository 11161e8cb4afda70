//! Encoded image payloads as they arrive over HTTP.
//!
//! A photo is either a full data URI (`data:image/png;base64,iVBOR...`) or a
//! bare base64 payload with an optional, separately supplied media type.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::ImageError;

/// Standard alphabet, padding optional on decode. Browser encoders and
/// hand-built payloads disagree on trailing `=`.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// An image payload that has been split from its media type tag but not yet
/// decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    media_type: Option<String>,
    payload: String,
}

impl EncodedImage {
    /// Split `photo` into media type and base64 payload.
    ///
    /// A data URI's own media type wins over `declared_type`. For a bare
    /// payload, `declared_type` (if any) becomes the media type.
    pub fn parse(photo: &str, declared_type: Option<&str>) -> Result<Self, ImageError> {
        let photo = photo.trim();
        let declared = declared_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned);

        let Some(rest) = photo.strip_prefix("data:") else {
            return Ok(Self {
                media_type: declared,
                payload: photo.to_owned(),
            });
        };

        let (header, payload) = rest.split_once(',').ok_or(ImageError::MalformedDataUri)?;
        let media_type = header
            .split(';')
            .next()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .or(declared);

        Ok(Self {
            media_type,
            payload: payload.to_owned(),
        })
    }

    /// The declared media type, e.g. `image/png`.
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    /// File extension derived from the declared media subtype, or `default`
    /// when no type was declared.
    pub fn extension(&self, default: &str) -> Result<String, ImageError> {
        match &self.media_type {
            Some(media_type) => extension_for(media_type),
            None => Ok(default.to_ascii_lowercase()),
        }
    }

    /// Decode the base64 payload. Embedded whitespace (line-wrapped base64)
    /// is ignored.
    pub fn decode(&self) -> Result<Vec<u8>, ImageError> {
        let compact: String = self
            .payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = LENIENT.decode(compact)?;
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        Ok(bytes)
    }
}

/// Map a media type (`image/jpeg`, `image/svg+xml`) or a bare subtype
/// (`png`) to a lowercase file extension.
pub fn extension_for(media_type: &str) -> Result<String, ImageError> {
    let subtype = match media_type.split_once('/') {
        Some((_, subtype)) => subtype,
        None => media_type,
    };
    let subtype = subtype.split('+').next().unwrap_or(subtype).trim();

    if subtype.is_empty() || !subtype.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ImageError::UnsupportedMediaType(media_type.to_owned()));
    }
    Ok(subtype.to_ascii_lowercase())
}

/// Media type reported for a stored file with the given extension.
pub fn media_type_for(extension: &str) -> String {
    match extension {
        "jpg" => "image/jpeg".to_owned(),
        "svg" => "image/svg+xml".to_owned(),
        other => format!("image/{other}"),
    }
}

/// Render bytes as an inline `data:` URI.
pub fn to_data_uri(media_type: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{media_type};base64,{encoded}")
}
