/// Metadata for an asset that has just been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    /// Generated file name, `<token>.<extension>`.
    pub file_name: String,
    /// Media type the extension was derived from (`image/png`).
    pub media_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// `SHA-256` hex digest of the decoded bytes.
    pub checksum_sha256: String,
    /// Reference string a record stores to point at this asset.
    pub reference: String,
}

impl StoredAsset {
    /// The unique token part of the file name (without extension).
    pub fn token(&self) -> &str {
        self.file_name
            .split_once('.')
            .map_or(self.file_name.as_str(), |(token, _)| token)
    }
}

/// A stored asset loaded back from disk.
#[derive(Debug, Clone)]
pub struct LoadedAsset {
    /// File name that was read.
    pub file_name: String,
    /// Media type implied by the file extension.
    pub media_type: String,
    /// The raw bytes.
    pub data: bytes::Bytes,
}
