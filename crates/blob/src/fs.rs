//! Filesystem-backed asset store.
//!
//! Assets live as flat files `<token>.<ext>` directly under a single images
//! root. There is no manifest; the only link from a record to its file is the
//! reference string the record holds.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use catalog_core::{EncodedImage, media_type_for};

use crate::error::AssetError;
use crate::store::AssetStore;
use crate::types::{LoadedAsset, StoredAsset};

/// Asset store writing into a local directory.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
    public_prefix: String,
    default_extension: String,
}

impl FsAssetStore {
    /// Create a store rooted at `root`.
    ///
    /// `public_prefix` is prepended to file names to form references
    /// (`/images` gives `/images/<token>.png`). `default_extension` is used
    /// both for bare payloads without a media type and for bare-token reads.
    pub fn new(
        root: impl Into<PathBuf>,
        public_prefix: &str,
        default_extension: &str,
    ) -> Self {
        let trimmed = public_prefix.trim_end_matches('/');
        let public_prefix = if trimmed.starts_with('/') {
            trimmed.to_owned()
        } else {
            format!("/{trimmed}")
        };
        Self {
            root: root.into(),
            public_prefix,
            default_extension: default_extension.trim_start_matches('.').to_ascii_lowercase(),
        }
    }

    /// Directory assets are written into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Normalized reference prefix (leading `/`, no trailing `/`).
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Map a reference produced by [`write`](AssetStore::write) back to the
    /// file on disk. Returns `None` for references this store did not issue.
    pub fn resolve_reference(&self, reference: &str) -> Option<PathBuf> {
        let file_name = reference
            .strip_prefix(self.public_prefix.as_str())?
            .strip_prefix('/')?;
        is_valid_identifier(file_name).then(|| self.root.join(file_name))
    }

    fn reference_for(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.public_prefix)
    }

    async fn create_exclusive(&self, path: &Path, bytes: &[u8]) -> Result<(), AssetError> {
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;

        let written = async {
            file.write_all(bytes).await?;
            file.flush().await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            if let Err(cleanup) = tokio::fs::remove_file(path).await {
                warn!(path = %path.display(), error = %cleanup, "failed to remove partial asset");
            }
            return Err(e.into());
        }
        Ok(())
    }
}

/// Whether `identifier` is a plain file name that cannot leave the images
/// root: ASCII alphanumerics, `-`, `_` and `.`, no leading dot, no `..`.
pub fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && !identifier.starts_with('.')
        && !identifier.contains("..")
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn write(&self, image: &EncodedImage) -> Result<StoredAsset, AssetError> {
        let extension = image.extension(&self.default_extension)?;
        let bytes = image.decode()?;

        tokio::fs::create_dir_all(&self.root).await?;

        let file_name = format!("{}.{extension}", Uuid::new_v4().simple());
        let path = self.root.join(&file_name);
        self.create_exclusive(&path, &bytes).await?;

        let asset = StoredAsset {
            reference: self.reference_for(&file_name),
            media_type: media_type_for(&extension),
            size_bytes: bytes.len() as u64,
            checksum_sha256: hex::encode(Sha256::digest(&bytes)),
            file_name,
        };
        info!(
            file = %asset.file_name,
            size_bytes = asset.size_bytes,
            sha256 = %asset.checksum_sha256,
            "asset stored"
        );
        Ok(asset)
    }

    async fn read(&self, identifier: &str) -> Result<LoadedAsset, AssetError> {
        if !is_valid_identifier(identifier) {
            return Err(AssetError::InvalidIdentifier(identifier.to_owned()));
        }

        // A bare token is assumed to carry the default extension.
        let (file_name, extension) = match identifier.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => (identifier.to_owned(), ext.to_ascii_lowercase()),
            _ => (
                format!("{}.{}", identifier.trim_end_matches('.'), self.default_extension),
                self.default_extension.clone(),
            ),
        };

        let path = self.root.join(&file_name);
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AssetError::NotFound(file_name));
            }
            Err(e) => return Err(e.into()),
        };
        debug!(file = %file_name, size_bytes = data.len(), "asset loaded");

        Ok(LoadedAsset {
            file_name,
            media_type: media_type_for(&extension),
            data: data.into(),
        })
    }
}
