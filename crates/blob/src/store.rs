use async_trait::async_trait;

use catalog_core::EncodedImage;

use crate::error::AssetError;
use crate::types::{LoadedAsset, StoredAsset};

/// Storage backend for product photos.
///
/// Writers never overwrite: every successful [`write`](AssetStore::write)
/// creates a new, uniquely named asset. Nothing is ever deleted.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Decode `image` and persist it under a freshly generated name.
    ///
    /// On error no asset is left behind and the caller must not commit a
    /// record that references one.
    async fn write(&self, image: &EncodedImage) -> Result<StoredAsset, AssetError>;

    /// Load an asset by identifier: either a bare token or `token.ext`.
    async fn read(&self, identifier: &str) -> Result<LoadedAsset, AssetError>;
}
