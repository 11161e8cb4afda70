//! Product operations that span the record store and the asset store.
//!
//! Create and update are two-phase: the photo is written first, and the
//! record is committed only after the write succeeded. A record therefore
//! never references an asset that does not exist. The reverse is allowed:
//! if the commit fails (an update racing a delete), the freshly written
//! asset stays on disk as an orphan.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use catalog_blob::{AssetError, AssetStore, LoadedAsset};
use catalog_core::{EncodedImage, ProductFields, ProductRecord, ValidationError};
use catalog_store::{RecordStore, StoreError};

/// Errors surfaced by [`CatalogService`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request was missing a required field.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The image identifier is not a plain file name.
    #[error("invalid image identifier: {0}")]
    InvalidIdentifier(String),

    /// No product with the given id.
    #[error("product not found: {0}")]
    NotFound(String),

    /// The photo could not be decoded or written.
    #[error("asset write failed: {0}")]
    AssetWrite(AssetError),

    /// The stored image could not be read.
    #[error("asset read failed: {0}")]
    AssetRead(AssetError),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
        }
    }
}

/// Product fields plus the encoded photo that accompanies them.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    /// Name, description, and price.
    pub fields: ProductFields,
    /// Base64 payload or full data URI.
    pub photo: String,
    /// Media type for a bare payload (`image/png` or `png`).
    pub photo_type: Option<String>,
}

impl ProductDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        self.fields.validate()?;
        if self.photo.trim().is_empty() {
            return Err(ValidationError::MissingField("photo"));
        }
        Ok(())
    }
}

/// The catalog: records in a [`RecordStore`], photos in an [`AssetStore`].
pub struct CatalogService {
    records: Arc<dyn RecordStore>,
    assets: Arc<dyn AssetStore>,
}

impl CatalogService {
    /// Wire a record store and an asset store together.
    pub fn new(records: Arc<dyn RecordStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self { records, assets }
    }

    /// All products in insertion order.
    pub async fn list(&self) -> Vec<ProductRecord> {
        self.records.list().await
    }

    /// Number of products.
    pub async fn count(&self) -> usize {
        self.records.len().await
    }

    /// Store the photo, then append a new product referencing it.
    pub async fn create(&self, draft: ProductDraft) -> Result<ProductRecord, CatalogError> {
        draft.validate()?;
        let photo_ref = self.store_photo(&draft).await?;

        let record = self.records.create(draft.fields, photo_ref).await;
        info!(id = %record.id, name = %record.name, photo = %record.photo_ref, "product created");
        Ok(record)
    }

    /// Store the new photo, then replace the product with `id` in full.
    ///
    /// Every update carries a new photo; there is no way to keep the
    /// previous one.
    pub async fn update(&self, id: &str, draft: ProductDraft) -> Result<ProductRecord, CatalogError> {
        if id.trim().is_empty() {
            return Err(ValidationError::MissingField("id").into());
        }
        draft.validate()?;

        // Unknown ids are rejected before anything is written.
        if self.records.get(id).await.is_none() {
            return Err(CatalogError::NotFound(id.to_owned()));
        }

        let photo_ref = self.store_photo(&draft).await?;
        match self.records.update(id, draft.fields, photo_ref.clone()).await {
            Ok(record) => {
                info!(id = %record.id, photo = %record.photo_ref, "product updated");
                Ok(record)
            }
            Err(e) => {
                warn!(id, orphan = %photo_ref, "product vanished before update commit");
                Err(e.into())
            }
        }
    }

    /// Remove the product with `id`, if any. Always succeeds.
    pub async fn delete(&self, id: &str) -> bool {
        let removed = self.records.delete(id).await;
        info!(id, removed, "product delete requested");
        removed
    }

    /// Load a stored image by token or file name.
    pub async fn image(&self, identifier: &str) -> Result<LoadedAsset, CatalogError> {
        self.assets.read(identifier).await.map_err(|e| match e {
            AssetError::InvalidIdentifier(id) => CatalogError::InvalidIdentifier(id),
            other => {
                error!(identifier, error = %other, "failed to load image");
                CatalogError::AssetRead(other)
            }
        })
    }

    async fn store_photo(&self, draft: &ProductDraft) -> Result<String, CatalogError> {
        let stored = async {
            let image = EncodedImage::parse(&draft.photo, draft.photo_type.as_deref())?;
            self.assets.write(&image).await
        }
        .await;

        match stored {
            Ok(asset) => Ok(asset.reference),
            Err(e) => {
                error!(error = %e, "failed to save image");
                Err(CatalogError::AssetWrite(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use catalog_blob::StoredAsset;
    use catalog_core::Price;
    use catalog_store::MemoryRecordStore;

    use super::*;

    /// Asset store that counts writes and can be told to fail.
    #[derive(Default)]
    struct CountingAssets {
        writes: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl AssetStore for CountingAssets {
        async fn write(&self, image: &EncodedImage) -> Result<StoredAsset, AssetError> {
            if self.fail {
                return Err(AssetError::Io(std::io::Error::other("disk full")));
            }
            let n = self.writes.fetch_add(1, Ordering::SeqCst);
            let ext = image.extension("png")?;
            Ok(StoredAsset {
                file_name: format!("asset{n}.{ext}"),
                media_type: format!("image/{ext}"),
                size_bytes: 1,
                checksum_sha256: String::new(),
                reference: format!("/images/asset{n}.{ext}"),
            })
        }

        async fn read(&self, identifier: &str) -> Result<LoadedAsset, AssetError> {
            if identifier.contains('/') {
                return Err(AssetError::InvalidIdentifier(identifier.to_owned()));
            }
            Err(AssetError::NotFound(identifier.to_owned()))
        }
    }

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            fields: ProductFields::new(name, "desc", Price::from(5)),
            photo: "data:image/png;base64,aGVsbG8=".to_owned(),
            photo_type: None,
        }
    }

    fn service(assets: Arc<CountingAssets>) -> (CatalogService, Arc<MemoryRecordStore>) {
        let records = Arc::new(MemoryRecordStore::new());
        (
            CatalogService::new(Arc::clone(&records) as Arc<dyn RecordStore>, assets),
            records,
        )
    }

    #[tokio::test]
    async fn create_commits_reference_returned_by_writer() {
        let (svc, records) = service(Arc::new(CountingAssets::default()));
        let rec = svc.create(draft("Monitor")).await.unwrap();
        assert_eq!(rec.photo_ref, "/images/asset0.png");
        assert_eq!(records.list().await, vec![rec]);
    }

    #[tokio::test]
    async fn failed_write_creates_no_record() {
        let assets = Arc::new(CountingAssets {
            fail: true,
            ..CountingAssets::default()
        });
        let (svc, records) = service(assets);

        let err = svc.create(draft("Monitor")).await.unwrap_err();
        assert!(matches!(err, CatalogError::AssetWrite(_)));
        assert!(records.is_empty().await);
    }

    #[tokio::test]
    async fn undecodable_photo_is_a_write_failure() {
        let (svc, records) = service(Arc::new(CountingAssets::default()));
        let mut d = draft("Monitor");
        d.photo = "data:image/png;base64".to_owned();

        let err = svc.create(d).await.unwrap_err();
        assert!(matches!(err, CatalogError::AssetWrite(AssetError::Image(_))));
        assert!(records.is_empty().await);
    }

    #[tokio::test]
    async fn validation_runs_before_any_write() {
        let assets = Arc::new(CountingAssets::default());
        let (svc, _) = service(Arc::clone(&assets));

        let mut d = draft("");
        assert!(matches!(
            svc.create(d.clone()).await,
            Err(CatalogError::Validation(ValidationError::MissingField("name")))
        ));
        d = draft("ok");
        d.photo = "   ".to_owned();
        assert!(matches!(
            svc.create(d).await,
            Err(CatalogError::Validation(ValidationError::MissingField("photo")))
        ));
        assert_eq!(assets.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_unknown_id_writes_nothing() {
        let assets = Arc::new(CountingAssets::default());
        let (svc, records) = service(Arc::clone(&assets));
        svc.create(draft("a")).await.unwrap();
        let before = records.list().await;

        let err = svc.update("nope", draft("b")).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(id) if id == "nope"));
        assert_eq!(records.list().await, before);
        assert_eq!(assets.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn update_replaces_photo_with_a_new_asset() {
        let (svc, _) = service(Arc::new(CountingAssets::default()));
        let rec = svc.create(draft("a")).await.unwrap();

        let mut d = draft("a2");
        d.photo = "data:image/jpeg;base64,aGVsbG8=".to_owned();
        let updated = svc.update(&rec.id, d).await.unwrap();

        assert_eq!(updated.id, rec.id);
        assert_eq!(updated.name, "a2");
        assert_eq!(updated.photo_ref, "/images/asset1.jpeg");
        assert_ne!(updated.photo_ref, rec.photo_ref);
    }

    /// Record store whose records disappear between lookup and commit, as
    /// when a delete lands in the middle of an update.
    struct VanishingRecords;

    #[async_trait]
    impl RecordStore for VanishingRecords {
        async fn list(&self) -> Vec<ProductRecord> {
            Vec::new()
        }

        async fn get(&self, id: &str) -> Option<ProductRecord> {
            Some(ProductRecord::with_id(
                id,
                ProductFields::new("old", "desc", Price::from(1)),
                "/images/old.png",
            ))
        }

        async fn create(&self, fields: ProductFields, photo_ref: String) -> ProductRecord {
            ProductRecord::new(fields, photo_ref)
        }

        async fn update(
            &self,
            id: &str,
            _fields: ProductFields,
            _photo_ref: String,
        ) -> Result<ProductRecord, StoreError> {
            Err(StoreError::NotFound(id.to_owned()))
        }

        async fn delete(&self, _id: &str) -> bool {
            false
        }

        async fn len(&self) -> usize {
            0
        }
    }

    #[tokio::test]
    async fn update_racing_delete_is_not_found_and_keeps_the_orphan() {
        let assets = Arc::new(CountingAssets::default());
        let svc = CatalogService::new(
            Arc::new(VanishingRecords),
            Arc::clone(&assets) as Arc<dyn AssetStore>,
        );

        let err = svc.update("gone", draft("b")).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(id) if id == "gone"));
        // The photo was written before the commit failed and is not removed.
        assert_eq!(assets.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn update_requires_id() {
        let (svc, _) = service(Arc::new(CountingAssets::default()));
        assert!(matches!(
            svc.update(" ", draft("a")).await,
            Err(CatalogError::Validation(ValidationError::MissingField("id")))
        ));
    }

    #[tokio::test]
    async fn delete_is_always_ok() {
        let (svc, records) = service(Arc::new(CountingAssets::default()));
        let rec = svc.create(draft("a")).await.unwrap();
        assert!(!svc.delete("unknown").await);
        assert_eq!(records.len().await, 1);
        assert!(svc.delete(&rec.id).await);
        assert_eq!(svc.count().await, 0);
    }

    #[tokio::test]
    async fn image_errors_are_classified() {
        let (svc, _) = service(Arc::new(CountingAssets::default()));
        assert!(matches!(
            svc.image("a/b").await,
            Err(CatalogError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            svc.image("missing").await,
            Err(CatalogError::AssetRead(AssetError::NotFound(_)))
        ));
    }
}
