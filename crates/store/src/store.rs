use async_trait::async_trait;

use catalog_core::{ProductFields, ProductRecord};

use crate::error::StoreError;

/// The authoritative set of product records.
///
/// Implementations must be `Send + Sync` and serialize mutations so that
/// concurrent create/update/delete calls never lose a write.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All live records in insertion order.
    async fn list(&self) -> Vec<ProductRecord>;

    /// Look up a single record.
    async fn get(&self, id: &str) -> Option<ProductRecord>;

    /// Append a new record with a freshly generated identifier and return it.
    ///
    /// `photo_ref` must point at an asset that has already been written.
    async fn create(&self, fields: ProductFields, photo_ref: String) -> ProductRecord;

    /// Replace the record with `id` in full, keeping its position.
    ///
    /// Returns [`StoreError::NotFound`] and leaves the store untouched when
    /// no record has that identifier.
    async fn update(
        &self,
        id: &str,
        fields: ProductFields,
        photo_ref: String,
    ) -> Result<ProductRecord, StoreError>;

    /// Remove the record with `id`. Returns `true` if one was removed;
    /// deleting an unknown id is a no-op.
    async fn delete(&self, id: &str) -> bool;

    /// Number of live records.
    async fn len(&self) -> usize;

    /// Return true if the store holds no records.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
