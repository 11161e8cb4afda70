use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use catalog_core::{ProductFields, ProductRecord};

use crate::error::StoreError;
use crate::store::RecordStore;

/// In-memory record store backed by a single `Vec` behind an async
/// [`RwLock`].
///
/// Every mutation takes the write lock for its whole read-modify-write, so
/// concurrent requests are applied one at a time. Contents are lost when the
/// process exits.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<ProductRecord>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`, in order.
    pub fn with_records(records: Vec<ProductRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list(&self) -> Vec<ProductRecord> {
        self.records.read().await.clone()
    }

    async fn get(&self, id: &str) -> Option<ProductRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    async fn create(&self, fields: ProductFields, photo_ref: String) -> ProductRecord {
        let record = ProductRecord::new(fields, photo_ref);
        let mut records = self.records.write().await;
        records.push(record.clone());
        debug!(id = %record.id, total = records.len(), "record appended");
        record
    }

    async fn update(
        &self,
        id: &str,
        fields: ProductFields,
        photo_ref: String,
    ) -> Result<ProductRecord, StoreError> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;
        *slot = ProductRecord::with_id(id, fields, photo_ref);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> bool {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        let removed = records.len() != before;
        debug!(id, removed, total = records.len(), "record delete applied");
        removed
    }

    async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use catalog_core::{Price, demo_inventory};

    use super::*;

    fn fields(name: &str) -> ProductFields {
        ProductFields::new(name, "desc", Price::from(10))
    }

    #[tokio::test]
    async fn new_store_is_empty() {
        let store = MemoryRecordStore::new();
        assert!(store.is_empty().await);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn create_appends_in_insertion_order() {
        let store = MemoryRecordStore::new();
        let a = store.create(fields("a"), "/images/a.png".into()).await;
        let b = store.create(fields("b"), "/images/b.png".into()).await;

        let list = store.list().await;
        assert_eq!(list, vec![a.clone(), b]);
        assert_eq!(store.get(&a.id).await, Some(a));
    }

    #[tokio::test]
    async fn update_replaces_whole_record_in_place() {
        let store = MemoryRecordStore::new();
        let a = store.create(fields("a"), "/images/a.png".into()).await;
        let b = store.create(fields("b"), "/images/b.png".into()).await;

        let updated = store
            .update(
                &a.id,
                ProductFields::new("a2", "new desc", Price::from("$5")),
                "/images/a2.jpeg".into(),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, a.id);
        assert_eq!(updated.name, "a2");
        assert_eq!(updated.description, "new desc");
        assert_eq!(updated.price, Price::from("$5"));
        assert_eq!(updated.photo_ref, "/images/a2.jpeg");

        let list = store.list().await;
        assert_eq!(list, vec![updated, b]);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_and_changes_nothing() {
        let store = MemoryRecordStore::with_records(demo_inventory());
        let before = store.list().await;

        let err = store
            .update("missing", fields("x"), "/images/x.png".into())
            .await
            .unwrap_err();

        assert_eq!(err, StoreError::NotFound("missing".into()));
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryRecordStore::new();
        let a = store.create(fields("a"), String::new()).await;

        assert!(store.delete(&a.id).await);
        assert!(!store.delete(&a.id).await);
        assert!(!store.delete("never-existed").await);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn list_after_creates_and_deletes() {
        let store = MemoryRecordStore::new();
        let mut ids = Vec::new();
        for i in 0..7 {
            ids.push(store.create(fields(&format!("p{i}")), String::new()).await.id);
        }
        for id in ids.iter().step_by(3) {
            store.delete(id).await;
        }

        let remaining: Vec<String> = store.list().await.into_iter().map(|r| r.id).collect();
        let expected: Vec<String> = ids
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 3 != 0)
            .map(|(_, id)| id.clone())
            .collect();
        assert_eq!(remaining, expected);
        assert_eq!(store.len().await, 7 - 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_are_not_lost() {
        let store = Arc::new(MemoryRecordStore::new());

        let tasks = (0..50).map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.create(fields(&format!("p{i}")), String::new()).await })
        });
        let created = futures::future::join_all(tasks).await;

        assert!(created.iter().all(Result::is_ok));
        assert_eq!(store.len().await, 50);
    }

    #[tokio::test]
    async fn with_records_preserves_seed_order() {
        let seed = demo_inventory();
        let store = MemoryRecordStore::with_records(seed.clone());
        assert_eq!(store.list().await, seed);
    }
}
