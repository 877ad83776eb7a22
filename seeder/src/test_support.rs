//! Test utilities for the seeder crate.
//!
//! Only compiled with the `test-support` feature. Integration tests use the
//! in-memory store to exercise seeding and purging without a MongoDB server.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use subscriber_data::{Imsi, SubscriberRecord};

use crate::domain::ports::{DeleteOutcome, SubscriberStore, SubscriberStoreError};

/// Subscriber store holding documents in memory, keyed by IMSI.
///
/// Mirrors a collection with a unique index on `imsi`: inserting an existing
/// IMSI fails with [`SubscriberStoreError::DuplicateIdentifier`].
#[derive(Debug, Default)]
pub struct InMemorySubscriberStore {
    documents: Mutex<BTreeMap<String, Value>>,
    unreachable: AtomicBool,
    insert_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl InMemorySubscriberStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a connectivity error.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents().len()
    }

    /// True when no documents are stored.
    pub fn is_empty(&self) -> bool {
        self.documents().is_empty()
    }

    /// Stored IMSIs in ascending order.
    pub fn imsis(&self) -> Vec<String> {
        self.documents().keys().cloned().collect()
    }

    /// Stored document for `imsi`, if any.
    pub fn document(&self, imsi: &str) -> Option<Value> {
        self.documents().get(imsi).cloned()
    }

    /// Number of insert calls received, including failed ones.
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Number of delete calls received, including failed ones.
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn documents(&self) -> MutexGuard<'_, BTreeMap<String, Value>> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_reachable(&self) -> Result<(), SubscriberStoreError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(SubscriberStoreError::connectivity(
                "in-memory store marked unreachable",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SubscriberStore for InMemorySubscriberStore {
    async fn insert_one(&self, record: &SubscriberRecord) -> Result<(), SubscriberStoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_reachable()?;
        let document = serde_json::to_value(record)
            .map_err(|error| SubscriberStoreError::rejected(error.to_string()))?;

        let mut documents = self.documents();
        if documents.contains_key(record.imsi()) {
            return Err(SubscriberStoreError::duplicate_identifier(record.imsi()));
        }
        documents.insert(record.imsi().to_owned(), document);
        Ok(())
    }

    async fn delete_one(&self, imsi: Imsi) -> Result<DeleteOutcome, SubscriberStoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_reachable()?;
        Ok(match self.documents().remove(&imsi.to_string()) {
            Some(_) => DeleteOutcome::Deleted,
            None => DeleteOutcome::NotFound,
        })
    }
}
