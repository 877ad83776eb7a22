//! Port abstraction for the subscriber collection store.
//!
//! The seeder only needs single-document inserts and deletes keyed by IMSI.
//! Adapters classify store failures so callers can tell identifier collisions
//! apart from an unreachable store.

use async_trait::async_trait;
use subscriber_data::{Imsi, SubscriberRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by subscriber store adapters.
    pub enum SubscriberStoreError {
        /// A subscriber with this IMSI already exists.
        DuplicateIdentifier { imsi: String } => "subscriber {imsi} already exists",
        /// The store could not be reached or did not answer in time.
        Connectivity { message: String } => "subscriber store unreachable: {message}",
        /// The store refused the request for another reason.
        Rejected { message: String } => "subscriber store rejected the request: {message}",
    }
}

/// Outcome of deleting a subscriber by IMSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// A matching document was removed.
    Deleted,
    /// No document had the IMSI.
    NotFound,
}

/// Port for writing subscriber documents to a collection.
///
/// Implementations must:
/// - Reject an insert whose IMSI is already present with
///   [`SubscriberStoreError::DuplicateIdentifier`].
/// - Report unreachable stores and timeouts as
///   [`SubscriberStoreError::Connectivity`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Insert one subscriber document.
    async fn insert_one(&self, record: &SubscriberRecord) -> Result<(), SubscriberStoreError>;

    /// Delete the subscriber document with the given IMSI, if any.
    async fn delete_one(&self, imsi: Imsi) -> Result<DeleteOutcome, SubscriberStoreError>;
}
