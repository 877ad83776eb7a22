//! Removal of previously seeded subscribers.
//!
//! Deletes one document per IMSI in a range, sequentially, and keeps going
//! after failures so a partially seeded range can be cleaned in one pass.

use std::sync::Arc;

use subscriber_data::ImsiRange;
use tracing::{debug, info, warn};

use crate::domain::SeedingError;
use crate::domain::SubscriberFailure;
use crate::domain::ports::{DeleteOutcome, SubscriberStore};

/// Outcome of a purge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeReport {
    /// Number of IMSIs in the range.
    pub requested: u64,
    /// Documents removed.
    pub deleted: u64,
    /// IMSIs with no matching document.
    pub missing: u64,
    /// Deletes the store refused.
    pub failures: Vec<SubscriberFailure>,
}

impl PurgeReport {
    /// True when no delete failed. Missing documents are not failures.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Service that deletes subscribers through the store port.
#[derive(Clone)]
pub struct SubscriberPurger<S> {
    store: Arc<S>,
}

impl<S> SubscriberPurger<S> {
    /// Create a purger over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> SubscriberPurger<S>
where
    S: SubscriberStore,
{
    /// Validate `base` and `count`, then delete every IMSI in the range.
    ///
    /// # Errors
    ///
    /// Returns [`SeedingError::Validation`] before touching the store when the
    /// range is invalid.
    pub async fn purge(&self, base: &str, count: u64) -> Result<PurgeReport, SeedingError> {
        let range = ImsiRange::parse(base, count)?;
        Ok(self.purge_range(range).await)
    }

    /// Delete the subscriber for each IMSI in `range`.
    pub async fn purge_range(&self, range: ImsiRange) -> PurgeReport {
        let mut report = PurgeReport {
            requested: range.len(),
            ..PurgeReport::default()
        };
        info!(
            first_imsi = %range.first(),
            requested = report.requested,
            "purging subscribers"
        );

        for imsi in range {
            match self.store.delete_one(imsi).await {
                Ok(DeleteOutcome::Deleted) => {
                    debug!(%imsi, "subscriber deleted");
                    report.deleted += 1;
                }
                Ok(DeleteOutcome::NotFound) => {
                    debug!(%imsi, "subscriber not found");
                    report.missing += 1;
                }
                Err(error) => {
                    warn!(%imsi, %error, "subscriber delete failed");
                    report.failures.push(SubscriberFailure {
                        imsi: imsi.to_string(),
                        error,
                    });
                }
            }
        }

        info!(
            deleted = report.deleted,
            missing = report.missing,
            failed = report.failures.len(),
            "purge finished"
        );
        report
    }
}
