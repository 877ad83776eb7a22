//! Subscriber seeding orchestration.
//!
//! Expands a base IMSI and count into generated subscriber records and submits
//! them to the store port as an ordered stream with a bounded number of
//! in-flight inserts. Failures are collected into an [`InsertionReport`]
//! according to the configured [`FailurePolicy`].

use std::fmt;
use std::num::NonZeroUsize;
use std::pin::pin;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{StreamExt, stream};
use subscriber_data::{IdentifierError, ImsiRange, SubscriberTemplate, generate_subscribers};
use thiserror::Error;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

use crate::domain::ports::{SubscriberStore, SubscriberStoreError};

/// How a batch reacts to a failed insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure and keep inserting the remaining records.
    #[default]
    ContinueOnError,
    /// Stop submitting records after the first failure.
    AbortOnFirstError,
}

impl FailurePolicy {
    /// Return the policy name used in configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContinueOnError => "continue-on-error",
            Self::AbortOnFirstError => "abort-on-first-error",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a failure policy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown failure policy '{value}'; expected continue-on-error or abort-on-first-error")]
pub struct UnknownFailurePolicy {
    /// Rejected input.
    pub value: String,
}

impl FromStr for FailurePolicy {
    type Err = UnknownFailurePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue-on-error" | "continue" => Ok(Self::ContinueOnError),
            "abort-on-first-error" | "abort" | "fail-fast" => Ok(Self::AbortOnFirstError),
            _ => Err(UnknownFailurePolicy {
                value: s.to_owned(),
            }),
        }
    }
}

/// Runtime options for a seeding batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedingOptions {
    /// Reaction to failed inserts.
    pub failure_policy: FailurePolicy,
    /// Upper bound on inserts awaiting acknowledgement.
    pub max_in_flight: NonZeroUsize,
    /// Overall deadline for the batch.
    pub deadline: Option<Duration>,
}

impl Default for SeedingOptions {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            max_in_flight: NonZeroUsize::MIN,
            deadline: None,
        }
    }
}

/// Why a batch stopped before submitting every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// An insert failed under [`FailurePolicy::AbortOnFirstError`].
    FirstFailure,
    /// The overall deadline elapsed.
    DeadlineExceeded,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstFailure => f.write_str("first failure"),
            Self::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

/// A store call that failed for one subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberFailure {
    /// IMSI of the affected subscriber.
    pub imsi: String,
    /// Classified store error.
    pub error: SubscriberStoreError,
}

/// Outcome of a seeding batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertionReport {
    /// Number of records the range asked for.
    pub requested: u64,
    /// Inserts acknowledged by the store.
    pub succeeded: u64,
    /// Inserts the store refused, in submission order.
    pub failures: Vec<SubscriberFailure>,
    /// Set when the batch stopped early.
    pub halt: Option<HaltReason>,
}

impl InsertionReport {
    fn new(requested: u64) -> Self {
        Self {
            requested,
            ..Self::default()
        }
    }

    /// Number of failed inserts.
    pub fn failed(&self) -> u64 {
        self.failures.len() as u64
    }

    /// Inserts that reached a final outcome.
    pub fn submitted(&self) -> u64 {
        self.succeeded + self.failed()
    }

    /// Records never acknowledged because the batch halted.
    pub fn skipped(&self) -> u64 {
        self.requested.saturating_sub(self.submitted())
    }

    /// True when every requested record was inserted.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.halt.is_none() && self.skipped() == 0
    }
}

/// Errors raised before any store call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedingError {
    /// Base IMSI or count does not describe a valid range.
    #[error("invalid subscriber range: {0}")]
    Validation(#[from] IdentifierError),
}

/// Service that generates subscribers and inserts them through the store port.
#[derive(Clone)]
pub struct SubscriberSeeder<S> {
    store: Arc<S>,
    options: SeedingOptions,
}

impl<S> SubscriberSeeder<S> {
    /// Create a seeder over the given store.
    pub fn new(store: Arc<S>, options: SeedingOptions) -> Self {
        Self { store, options }
    }

    /// Options applied to each batch.
    pub fn options(&self) -> SeedingOptions {
        self.options
    }
}

impl<S> SubscriberSeeder<S>
where
    S: SubscriberStore,
{
    /// Validate `base` and `count`, then insert the generated records.
    ///
    /// # Errors
    ///
    /// Returns [`SeedingError::Validation`] when the base IMSI is malformed or
    /// the range passes the largest IMSI. No insert is attempted in that case;
    /// store failures are reported in the [`InsertionReport`] instead.
    pub async fn seed(
        &self,
        base: &str,
        count: u64,
        template: &SubscriberTemplate,
    ) -> Result<InsertionReport, SeedingError> {
        let range = ImsiRange::parse(base, count)?;
        Ok(self.generate_and_insert(template, range).await)
    }

    /// Insert one record per IMSI in `range`.
    pub async fn generate_and_insert(
        &self,
        template: &SubscriberTemplate,
        range: ImsiRange,
    ) -> InsertionReport {
        let mut report = InsertionReport::new(range.len());
        if range.is_empty() {
            info!(requested = 0, "no subscribers requested");
            return report;
        }

        info!(
            core = %template.core(),
            first_imsi = %range.first(),
            requested = report.requested,
            max_in_flight = self.options.max_in_flight.get(),
            failure_policy = %self.options.failure_policy,
            "seeding subscribers"
        );

        let store = &self.store;
        let mut inserts = pin!(
            stream::iter(generate_subscribers(template, range))
                .map(|record| {
                    let store = Arc::clone(store);
                    async move {
                        let outcome = store.insert_one(&record).await;
                        (record.imsi().to_owned(), outcome)
                    }
                })
                .buffered(self.options.max_in_flight.get())
        );
        // A budget past the clock's range means no deadline.
        let deadline = self
            .options
            .deadline
            .and_then(|budget| Instant::now().checked_add(budget));

        loop {
            let next = match deadline {
                Some(deadline) => match timeout_at(deadline, inserts.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        report.halt = Some(HaltReason::DeadlineExceeded);
                        break;
                    }
                },
                None => inserts.next().await,
            };
            let Some((imsi, outcome)) = next else {
                break;
            };

            match outcome {
                Ok(()) => {
                    debug!(%imsi, "subscriber inserted");
                    report.succeeded += 1;
                }
                Err(error) => {
                    warn!(%imsi, %error, "subscriber insert failed");
                    report.failures.push(SubscriberFailure { imsi, error });
                    if self.options.failure_policy == FailurePolicy::AbortOnFirstError {
                        report.halt = Some(HaltReason::FirstFailure);
                        break;
                    }
                }
            }
        }

        info!(
            requested = report.requested,
            succeeded = report.succeeded,
            failed = report.failed(),
            skipped = report.skipped(),
            halted = ?report.halt,
            "seeding finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for seeding orchestration.

    use super::*;
    use crate::domain::ports::{DeleteOutcome, MockSubscriberStore};
    use async_trait::async_trait;
    use rstest::rstest;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use subscriber_data::{CoreNetwork, Imsi, SubscriberRecord};

    fn template() -> SubscriberTemplate {
        SubscriberTemplate::for_core(CoreNetwork::Free5gc)
    }

    fn options(policy: FailurePolicy) -> SeedingOptions {
        SeedingOptions {
            failure_policy: policy,
            ..SeedingOptions::default()
        }
    }

    #[rstest]
    #[case("continue-on-error", FailurePolicy::ContinueOnError)]
    #[case("Abort-On-First-Error", FailurePolicy::AbortOnFirstError)]
    #[case(" fail-fast ", FailurePolicy::AbortOnFirstError)]
    fn failure_policy_parses_known_names(#[case] input: &str, #[case] expected: FailurePolicy) {
        assert_eq!(input.parse::<FailurePolicy>(), Ok(expected));
    }

    #[rstest]
    fn failure_policy_rejects_unknown_names() {
        let err = "retry".parse::<FailurePolicy>().expect_err("unknown policy");
        assert_eq!(err.value, "retry");
    }

    #[rstest]
    #[tokio::test]
    async fn inserts_each_identifier_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut store = MockSubscriberStore::new();
        store
            .expect_insert_one()
            .times(3)
            .returning(move |record| {
                sink.lock()
                    .expect("lock")
                    .push(record.imsi().to_owned());
                Ok(())
            });

        let seeder = SubscriberSeeder::new(Arc::new(store), SeedingOptions::default());
        let report = seeder
            .seed("100100000000001", 3, &template())
            .await
            .expect("valid range");

        assert!(report.is_success());
        assert_eq!(report.succeeded, 3);
        assert_eq!(
            *seen.lock().expect("lock"),
            ["100100000000001", "100100000000002", "100100000000003"]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn zero_count_makes_no_store_calls() {
        let mut store = MockSubscriberStore::new();
        store.expect_insert_one().times(0);

        let seeder = SubscriberSeeder::new(Arc::new(store), SeedingOptions::default());
        let report = seeder
            .seed("100100000000001", 0, &template())
            .await
            .expect("empty range is valid");

        assert!(report.is_success());
        assert_eq!(report.submitted(), 0);
    }

    #[rstest]
    #[case("10010000000000x")]
    #[case("1001")]
    #[case("999999999999999")]
    #[tokio::test]
    async fn invalid_ranges_are_rejected_before_inserting(#[case] base: &str) {
        let mut store = MockSubscriberStore::new();
        store.expect_insert_one().times(0);

        let seeder = SubscriberSeeder::new(Arc::new(store), SeedingOptions::default());
        let error = seeder
            .seed(base, 2, &template())
            .await
            .expect_err("range should be rejected");

        assert!(matches!(error, SeedingError::Validation(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn continue_on_error_collects_every_failure() {
        let mut store = MockSubscriberStore::new();
        store.expect_insert_one().times(4).returning(|record| {
            if record.imsi().ends_with('2') || record.imsi().ends_with('4') {
                Err(SubscriberStoreError::duplicate_identifier(record.imsi()))
            } else {
                Ok(())
            }
        });

        let seeder = SubscriberSeeder::new(
            Arc::new(store),
            options(FailurePolicy::ContinueOnError),
        );
        let report = seeder
            .seed("100100000000001", 4, &template())
            .await
            .expect("valid range");

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.skipped(), 0);
        assert_eq!(report.halt, None);
        assert_eq!(report.failures[0].imsi, "100100000000002");
        assert!(!report.is_success());
    }

    #[rstest]
    #[tokio::test]
    async fn abort_on_first_error_stops_submitting() {
        let mut store = MockSubscriberStore::new();
        store
            .expect_insert_one()
            .times(1)
            .returning(|_| Err(SubscriberStoreError::connectivity("connection refused")));

        let seeder = SubscriberSeeder::new(
            Arc::new(store),
            options(FailurePolicy::AbortOnFirstError),
        );
        let report = seeder
            .seed("100100000000001", 5, &template())
            .await
            .expect("valid range");

        assert_eq!(report.halt, Some(HaltReason::FirstFailure));
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 4);
        assert!(matches!(
            report.failures[0].error,
            SubscriberStoreError::Connectivity { .. }
        ));
    }

    struct SlowStore {
        delay: Duration,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl SlowStore {
        fn new(delay: Duration) -> Self {
            Self {
                delay,
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SubscriberStore for SlowStore {
        async fn insert_one(&self, _record: &SubscriberRecord) -> Result<(), SubscriberStoreError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }

        async fn delete_one(&self, _imsi: Imsi) -> Result<DeleteOutcome, SubscriberStoreError> {
            Ok(DeleteOutcome::NotFound)
        }
    }

    #[rstest]
    #[tokio::test]
    async fn in_flight_inserts_never_exceed_the_bound() {
        let store = Arc::new(SlowStore::new(Duration::from_millis(5)));
        let max_in_flight = NonZeroUsize::new(3).expect("non-zero");
        let seeder = SubscriberSeeder::new(
            Arc::clone(&store),
            SeedingOptions {
                max_in_flight,
                ..SeedingOptions::default()
            },
        );

        let report = seeder
            .seed("100100000000001", 12, &template())
            .await
            .expect("valid range");

        assert!(report.is_success());
        assert_eq!(report.succeeded, 12);
        let peak = store.peak.load(Ordering::SeqCst);
        assert!(peak <= 3, "peak in-flight inserts was {peak}");
        assert!(peak > 1, "inserts should overlap");
    }

    #[rstest]
    #[tokio::test]
    async fn deadline_halts_a_stalled_batch() {
        let store = Arc::new(SlowStore::new(Duration::from_secs(30)));
        let seeder = SubscriberSeeder::new(
            store,
            SeedingOptions {
                deadline: Some(Duration::from_millis(20)),
                ..SeedingOptions::default()
            },
        );

        let report = seeder
            .seed("100100000000001", 3, &template())
            .await
            .expect("valid range");

        assert_eq!(report.halt, Some(HaltReason::DeadlineExceeded));
        assert_eq!(report.submitted(), 0);
        assert_eq!(report.skipped(), 3);
        assert!(!report.is_success());
    }

    #[rstest]
    #[tokio::test]
    async fn unrepresentable_deadline_runs_without_one() {
        let mut store = MockSubscriberStore::new();
        store.expect_insert_one().times(2).returning(|_| Ok(()));
        let seeder = SubscriberSeeder::new(
            Arc::new(store),
            SeedingOptions {
                deadline: Some(Duration::from_secs(u64::MAX)),
                ..SeedingOptions::default()
            },
        );

        let report = seeder
            .seed("100100000000001", 2, &template())
            .await
            .expect("valid range");

        assert!(report.is_success());
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.halt, None);
    }
}
