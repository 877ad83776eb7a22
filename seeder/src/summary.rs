//! One-line run summaries printed on stdout.

use crate::domain::{InsertionReport, PurgeReport};

/// Summarise a seeding batch.
///
/// # Examples
///
/// ```rust
/// use seeder::domain::InsertionReport;
/// use seeder::summary::seed_summary;
///
/// let report = InsertionReport {
///     requested: 3,
///     succeeded: 3,
///     ..InsertionReport::default()
/// };
/// assert_eq!(seed_summary(&report), "inserted 3 subscribers");
/// ```
pub fn seed_summary(report: &InsertionReport) -> String {
    if report.is_success() {
        return format!("inserted {} subscribers", report.succeeded);
    }
    let mut line = format!(
        "inserted {} of {} subscribers: {} failed, {} skipped",
        report.succeeded,
        report.requested,
        report.failed(),
        report.skipped()
    );
    if let Some(reason) = report.halt {
        line.push_str(&format!(" (halted: {reason})"));
    }
    line
}

/// Summarise a purge run.
pub fn purge_summary(report: &PurgeReport) -> String {
    format!(
        "deleted {} of {} subscribers: {} not found, {} failed",
        report.deleted,
        report.requested,
        report.missing,
        report.failures.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::SubscriberStoreError;
    use crate::domain::{HaltReason, SubscriberFailure};
    use rstest::rstest;

    fn failure(imsi: &str) -> SubscriberFailure {
        SubscriberFailure {
            imsi: imsi.to_owned(),
            error: SubscriberStoreError::duplicate_identifier(imsi),
        }
    }

    #[rstest]
    fn failed_batches_report_counts() {
        let report = InsertionReport {
            requested: 5,
            succeeded: 3,
            failures: vec![failure("100100000000002"), failure("100100000000004")],
            halt: None,
        };

        assert_eq!(
            seed_summary(&report),
            "inserted 3 of 5 subscribers: 2 failed, 0 skipped"
        );
    }

    #[rstest]
    fn halted_batches_name_the_reason() {
        let report = InsertionReport {
            requested: 5,
            succeeded: 0,
            failures: vec![failure("100100000000001")],
            halt: Some(HaltReason::FirstFailure),
        };

        assert_eq!(
            seed_summary(&report),
            "inserted 0 of 5 subscribers: 1 failed, 4 skipped (halted: first failure)"
        );
    }

    #[rstest]
    fn purge_summary_separates_missing_from_failed() {
        let report = PurgeReport {
            requested: 4,
            deleted: 2,
            missing: 1,
            failures: vec![failure("100100000000004")],
        };

        assert_eq!(
            purge_summary(&report),
            "deleted 2 of 4 subscribers: 1 not found, 1 failed"
        );
    }
}
