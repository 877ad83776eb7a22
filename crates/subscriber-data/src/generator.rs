//! Deterministic subscriber generation from a template and IMSI range.
//!
//! Generation is lazy: each record is built when the iterator is advanced and
//! owned by the caller from then on, so a batch never holds every record in
//! memory at once. The same template and range always produce the same
//! sequence.

use crate::imsi::{ImsiIter, ImsiRange};
use crate::record::SubscriberRecord;
use crate::template::SubscriberTemplate;

/// Generates one record per identifier in `range`.
///
/// Record `n` carries `range.first() + n` in its identifier fields; every
/// other field is a copy of `template`.
///
/// # Example
///
/// ```
/// use subscriber_data::{CoreNetwork, ImsiRange, SubscriberTemplate, generate_subscribers};
///
/// let template = SubscriberTemplate::for_core(CoreNetwork::Free5gc);
/// let range = ImsiRange::parse("100100000000001", 3).expect("valid range");
///
/// let imsis: Vec<String> = generate_subscribers(&template, range)
///     .map(|record| record.imsi().to_owned())
///     .collect();
///
/// assert_eq!(
///     imsis,
///     ["100100000000001", "100100000000002", "100100000000003"]
/// );
/// ```
#[must_use]
pub fn generate_subscribers(
    template: &SubscriberTemplate,
    range: ImsiRange,
) -> SubscriberRecords<'_> {
    SubscriberRecords {
        template,
        imsis: range.iter(),
    }
}

/// Lazy iterator returned by [`generate_subscribers`].
#[derive(Debug, Clone)]
pub struct SubscriberRecords<'a> {
    template: &'a SubscriberTemplate,
    imsis: ImsiIter,
}

impl Iterator for SubscriberRecords<'_> {
    type Item = SubscriberRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.imsis
            .next()
            .map(|imsi| SubscriberRecord::from_template(self.template, imsi))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.imsis.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::template::CoreNetwork;

    fn without_identifiers(record: &SubscriberRecord) -> Value {
        let mut value = serde_json::to_value(record).expect("serialize");
        if let Some(fields) = value.as_object_mut() {
            fields.remove("imsi");
            fields.remove("ueId");
        }
        value
    }

    #[test]
    fn identifiers_follow_base_plus_offset() {
        let template = SubscriberTemplate::for_core(CoreNetwork::Free5gc);
        let range = ImsiRange::parse("001010000000098", 4).expect("valid range");

        let imsis: Vec<String> = generate_subscribers(&template, range)
            .map(|record| record.imsi().to_owned())
            .collect();

        assert_eq!(
            imsis,
            [
                "001010000000098",
                "001010000000099",
                "001010000000100",
                "001010000000101"
            ]
        );
    }

    #[rstest]
    #[case(CoreNetwork::Free5gc)]
    #[case(CoreNetwork::Open5gs)]
    fn non_identifier_fields_are_identical(#[case] core: CoreNetwork) {
        let template = SubscriberTemplate::for_core(core);
        let range = ImsiRange::parse("100100000000001", 25).expect("valid range");
        let records: Vec<SubscriberRecord> = generate_subscribers(&template, range).collect();
        let first = records.first().map(without_identifiers).expect("records");

        for record in &records {
            assert_eq!(without_identifiers(record), first);
        }
    }

    #[test]
    fn thousand_records_have_distinct_identifiers() {
        let template = SubscriberTemplate::for_core(CoreNetwork::Free5gc);
        let range = ImsiRange::parse("100100000000001", 1000).expect("valid range");

        let imsis: HashSet<String> = generate_subscribers(&template, range)
            .map(|record| record.imsi().to_owned())
            .collect();

        let expected: HashSet<String> = (100_100_000_000_001_u64..=100_100_000_001_000)
            .map(|value| format!("{value:015}"))
            .collect();
        assert_eq!(imsis, expected);
    }

    #[test]
    fn generation_is_repeatable() {
        let template = SubscriberTemplate::for_core(CoreNetwork::Open5gs);
        let range = ImsiRange::parse("001010000000010", 5).expect("valid range");

        let first: Vec<_> = generate_subscribers(&template, range).collect();
        let second: Vec<_> = generate_subscribers(&template, range).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn size_hint_matches_range() {
        let template = SubscriberTemplate::for_core(CoreNetwork::Free5gc);
        let range = ImsiRange::parse("100100000000001", 7).expect("valid range");

        assert_eq!(
            generate_subscribers(&template, range).size_hint(),
            (7, Some(7))
        );
    }
}
