//! Behavioural tests for subscriber record generation.
//!
//! These tests validate IMSI derivation, template fidelity, and range
//! validation against Gherkin scenarios.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::collections::HashSet;

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::Value;
use subscriber_data::{
    CoreNetwork, IdentifierError, ImsiRange, SubscriberRecord, SubscriberTemplate,
    generate_subscribers,
};

/// Test world holding the template, base IMSI and generation outcome.
#[derive(Default, ScenarioState)]
struct World {
    template: Slot<SubscriberTemplate>,
    base_imsi: Slot<String>,
    outcome: Slot<Result<Vec<SubscriberRecord>, IdentifierError>>,
}

impl World {
    fn template(&self) -> SubscriberTemplate {
        self.template.get().expect("template should be set")
    }

    fn records(&self) -> Vec<SubscriberRecord> {
        self.outcome
            .get()
            .expect("generation should have run")
            .expect("generation should succeed")
    }

    fn error(&self) -> IdentifierError {
        match self.outcome.get().expect("generation should have run") {
            Ok(records) => panic!("expected an error, generated {} records", records.len()),
            Err(error) => error,
        }
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

fn to_json(record: &SubscriberRecord) -> Value {
    serde_json::to_value(record).expect("record serializes")
}

// ============================================================================
// Given steps
// ============================================================================

#[given("the built-in {core} template")]
fn the_built_in_template(world: &World, core: String) {
    let core: CoreNetwork = core.parse().expect("known core");
    world.template.set(SubscriberTemplate::for_core(core));
}

#[given("a base IMSI \"{base}\"")]
fn a_base_imsi(world: &World, base: String) {
    world.base_imsi.set(base);
}

// ============================================================================
// When steps
// ============================================================================

#[when("{count:u64} records are generated")]
fn records_are_generated(world: &World, count: u64) {
    let template = world.template();
    let base = world.base_imsi.get().expect("base IMSI should be set");
    let outcome = ImsiRange::parse(&base, count)
        .map(|range| generate_subscribers(&template, range).collect::<Vec<_>>());
    world.outcome.set(outcome);
}

// ============================================================================
// Then steps
// ============================================================================

#[then("the generated IMSIs are \"{imsis}\"")]
fn the_generated_imsis_are(world: &World, imsis: String) {
    let actual: Vec<String> = world
        .records()
        .iter()
        .map(|record| record.imsi().to_owned())
        .collect();
    let expected: Vec<String> = imsis.split(',').map(str::to_owned).collect();

    assert_eq!(actual, expected);
}

#[then("every record is served by PLMN \"{plmn}\"")]
fn every_record_is_served_by_plmn(world: &World, plmn: String) {
    for record in world.records() {
        assert_eq!(to_json(&record)["servingPlmnId"], Value::String(plmn.clone()));
    }
}

#[then("every record has 5QI {five_qi:u64} and ARP priority {priority:u64}")]
fn every_record_has_qos(world: &World, five_qi: u64, priority: u64) {
    for record in world.records() {
        let value = to_json(&record);
        let qos = &value["sessionManagementSubscriptionData"]["dnnConfigurations"]["internet"]
            ["qosProfile"];
        assert_eq!(qos["5qi"].as_u64(), Some(five_qi));
        assert_eq!(qos["arp"]["priorityLevel"].as_u64(), Some(priority));
    }
}

#[then("{count:u64} distinct IMSIs are generated")]
fn distinct_imsis_are_generated(world: &World, count: u64) {
    let records = world.records();
    let distinct: HashSet<&str> = records.iter().map(SubscriberRecord::imsi).collect();
    let expected = usize::try_from(count).expect("count fits in usize");

    assert_eq!(records.len(), expected);
    assert_eq!(distinct.len(), expected);
}

#[then("the last generated IMSI is \"{imsi}\"")]
fn the_last_generated_imsi_is(world: &World, imsi: String) {
    let records = world.records();
    let last = records.last().expect("at least one record");

    assert_eq!(last.imsi(), imsi);
}

#[then("all records match the template apart from the IMSI")]
fn all_records_match_the_template(world: &World) {
    let template = world.template();
    let records = world.records();
    let SubscriberTemplate::Open5gs(profile) = template else {
        panic!("scenario uses the open5gs template");
    };
    let mut expected = serde_json::to_value(profile).expect("profile serializes");

    for record in records {
        if let Some(fields) = expected.as_object_mut() {
            fields.insert("imsi".to_owned(), Value::String(record.imsi().to_owned()));
        }
        assert_eq!(to_json(&record), expected);
    }
}

#[then("no records are generated")]
fn no_records_are_generated(world: &World) {
    assert!(world.records().is_empty());
}

#[then("generation fails with a non-numeric identifier error")]
fn generation_fails_with_non_numeric(world: &World) {
    assert!(matches!(world.error(), IdentifierError::NonNumeric { .. }));
}

#[then("generation fails with a range overflow error")]
fn generation_fails_with_range_overflow(world: &World) {
    assert!(matches!(world.error(), IdentifierError::RangeOverflow { .. }));
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/subscriber_generation.feature",
    name = "Small range produces consecutive IMSIs"
)]
fn small_range_produces_consecutive_imsis(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/subscriber_generation.feature",
    name = "Full batch covers the whole range"
)]
fn full_batch_covers_the_whole_range(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/subscriber_generation.feature",
    name = "Records differ only in their identifiers"
)]
fn records_differ_only_in_their_identifiers(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/subscriber_generation.feature",
    name = "Zero records are generated for an empty range"
)]
fn zero_records_are_generated_for_an_empty_range(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/subscriber_generation.feature",
    name = "Non-numeric base IMSI is rejected"
)]
fn non_numeric_base_imsi_is_rejected(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/subscriber_generation.feature",
    name = "Range past the largest IMSI is rejected"
)]
fn range_past_the_largest_imsi_is_rejected(world: World) {
    let _ = world;
}
