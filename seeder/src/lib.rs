//! Subscriber seeder library modules.
//!
//! The `domain` module holds the seeding and purge services and the store
//! port they drive; `outbound` holds the MongoDB adapter. The binary wires
//! them together from `cli` flags and `config` settings.

pub mod cli;
pub mod config;
pub mod domain;
pub mod outbound;
pub mod summary;

#[cfg(feature = "test-support")]
pub mod test_support;
