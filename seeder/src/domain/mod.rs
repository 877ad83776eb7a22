//! Domain services and the ports they depend on.

pub mod ports;
mod purge;
mod seeding;

pub use purge::{PurgeReport, SubscriberPurger};
pub use seeding::{
    FailurePolicy, HaltReason, InsertionReport, SeedingError, SeedingOptions, SubscriberFailure,
    SubscriberSeeder, UnknownFailurePolicy,
};
