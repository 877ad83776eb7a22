//! Outbound adapters implementing domain ports.

pub mod mongo;

pub use mongo::{MongoStoreConfig, MongoSubscriberStore};
