//! Domain ports implemented by outbound adapters.

mod macros;
mod subscriber_store;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use subscriber_store::MockSubscriberStore;
pub use subscriber_store::{DeleteOutcome, SubscriberStore, SubscriberStoreError};
