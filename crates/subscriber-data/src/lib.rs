//! Deterministic 5G core subscriber record generation.
//!
//! This crate builds the subscriber documents a mobile core reads from its
//! subscriber database. It is independent of any database client so the
//! seeder can persist records through whichever store adapter it wires in.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Parsing fixed-width IMSIs and contiguous IMSI ranges
//! - Built-in free5GC and Open5GS subscriber templates
//! - Loading templates from versioned JSON files
//! - Lazy, repeatable record generation (one record per IMSI)
//! - Rendering UERANSIM UE configuration files for the same range
//!
//! # Example
//!
//! ```
//! use subscriber_data::{CoreNetwork, ImsiRange, SubscriberTemplate, generate_subscribers};
//!
//! let template = SubscriberTemplate::for_core(CoreNetwork::Free5gc);
//! let range = ImsiRange::parse("100100000000001", 3).expect("valid range");
//!
//! let records: Vec<_> = generate_subscribers(&template, range).collect();
//!
//! assert_eq!(records.len(), 3);
//! assert_eq!(records[2].imsi(), "100100000000003");
//! ```

mod atomic_io;
mod error;
mod generator;
mod imsi;
pub mod profile;
mod record;
mod template;
mod ue_config;

pub use error::{IdentifierError, TemplateError, UeConfigError};
pub use generator::{SubscriberRecords, generate_subscribers};
pub use imsi::{IMSI_WIDTH, Imsi, ImsiIter, ImsiRange};
pub use record::{Free5gcSubscriber, Open5gsSubscriber, SubscriberRecord};
pub use template::{CoreNetwork, SubscriberTemplate};
pub use ue_config::{UeConfigTemplate, supi_for, write_ue_configs};
