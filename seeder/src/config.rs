//! Seeder configuration loaded via OrthoConfig.
//!
//! Values come from `SUBSCRIBER_SEEDER_*` environment variables or a
//! discovered configuration file. Command-line flags override them; see
//! [`crate::cli`].

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Default MongoDB connection string.
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
/// Default core flavour.
pub const DEFAULT_CORE: &str = "free5gc";
/// First IMSI of the default range.
pub const DEFAULT_BASE_IMSI: &str = "100100000000001";
/// Default number of subscribers.
pub const DEFAULT_COUNT: u64 = 1000;
/// Default failure policy name.
pub const DEFAULT_FAILURE_POLICY: &str = "continue-on-error";
/// Default bound on in-flight inserts.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 1;
/// Default per-operation store timeout in milliseconds.
pub const DEFAULT_INSERT_TIMEOUT_MS: u64 = 5_000;

/// Configuration values for seeding, purging and UE config generation.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SUBSCRIBER_SEEDER")]
pub struct SeederSettings {
    /// MongoDB connection string.
    pub mongo_uri: Option<String>,
    /// Database override; defaults to the core's database.
    pub database: Option<String>,
    /// Collection override; defaults to the core's collection.
    pub collection: Option<String>,
    /// Core flavour, `free5gc` or `open5gs`.
    pub core: Option<String>,
    /// First IMSI of the range.
    pub base_imsi: Option<String>,
    /// Number of subscribers in the range.
    pub count: Option<u64>,
    /// `continue-on-error` or `abort-on-first-error`.
    pub failure_policy: Option<String>,
    /// Upper bound on inserts awaiting acknowledgement.
    pub max_in_flight: Option<usize>,
    /// Overall deadline for a seeding batch, in seconds.
    pub deadline_secs: Option<u64>,
    /// Per-operation store timeout, in milliseconds.
    pub insert_timeout_ms: Option<u64>,
    /// Subscriber template file; the built-in template is used when unset.
    pub template_path: Option<PathBuf>,
}

impl SeederSettings {
    /// Return the configured connection string, falling back to the default.
    pub fn mongo_uri(&self) -> &str {
        self.mongo_uri.as_deref().unwrap_or(DEFAULT_MONGO_URI)
    }

    /// Return the configured core name, falling back to the default.
    pub fn core(&self) -> &str {
        self.core.as_deref().unwrap_or(DEFAULT_CORE)
    }

    /// Return the configured base IMSI, falling back to the default.
    pub fn base_imsi(&self) -> &str {
        self.base_imsi.as_deref().unwrap_or(DEFAULT_BASE_IMSI)
    }

    /// Return the configured count, falling back to the default.
    pub fn count(&self) -> u64 {
        self.count.unwrap_or(DEFAULT_COUNT)
    }

    /// Return the configured failure policy name, falling back to the default.
    pub fn failure_policy(&self) -> &str {
        self.failure_policy
            .as_deref()
            .unwrap_or(DEFAULT_FAILURE_POLICY)
    }

    /// Return the configured in-flight bound, falling back to the default.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.unwrap_or(DEFAULT_MAX_IN_FLIGHT)
    }

    /// Return the configured store timeout, falling back to the default.
    pub fn insert_timeout_ms(&self) -> u64 {
        self.insert_timeout_ms.unwrap_or(DEFAULT_INSERT_TIMEOUT_MS)
    }
}
