//! Command-line interface for `subscriber-seeder`.
//!
//! Flags are optional and override [`SeederSettings`]; anything left unset
//! falls back to the settings and then to built-in defaults. The resolved
//! values are collected into plain request structs the binary executes.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use clap::{Args, Parser, Subcommand};
use subscriber_data::{CoreNetwork, SubscriberTemplate, TemplateError, UeConfigError};
use thiserror::Error;

use crate::config::SeederSettings;
use crate::domain::ports::SubscriberStoreError;
use crate::domain::{FailurePolicy, SeedingError, SeedingOptions, UnknownFailurePolicy};
use crate::outbound::MongoStoreConfig;

/// Default file name prefix for generated UE configurations.
pub const DEFAULT_UE_PREFIX: &str = "free5gc-ue";

/// `subscriber-seeder` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "subscriber-seeder",
    about = "Seed 5G core subscriber databases with generated subscribers",
    version
)]
pub struct Cli {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Operations supported by the binary.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Insert one subscriber per IMSI in the range.
    Seed(SeedArgs),
    /// Delete the subscriber for each IMSI in the range.
    Purge(PurgeArgs),
    /// Write one UERANSIM UE configuration file per IMSI in the range.
    UeConfigs(UeConfigArgs),
}

/// Flags selecting the target collection.
#[derive(Debug, Clone, Default, Args)]
pub struct StoreArgs {
    /// MongoDB connection string.
    #[arg(long = "mongo-uri", value_name = "uri")]
    pub mongo_uri: Option<String>,
    /// Database name; defaults to the core's database.
    #[arg(long, value_name = "name")]
    pub database: Option<String>,
    /// Collection name; defaults to the core's collection.
    #[arg(long, value_name = "name")]
    pub collection: Option<String>,
    /// Core flavour: `free5gc` or `open5gs`.
    #[arg(long, value_name = "core")]
    pub core: Option<String>,
    /// Per-operation store timeout in milliseconds.
    #[arg(long = "insert-timeout-ms", value_name = "ms")]
    pub insert_timeout_ms: Option<u64>,
}

/// Flags describing the IMSI range.
#[derive(Debug, Clone, Default, Args)]
pub struct RangeArgs {
    /// First IMSI, exactly 15 digits.
    #[arg(long = "base-imsi", value_name = "imsi")]
    pub base_imsi: Option<String>,
    /// Number of subscribers.
    #[arg(long, value_name = "n")]
    pub count: Option<u64>,
}

/// Arguments for `seed`.
#[derive(Debug, Clone, Default, Args)]
pub struct SeedArgs {
    /// Target collection.
    #[command(flatten)]
    pub store: StoreArgs,
    /// IMSI range.
    #[command(flatten)]
    pub range: RangeArgs,
    /// Subscriber template JSON file; overrides the built-in template.
    #[arg(long, value_name = "path")]
    pub template: Option<PathBuf>,
    /// `continue-on-error` or `abort-on-first-error`.
    #[arg(long = "failure-policy", value_name = "policy")]
    pub failure_policy: Option<String>,
    /// Upper bound on inserts awaiting acknowledgement.
    #[arg(long = "max-in-flight", value_name = "n")]
    pub max_in_flight: Option<usize>,
    /// Overall deadline for the batch in seconds.
    #[arg(long = "deadline-secs", value_name = "secs")]
    pub deadline_secs: Option<u64>,
}

/// Arguments for `purge`.
#[derive(Debug, Clone, Default, Args)]
pub struct PurgeArgs {
    /// Target collection.
    #[command(flatten)]
    pub store: StoreArgs,
    /// IMSI range.
    #[command(flatten)]
    pub range: RangeArgs,
}

/// Arguments for `ue-configs`.
#[derive(Debug, Clone, Args)]
pub struct UeConfigArgs {
    /// IMSI range.
    #[command(flatten)]
    pub range: RangeArgs,
    /// UERANSIM UE configuration template containing a `supi:` line.
    #[arg(long, value_name = "path")]
    pub template: PathBuf,
    /// Directory receiving the generated files.
    #[arg(long = "output-dir", value_name = "dir", default_value = ".")]
    pub output_dir: PathBuf,
    /// File name prefix; files are named `<prefix>-<n>.yaml`.
    #[arg(long, value_name = "prefix", default_value = DEFAULT_UE_PREFIX)]
    pub prefix: String,
}

/// Errors raised while resolving or executing a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings could not be loaded from the environment or config files.
    #[error("failed to load settings: {message}")]
    Settings {
        /// Loader error text.
        message: String,
    },
    /// Template could not be loaded or the core name is unknown.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// Failure policy name is not recognised.
    #[error(transparent)]
    FailurePolicy(#[from] UnknownFailurePolicy),
    /// In-flight bound of zero.
    #[error("max in-flight inserts must be at least 1")]
    ZeroInFlight,
    /// A path is not valid UTF-8.
    #[error("path {} is not valid UTF-8", .path.display())]
    NonUtf8Path {
        /// Offending path.
        path: PathBuf,
    },
    /// A directory could not be opened.
    #[error("failed to open directory {path}: {message}")]
    Directory {
        /// Directory path.
        path: Utf8PathBuf,
        /// Underlying I/O error text.
        message: String,
    },
    /// Base IMSI or count is invalid.
    #[error(transparent)]
    Seeding(#[from] SeedingError),
    /// UE configuration generation failed.
    #[error(transparent)]
    UeConfig(#[from] UeConfigError),
    /// Store client could not be created.
    #[error(transparent)]
    Store(#[from] SubscriberStoreError),
}

/// Fully resolved `seed` invocation.
#[derive(Debug, Clone)]
pub struct SeedRequest {
    /// Store connection.
    pub store: MongoStoreConfig,
    /// Template supplying every non-identifier field.
    pub template: SubscriberTemplate,
    /// First IMSI.
    pub base_imsi: String,
    /// Number of subscribers.
    pub count: u64,
    /// Batch options.
    pub options: SeedingOptions,
}

/// Fully resolved `purge` invocation.
#[derive(Debug, Clone)]
pub struct PurgeRequest {
    /// Store connection.
    pub store: MongoStoreConfig,
    /// First IMSI.
    pub base_imsi: String,
    /// Number of subscribers.
    pub count: u64,
}

/// Fully resolved `ue-configs` invocation.
#[derive(Debug, Clone)]
pub struct UeConfigRequest {
    /// First IMSI.
    pub base_imsi: String,
    /// Number of files.
    pub count: u64,
    /// UE template file.
    pub template: Utf8PathBuf,
    /// Destination directory.
    pub output_dir: Utf8PathBuf,
    /// File name prefix.
    pub prefix: String,
}

impl SeedArgs {
    /// Merge flags over `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] when the core, failure policy, in-flight bound or
    /// template file is invalid.
    pub fn resolve(self, settings: &SeederSettings) -> Result<SeedRequest, CliError> {
        let core = resolve_core(self.store.core.as_deref(), settings)?;
        let template = match self.template.or_else(|| settings.template_path.clone()) {
            Some(path) => load_template(&utf8_path(path)?)?,
            None => SubscriberTemplate::for_core(core),
        };
        let failure_policy = match self.failure_policy {
            Some(name) => name.parse::<FailurePolicy>()?,
            None => settings.failure_policy().parse::<FailurePolicy>()?,
        };
        let max_in_flight = NonZeroUsize::new(
            self.max_in_flight
                .unwrap_or_else(|| settings.max_in_flight()),
        )
        .ok_or(CliError::ZeroInFlight)?;
        let deadline = self
            .deadline_secs
            .or(settings.deadline_secs)
            .map(Duration::from_secs);

        Ok(SeedRequest {
            store: store_config(&self.store, settings, template.core()),
            template,
            base_imsi: resolve_base(&self.range, settings),
            count: self.range.count.unwrap_or_else(|| settings.count()),
            options: SeedingOptions {
                failure_policy,
                max_in_flight,
                deadline,
            },
        })
    }
}

impl PurgeArgs {
    /// Merge flags over `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Template`] when the core name is unknown.
    pub fn resolve(self, settings: &SeederSettings) -> Result<PurgeRequest, CliError> {
        let core = resolve_core(self.store.core.as_deref(), settings)?;
        Ok(PurgeRequest {
            store: store_config(&self.store, settings, core),
            base_imsi: resolve_base(&self.range, settings),
            count: self.range.count.unwrap_or_else(|| settings.count()),
        })
    }
}

impl UeConfigArgs {
    /// Merge flags over `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::NonUtf8Path`] when a path is not valid UTF-8.
    pub fn resolve(self, settings: &SeederSettings) -> Result<UeConfigRequest, CliError> {
        Ok(UeConfigRequest {
            base_imsi: resolve_base(&self.range, settings),
            count: self.range.count.unwrap_or_else(|| settings.count()),
            template: utf8_path(self.template)?,
            output_dir: utf8_path(self.output_dir)?,
            prefix: self.prefix,
        })
    }
}

fn resolve_core(flag: Option<&str>, settings: &SeederSettings) -> Result<CoreNetwork, CliError> {
    Ok(flag
        .unwrap_or_else(|| settings.core())
        .parse::<CoreNetwork>()?)
}

fn resolve_base(range: &RangeArgs, settings: &SeederSettings) -> String {
    range
        .base_imsi
        .clone()
        .unwrap_or_else(|| settings.base_imsi().to_owned())
}

fn store_config(args: &StoreArgs, settings: &SeederSettings, core: CoreNetwork) -> MongoStoreConfig {
    MongoStoreConfig {
        uri: args
            .mongo_uri
            .clone()
            .unwrap_or_else(|| settings.mongo_uri().to_owned()),
        database: args
            .database
            .clone()
            .or_else(|| settings.database.clone())
            .unwrap_or_else(|| core.default_database().to_owned()),
        collection: args
            .collection
            .clone()
            .or_else(|| settings.collection.clone())
            .unwrap_or_else(|| core.default_collection().to_owned()),
        operation_timeout: Duration::from_millis(
            args.insert_timeout_ms
                .unwrap_or_else(|| settings.insert_timeout_ms()),
        ),
    }
}

fn utf8_path(path: PathBuf) -> Result<Utf8PathBuf, CliError> {
    Utf8PathBuf::from_path_buf(path).map_err(|path| CliError::NonUtf8Path { path })
}

/// Open the directory holding `path` and return it with the file name.
///
/// # Errors
///
/// Returns [`CliError::Directory`] when the parent directory cannot be opened,
/// or [`TemplateError::IoError`] when `path` has no file name.
pub fn open_parent(path: &Utf8Path) -> Result<(Dir, &Utf8Path), CliError> {
    let file_name = path.file_name().ok_or_else(|| TemplateError::IoError {
        path: path.to_path_buf(),
        message: "path must name a file".to_owned(),
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = open_dir(parent)?;
    Ok((dir, Utf8Path::new(file_name)))
}

/// Open `path` as a capability directory handle.
///
/// # Errors
///
/// Returns [`CliError::Directory`] when the directory cannot be opened.
pub fn open_dir(path: &Utf8Path) -> Result<Dir, CliError> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|error| CliError::Directory {
        path: path.to_path_buf(),
        message: error.to_string(),
    })
}

/// Create `path` and any missing parents, then open it.
///
/// An existing directory is opened as is.
///
/// # Errors
///
/// Returns [`CliError::Directory`] when the directory cannot be created or
/// opened.
pub fn create_dir(path: &Utf8Path) -> Result<Dir, CliError> {
    Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|error| {
        CliError::Directory {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    })?;
    open_dir(path)
}

fn load_template(path: &Utf8Path) -> Result<SubscriberTemplate, CliError> {
    let (dir, file_name) = open_parent(path)?;
    Ok(SubscriberTemplate::from_file(&dir, file_name)?)
}
