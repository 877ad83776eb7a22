//! `subscriber-seeder` entry-point: seeds, purges or writes UE configs for a
//! range of IMSIs.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use ortho_config::OrthoConfig;
use seeder::cli::{
    Cli, CliError, Command, PurgeRequest, SeedRequest, UeConfigRequest, create_dir, open_parent,
};
use seeder::config::SeederSettings;
use seeder::domain::{SubscriberPurger, SubscriberSeeder};
use seeder::outbound::MongoSubscriberStore;
use seeder::summary::{purge_summary, seed_summary};
use subscriber_data::{ImsiRange, UeConfigTemplate, write_ue_configs};
use tokio::runtime::Builder;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Summary line and whether the run fully succeeded.
struct Outcome {
    summary: String,
    success: bool,
}

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "failed to create Tokio runtime");
            eprintln!("subscriber-seeder: create Tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(outcome) => {
            println!("{}", outcome.summary);
            if outcome.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!(error = %e, "subscriber-seeder failed");
            eprintln!("subscriber-seeder: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Outcome, CliError> {
    let settings = SeederSettings::load_from_iter([OsString::from("subscriber-seeder")])
        .map_err(|e| CliError::Settings {
            message: e.to_string(),
        })?;

    match cli.command {
        Command::Seed(args) => seed(args.resolve(&settings)?).await,
        Command::Purge(args) => purge(args.resolve(&settings)?).await,
        Command::UeConfigs(args) => ue_configs(args.resolve(&settings)?),
    }
}

async fn seed(request: SeedRequest) -> Result<Outcome, CliError> {
    let store = MongoSubscriberStore::connect(&request.store).await?;
    let seeder = SubscriberSeeder::new(Arc::new(store), request.options);
    let report = seeder
        .seed(&request.base_imsi, request.count, &request.template)
        .await?;
    Ok(Outcome {
        summary: seed_summary(&report),
        success: report.is_success(),
    })
}

async fn purge(request: PurgeRequest) -> Result<Outcome, CliError> {
    let store = MongoSubscriberStore::connect(&request.store).await?;
    let purger = SubscriberPurger::new(Arc::new(store));
    let report = purger.purge(&request.base_imsi, request.count).await?;

    Ok(Outcome {
        summary: purge_summary(&report),
        success: report.is_success(),
    })
}

fn ue_configs(request: UeConfigRequest) -> Result<Outcome, CliError> {
    let range = ImsiRange::parse(&request.base_imsi, request.count)
        .map_err(seeder::domain::SeedingError::from)?;
    let (template_dir, template_name) = open_parent(&request.template)?;
    let template = UeConfigTemplate::from_file(&template_dir, template_name)?;
    let output = create_dir(&request.output_dir)?;

    let written = write_ue_configs(&output, &template, range, &request.prefix)?;
    info!(
        files = written.len(),
        output_dir = %request.output_dir,
        "UE configuration files written"
    );
    Ok(Outcome {
        summary: format!(
            "wrote {} UE configuration files to {}",
            written.len(),
            request.output_dir
        ),
        success: true,
    })
}
