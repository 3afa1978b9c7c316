//! Imports merged pull requests from the configured repositories.
//!
//! Usage:
//!
//! ```text
//! pr_import [--database-url <URL>] [--gh-program <PROGRAM>] [--gh-timeout-secs <SECS>]
//! ```
//!
//! Every flag is optional. The database URL falls back to `DATABASE_URL` and
//! then to the local development store. Progress is logged through `tracing`
//! (filtered by `RUST_LOG`) and the run summary is written to stdout.
//!
//! The process exits with status 0 once every repository has been attempted,
//! even if some of them failed, and with status 1 when the run cannot start:
//! invalid embedded configuration, an unreachable database, or a runtime that
//! cannot be built.

use clap::Parser;
use mockable::DefaultClock;
use pr_importer::{
    config::{self, DEFAULT_DATABASE_URL, ImporterSettings},
    import::{
        adapters::{
            fs::AmbientWorkspaceProbe, gh_cli::GhCliPullRequestSource,
            postgres::PostgresImportStore,
        },
        domain::ImportDomainError,
        services::ImportService,
    },
    telemetry,
};
use std::fmt;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "pr_import",
    about = "Import merged pull requests as completed tasks"
)]
struct Cli {
    /// `PostgreSQL` connection URL.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Program used to list pull requests.
    #[arg(long, default_value = "gh")]
    gh_program: String,

    /// Seconds allowed for one pull request listing.
    #[arg(long, default_value_t = 60)]
    gh_timeout_secs: u64,
}

impl From<Cli> for ImporterSettings {
    fn from(cli: Cli) -> Self {
        Self {
            database_url: cli.database_url,
            gh_program: cli.gh_program,
            gh_timeout: Duration::from_secs(cli.gh_timeout_secs),
        }
    }
}

/// Errors that stop the run before or after the repository loop.
#[derive(Debug, Error)]
enum StartupError {
    #[error("invalid repository configuration: {0}")]
    Config(#[from] ImportDomainError),
    #[error("failed to connect to the task store: {0}")]
    Connect(#[source] diesel::r2d2::PoolError),
    #[error("failed to build async runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to write summary: {0}")]
    Output(#[source] io::Error),
}

fn main() -> ExitCode {
    let settings = ImporterSettings::from(Cli::parse());
    if let Err(err) = telemetry::init() {
        // Logging is unavailable, so stderr is the only place the failure shows.
        drop(write_logging_failure(&mut io::stderr(), &err));
    }

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "fatal error");
            ExitCode::FAILURE
        }
    }
}

fn write_logging_failure(out: &mut impl Write, err: &dyn fmt::Display) -> io::Result<()> {
    writeln!(out, "failed to initialize logging: {err}")
}

fn run(settings: &ImporterSettings) -> Result<(), StartupError> {
    let sources = config::default_sources()?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(StartupError::Runtime)?;

    let store = PostgresImportStore::connect(&settings.database_url)
        .map_err(StartupError::Connect)?;
    let pull_requests = GhCliPullRequestSource::new()
        .with_program(settings.gh_program.clone())
        .with_timeout(settings.gh_timeout);
    let service = ImportService::new(
        Arc::new(store),
        Arc::new(pull_requests),
        Arc::new(AmbientWorkspaceProbe::new()),
        Arc::new(DefaultClock),
    );

    let summary = runtime.block_on(service.run(&sources));
    // Releases the connection pool before the summary is written.
    drop(service);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "\n{summary}\n").map_err(StartupError::Output)
}
