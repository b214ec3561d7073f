//! pgmirror: keeps a typed copy of the Project Gutenberg catalog in sync with
//! the published RDF archive.

use clap::{Parser, Subcommand};
use derive_more::{Display, Error};
use exn::ResultExt;
use pgmirror_config::{Config, SyncConfig};
use pgmirror_sync::catalog::{CatalogHandle, JsonLinesCatalog, MemoryCatalog};
use pgmirror_sync::source::{FileSource, HttpSource, SourceHandle};
use pgmirror_sync::{EntryRouter, PassOutcome, SyncOptions, Synchronizer, schedule};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Display, Error)]
enum ErrorKind {
    #[display("invalid configuration")]
    Config,
    #[display("unable to open catalog output")]
    Output,
    #[display("synchronization failed")]
    Sync,
}

type Result<T> = std::result::Result<T, exn::Exn<ErrorKind>>;

#[derive(Debug, Parser)]
#[command(name = "pgmirror", version, about = "Mirror the Project Gutenberg RDF catalog")]
struct Cli {
    /// Configuration file (TOML, YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read the archive from a local file instead of the configured mirror.
    #[arg(long, global = true)]
    archive: Option<PathBuf>,

    /// Append synchronized books to a JSON Lines file. Without it, books are
    /// only kept in memory (useful as a dry run).
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// Run a single synchronization pass.
    Sync,
    /// Synchronize on the configured poll interval until interrupted.
    Watch,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;

    let source: SourceHandle = match &cli.archive {
        Some(path) => Arc::new(FileSource::new(path)),
        None => {
            let url = config.mirror.archive_url();
            Arc::new(HttpSource::new(&url, config.sync.read_timeout()).or_raise(|| ErrorKind::Config)?)
        }
    };
    let (catalog, dry_run) = match &cli.output {
        Some(path) => {
            let jsonl = JsonLinesCatalog::open(path).await.or_raise(|| ErrorKind::Output)?;
            (Arc::new(jsonl) as CatalogHandle, None)
        }
        None => {
            let memory = Arc::new(MemoryCatalog::new());
            (Arc::clone(&memory) as CatalogHandle, Some(memory))
        }
    };
    let router = EntryRouter::new(config.sync.ignore.iter().copied());
    let synchronizer = Synchronizer::new(source, catalog, router).with_options(sync_options(&config.sync));

    match cli.command {
        Command::Sync => match synchronizer.synchronize_once().await.or_raise(|| ErrorKind::Sync)? {
            PassOutcome::Completed(report) => {
                tracing::info!(?report, "Catalog synchronized");
                if let Some(memory) = &dry_run {
                    tracing::info!(books = memory.len().await, "Dry run; nothing was written");
                }
            }
            PassOutcome::Unchanged(marker) => tracing::info!(%marker, "Catalog already up to date"),
            PassOutcome::AlreadyRunning => {}
        },
        Command::Watch => {
            schedule::run(Arc::new(synchronizer), config.sync.poll_interval(), shutdown_signal()).await;
        }
    }
    Ok(())
}

fn sync_options(config: &SyncConfig) -> SyncOptions {
    SyncOptions {
        fetch_timeout: config.fetch_timeout(),
        retries: config.retries,
        retry_backoff: config.retry_backoff(),
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Interrupt received"),
        Err(err) => tracing::error!(error = %err, "Unable to listen for interrupt; stopping"),
    }
}
