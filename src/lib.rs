//! # sc-backup
//!
//! Back up SensCritique collections and lists to JSON or CSV files.
//!
//! ## Design
//!
//! sc-backup is designed to be:
//! - **Page-parallel** - The first page of a result set tells how many pages follow;
//!   those are fetched concurrently by a bounded worker pool, then merged in page order
//! - **Strict** - A list is only saved when every declared entry was retrieved
//! - **Storage-agnostic** - Result sets are handed to a [`Backend`]; the filesystem
//!   backend writes JSON or CSV, the memory backend keeps them for embedders and tests
//! - **Explicitly configured** - Everything lives in a [`Config`] value, no globals
//!
//! ## Quick Start
//!
//! ```no_run
//! use sc_backup::{Backup, Config, FsBackend, OutputFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backup = Backup::new(Config::default())?;
//!
//!     let backend = FsBackend::new("output/mlcdf", OutputFormat::Json, true);
//!     backup.run_collection("mlcdf", &backend).await?;
//!
//!     let backend = FsBackend::new("output", OutputFormat::Csv, false);
//!     backup
//!         .run_list("https://www.senscritique.com/liste/Vu_au_cinema/363578", &backend)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Storage backends
pub mod backend;
/// Backup engine
pub mod backup;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// HTTP fetching
pub mod fetch;
/// Output encodings
pub mod format;
/// Page counts and page URLs
pub mod pagination;
/// HTML extraction
pub mod parser;
/// Bounded-concurrency worker pool
pub mod pool;
/// Core types
pub mod types;

// Re-export commonly used types
pub use backend::{Backend, FsBackend, MemoryBackend, SavedPayload};
pub use backup::{Backup, reconcile_done_dates};
pub use config::{Config, OutputConfig, OutputFormat};
pub use error::{Error, ParseError, Result};
pub use fetch::{Fetcher, HttpFetcher, Response};
pub use format::{CsvFormatter, Formatter, JsonFormatter};
pub use pool::{Pool, Task};
pub use types::{Category, Collection, Entry, Filter, JournalEntry, List, Serializable};

/// Run `work` until it completes or the process receives a termination signal
///
/// Returns `None` when interrupted. Nothing is rolled back: result sets saved before
/// the signal stay on disk.
///
/// - **Unix:** listens for SIGTERM and SIGINT, falling back to Ctrl+C if registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
pub async fn run_until_interrupted<F: std::future::Future>(work: F) -> Option<F::Output> {
    tokio::select! {
        output = work => Some(output),
        _ = wait_for_signal() => None,
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // registration may fail in restricted environments (containers, tests)
    match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => tracing::info!("received SIGTERM, stopping backup"),
                _ = sigint.recv() => tracing::info!("received SIGINT, stopping backup"),
            }
        }
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(error = %e, "could not register signal handlers, using ctrl_c");
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("received Ctrl+C, stopping backup");
            } else {
                // without any handler, never interrupt
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received Ctrl+C, stopping backup"),
        Err(e) => {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}
