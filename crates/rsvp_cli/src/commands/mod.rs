//! CLI command implementations.

pub mod delete;
pub mod list;
pub mod stats;
pub mod submit;

pub use submit::SubmitArgs;

use clap::ValueEnum;
use rsvp_core::{CoreError, RsvpService, ServiceConfig};
use rsvp_store::FileStore;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Output format for read commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The service refused or failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Output could not be serialized.
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Returns true if running the same command later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CliError::Core(e) if e.is_retryable())
    }
}

impl From<rsvp_store::StoreError> for CliError {
    fn from(err: rsvp_store::StoreError) -> Self {
        CliError::Core(CoreError::Store(err))
    }
}

impl From<rsvp_core::ValidationError> for CliError {
    fn from(err: rsvp_core::ValidationError) -> Self {
        CliError::Core(CoreError::Validation(err))
    }
}

/// Opens the service over the collection in `data_dir`.
pub fn open_service(data_dir: &Path, key: &str) -> Result<RsvpService<FileStore>, CliError> {
    debug!(dir = %data_dir.display(), key, "opening collection");
    let store = FileStore::open(data_dir)?;
    Ok(RsvpService::new(store, ServiceConfig::new(key))?)
}
