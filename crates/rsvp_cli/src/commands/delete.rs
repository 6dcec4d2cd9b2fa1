//! Delete command implementation.

use super::{open_service, CliError};
use rsvp_core::RecordId;
use std::path::Path;

/// Runs the delete command.
pub fn run(data_dir: &Path, key: &str, id: &str) -> Result<(), CliError> {
    let id: RecordId = id.parse()?;
    let service = open_service(data_dir, key)?;
    let deleted = service.delete_by_id(id)?;
    println!("deleted {deleted}");
    Ok(())
}
