//! Stats command implementation.

use super::{open_service, CliError, Format};
use rsvp_core::AggregateCounts;
use std::path::Path;

/// Runs the stats command.
pub fn run(data_dir: &Path, key: &str, format: Format) -> Result<(), CliError> {
    let service = open_service(data_dir, key)?;
    let collection = service.list_all()?;
    let counts = service.summarize(&collection);

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&counts)?),
        Format::Text => print!("{}", format_text(&counts)),
    }

    Ok(())
}

fn format_text(counts: &AggregateCounts) -> String {
    format!(
        "Attending:     {} responses, {} people\n\
         Not attending: {} responses, {} people\n\
         Total:         {} responses, {} people\n",
        counts.attending_count,
        counts.attending_persons,
        counts.not_attending_count,
        counts.not_attending_persons,
        counts.total_records,
        counts.total_persons,
    )
}
