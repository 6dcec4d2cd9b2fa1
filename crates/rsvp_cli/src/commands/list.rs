//! List command implementation.

use super::{open_service, CliError, Format};
use rsvp_core::{Attendance, Record};
use std::path::Path;
use time::format_description::well_known::Rfc3339;

/// Runs the list command.
pub fn run(data_dir: &Path, key: &str, format: Format) -> Result<(), CliError> {
    let service = open_service(data_dir, key)?;
    let collection = service.list_all()?;
    let records = collection.newest_first();

    match format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Format::Text => {
            if records.is_empty() {
                println!("no responses");
            }
            for record in records {
                println!("{}", format_line(record));
            }
        }
    }

    Ok(())
}

fn format_line(record: &Record) -> String {
    let when = record
        .created_at()
        .format(&Rfc3339)
        .unwrap_or_else(|_| record.created_at().to_string());
    let answer = match record.attendance() {
        Attendance::Attending => format!("yes x{}", record.party_size()),
        Attendance::NotAttending => "no".to_string(),
    };

    let mut line = format!("{}  {when}  {answer}", record.id());
    if !record.display_name().is_empty() {
        line.push_str(&format!("  {}", record.display_name()));
    }
    if !record.names().is_empty() {
        line.push_str(&format!("  [{}]", record.names().join(", ")));
    }
    if !record.note().is_empty() {
        line.push_str(&format!("  \"{}\"", record.note()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsvp_core::{AttendancePolicy, Limits, RecordDraft, RecordId};
    use time::macros::datetime;

    #[test]
    fn text_line_for_attending() {
        let record = Record::from_parts(
            RecordId::from_bytes([0; 16]),
            datetime!(2026-05-01 12:00 UTC),
            RecordDraft::attending(2, ["Ada", "Grace"])
                .with_display_name("The Lovelaces")
                .with_note("vegetarian"),
            AttendancePolicy::Reject,
            &Limits::default(),
        )
        .unwrap();

        assert_eq!(
            format_line(&record),
            "00000000-0000-0000-0000-000000000000  2026-05-01T12:00:00Z  yes x2  \
             The Lovelaces  [Ada, Grace]  \"vegetarian\""
        );
    }

    #[test]
    fn text_line_for_declined() {
        let record = Record::from_parts(
            RecordId::from_bytes([0; 16]),
            datetime!(2026-05-01 12:00 UTC),
            RecordDraft::not_attending(),
            AttendancePolicy::Reject,
            &Limits::default(),
        )
        .unwrap();

        assert!(format_line(&record).ends_with("  no"));
    }

    #[test]
    fn list_empty_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        run(dir.path(), "rsvps", Format::Text).unwrap();
        run(dir.path(), "rsvps", Format::Json).unwrap();
    }
}
