//! Submit command implementation.

use super::{open_service, CliError};
use clap::Args;
use rsvp_core::RecordDraft;
use std::path::Path;

/// Arguments of the submit command.
#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// The respondent attends
    #[arg(long, conflicts_with = "not_attending", required_unless_present = "not_attending")]
    pub attending: bool,

    /// The respondent does not attend
    #[arg(long)]
    pub not_attending: bool,

    /// Number of people attending
    #[arg(short, long, default_value_t = 0)]
    pub party_size: u32,

    /// Attendee name (repeat for each attendee)
    #[arg(short, long = "name")]
    pub names: Vec<String>,

    /// Name shown next to the response
    #[arg(long, default_value = "")]
    pub display_name: String,

    /// How to reach the respondent
    #[arg(short, long, default_value = "")]
    pub contact: String,

    /// Free-text message
    #[arg(long, default_value = "")]
    pub note: String,

    /// Tag identifying the submitting client
    #[arg(long, default_value = "cli")]
    pub client_tag: String,
}

impl SubmitArgs {
    /// Converts the arguments into a draft.
    pub fn into_draft(self) -> RecordDraft {
        let draft = if self.attending {
            RecordDraft::attending(self.party_size, self.names)
        } else {
            RecordDraft::not_attending()
                .with_party_size(self.party_size)
                .with_names(self.names)
        };
        draft
            .with_display_name(self.display_name)
            .with_contact(self.contact)
            .with_note(self.note)
            .with_client_tag(self.client_tag)
    }
}

/// Runs the submit command.
pub fn run(data_dir: &Path, key: &str, args: SubmitArgs) -> Result<(), CliError> {
    let service = open_service(data_dir, key)?;
    let record = service.submit(args.into_draft())?;
    println!("{}", record.id());
    Ok(())
}
