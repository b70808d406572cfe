//! CLI implementation of ActionPrompter for per-game processing

use std::io::{self, BufRead, Write};

use steampatch::{
    Action, ActionPrompter, InstallationRecord, PatchOutcome, RecordEvent, UnpatchOutcome,
};

use crate::commands::format_record;

/// Console prompter reading answers from stdin
pub struct CliPrompter;

impl ActionPrompter for CliPrompter {
    fn announce(&self, record: &InstallationRecord) {
        println!("{}", format_record(record));
    }

    fn choose(&self, _record: &InstallationRecord) -> Action {
        print!("Specify action (p = Patch, u = Unpatch, anything else = Skip): ");
        io::stdout().flush().ok();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => Action::from_answer(&line),
            Err(e) => {
                eprintln!("Failed to read input ({}), skipping", e);
                Action::Skip
            }
        }
    }

    fn report(&self, _record: &InstallationRecord, event: &RecordEvent) {
        match event {
            RecordEvent::Patched(PatchOutcome::Patched(arch)) => {
                println!("Patched successfully ({}).", arch)
            }
            RecordEvent::Patched(PatchOutcome::AlreadyPatched(_)) | RecordEvent::AlreadyPatched => {
                println!("Already patched.")
            }
            RecordEvent::Patched(PatchOutcome::NoMarker) => {
                println!("steam_api binary no longer present, nothing patched.")
            }
            RecordEvent::Unpatched(UnpatchOutcome::Restored(arch)) => {
                println!("Unpatched successfully ({}).", arch)
            }
            RecordEvent::Unpatched(UnpatchOutcome::NothingToRestore) => {
                println!("No backup found, nothing to restore.")
            }
            RecordEvent::NotPatched => println!("Not patched."),
            RecordEvent::Skipped => println!("Skipping."),
            RecordEvent::Failed(e) => eprintln!("ERROR: {}", e),
        }
    }
}
