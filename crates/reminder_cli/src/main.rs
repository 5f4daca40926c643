//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `reminder_core` linkage against a configured database.
//! - Print the stored reminders closest-due first, read-only.

use reminder_core::db::{open_db, open_db_in_memory};
use reminder_core::{
    core_version, format_date, init_logging, ReminderPersistence, ReminderStore, SqliteSlotRepository,
    StoreConfig,
};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("reminder_cli error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = StoreConfig::from_env();
    config.validate().map_err(|err| err.to_string())?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir_arg(log_dir)?)?;
    }

    println!("reminder_core version={}", core_version());
    println!("slot={}", config.slot_key);

    let conn = match &config.db_path {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    }
    .map_err(|err| err.to_string())?;

    let persistence =
        ReminderPersistence::new(SqliteSlotRepository::new(&conn), config.slot_key.as_str());
    let store = ReminderStore::open(persistence).map_err(|err| err.to_string())?;

    println!("reminders={}", store.len());
    for reminder in store.list_sorted_by_due_date(true) {
        let mark = if reminder.completed { "x" } else { " " };
        println!(
            "[{mark}] {:<15} {} | due {}",
            reminder.priority.style_class(),
            reminder.text,
            format_date(&reminder.date_due, true)
        );
    }

    Ok(())
}

fn log_dir_arg(path: &Path) -> Result<&str, String> {
    path.to_str()
        .ok_or_else(|| format!("log directory `{}` is not valid UTF-8", path.display()))
}
