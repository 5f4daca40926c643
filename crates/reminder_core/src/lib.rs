//! Core domain logic for the reminder list.
//! This crate is the single source of truth for reminder invariants.

pub mod config;
pub mod db;
pub mod format;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, StoreConfig};
pub use format::format_date;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::reminder::{Priority, Reminder, ReminderId, ReminderValidationError};
pub use repo::slot_repo::{SlotRepository, SqliteSlotRepository};
pub use repo::snapshot::{
    PersistenceError, PersistenceResult, ReminderPersistence, DEFAULT_SLOT_KEY,
};
pub use service::query::{ReminderListQuery, SortOrder, StatusFilter};
pub use service::reminder_store::{ReminderStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
