//! Reminder snapshot persistence over one named slot.
//!
//! # Responsibility
//! - Serialize the full reminder collection as a JSON array.
//! - Rebuild reminders from the slot on startup, reviving timestamps.
//!
//! # Invariants
//! - Every save replaces the whole snapshot; there are no partial writes.
//! - An absent or blank slot loads as an empty collection.
//! - Malformed JSON and invariant-breaking records fail the load; nothing is
//!   silently dropped.

use crate::db::DbError;
use crate::model::reminder::{normalize_text, Reminder, ReminderValidationError};
use crate::repo::slot_repo::SlotRepository;
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key used when none is configured.
pub const DEFAULT_SLOT_KEY: &str = "reminders";

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Failure while reading or writing the reminder snapshot.
#[derive(Debug)]
pub enum PersistenceError {
    Db(DbError),
    /// Slot content is not a JSON array of reminders.
    Malformed { key: String, message: String },
    /// Slot decoded but a record breaks a model invariant.
    InvalidData(String),
    Encode(serde_json::Error),
}

impl PersistenceError {
    /// Stable, text-free identifier for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "snapshot_db_failed",
            Self::Malformed { .. } => "snapshot_malformed",
            Self::InvalidData(_) => "snapshot_invalid_data",
            Self::Encode(_) => "snapshot_encode_failed",
        }
    }
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Malformed { key, message } => {
                write!(f, "malformed reminder snapshot in slot `{key}`: {message}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted reminder data: {message}"),
            Self::Encode(err) => write!(f, "failed to encode reminder snapshot: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Malformed { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for PersistenceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Persistence adapter binding a reminder collection to one slot.
pub struct ReminderPersistence<S: SlotRepository> {
    slots: S,
    key: String,
}

impl<S: SlotRepository> ReminderPersistence<S> {
    pub fn new(slots: S, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    /// Uses [`DEFAULT_SLOT_KEY`].
    pub fn with_default_key(slots: S) -> Self {
        Self::new(slots, DEFAULT_SLOT_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes the full collection, overwriting the previous snapshot.
    pub fn save(&self, reminders: &[Reminder]) -> PersistenceResult<()> {
        let payload = encode_snapshot(reminders)?;
        self.slots.write_slot(&self.key, &payload)?;
        info!(
            "event=snapshot_save module=persistence status=ok key={} count={}",
            self.key,
            reminders.len()
        );
        Ok(())
    }

    /// Reads the slot and rebuilds the stored reminders.
    ///
    /// # Errors
    /// - `Malformed` when the slot is not a JSON reminder array.
    /// - `InvalidData` when a record has bad text or a repeated id.
    pub fn load(&self) -> PersistenceResult<Vec<Reminder>> {
        let Some(payload) = self.slots.read_slot(&self.key)? else {
            info!(
                "event=snapshot_load module=persistence status=empty key={}",
                self.key
            );
            return Ok(Vec::new());
        };

        match decode_snapshot(&self.key, &payload) {
            Ok(reminders) => {
                info!(
                    "event=snapshot_load module=persistence status=ok key={} count={}",
                    self.key,
                    reminders.len()
                );
                Ok(reminders)
            }
            Err(err) => {
                warn!("{}", load_failure_event(&self.key, &err));
                Err(err)
            }
        }
    }

    /// Clears the slot so the next load starts empty.
    ///
    /// Returns whether a snapshot existed.
    pub fn discard(&self) -> PersistenceResult<bool> {
        let existed = self.slots.remove_slot(&self.key)?;
        info!(
            "event=snapshot_discard module=persistence status=ok key={} existed={}",
            self.key, existed
        );
        Ok(existed)
    }
}

/// Serializes reminders as the persisted JSON array.
pub fn encode_snapshot(reminders: &[Reminder]) -> PersistenceResult<String> {
    serde_json::to_string(reminders).map_err(PersistenceError::Encode)
}

/// Parses a persisted JSON array and checks stored-state invariants.
///
/// Record text is trimmed on the way in.
pub fn decode_snapshot(key: &str, payload: &str) -> PersistenceResult<Vec<Reminder>> {
    if payload.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reminders: Vec<Reminder> =
        serde_json::from_str(payload).map_err(|err| PersistenceError::Malformed {
            key: key.to_string(),
            message: err.to_string(),
        })?;

    let mut seen = HashSet::with_capacity(reminders.len());
    for reminder in &mut reminders {
        // Snapshots written by other clients may carry untrimmed text.
        reminder.text = normalize_text(&reminder.text)
            .map_err(|err| invalid_record(reminder, &err))?;
        if !seen.insert(reminder.id) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate reminder id {}",
                reminder.id
            )));
        }
    }

    Ok(reminders)
}

fn invalid_record(reminder: &Reminder, err: &ReminderValidationError) -> PersistenceError {
    PersistenceError::InvalidData(format!("reminder {}: {err}", reminder.id))
}

// Error detail can quote stored reminder text, so only the code is logged.
fn load_failure_event(key: &str, err: &PersistenceError) -> String {
    format!(
        "event=snapshot_load module=persistence status=error key={key} error_code={}",
        err.code()
    )
}
