//! Reminder domain model.
//!
//! # Responsibility
//! - Define the canonical reminder record and its wire shape.
//! - Own text/due-date validation shared by create and edit paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another reminder.
//! - `text` is non-empty after trimming and shorter than [`MAX_TEXT_CHARS`].
//! - `date_creation` is set once at construction.
//! - `date_due >= now` is checked when a reminder is created or edited,
//!   never when it is read back from storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Upper bound (exclusive) on reminder text length, in characters.
pub const MAX_TEXT_CHARS: usize = 100;

/// Stable identifier for a reminder.
///
/// Serialized as the hyphenated UUID string.
pub type ReminderId = Uuid;

/// Reminder urgency, mirrored to a display style by views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Style hook used by list views (`priority-high`, ...).
    pub fn style_class(self) -> &'static str {
        match self {
            Self::Low => "priority-low",
            Self::Medium => "priority-medium",
            Self::High => "priority-high",
        }
    }

    /// Ordering weight; higher means more urgent.
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ReminderValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ReminderValidationError::UnknownPriority(value.to_string())),
        }
    }
}

/// Validation failure for reminder input or persisted reminder state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderValidationError {
    /// Text is empty or whitespace only.
    EmptyText,
    /// Text has `len` characters; must be fewer than `max`.
    TextTooLong { len: usize, max: usize },
    /// Due date lies before the reference instant.
    DueInPast {
        due: DateTime<Utc>,
        now: DateTime<Utc>,
    },
    /// Another reminder already has the same text and due date.
    Duplicate { text: String, due: DateTime<Utc> },
    /// Priority name is not one of `low|medium|high`.
    UnknownPriority(String),
}

impl Display for ReminderValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "reminder text cannot be empty"),
            Self::TextTooLong { len, max } => {
                write!(f, "reminder text has {len} characters; must be fewer than {max}")
            }
            Self::DueInPast { due, now } => write!(
                f,
                "due date {} is earlier than current time {}",
                due.to_rfc3339(),
                now.to_rfc3339()
            ),
            Self::Duplicate { text, due } => write!(
                f,
                "a reminder `{text}` due at {} already exists",
                due.to_rfc3339()
            ),
            Self::UnknownPriority(value) => {
                write!(f, "unknown priority `{value}`; expected low|medium|high")
            }
        }
    }
}

impl Error for ReminderValidationError {}

/// Canonical reminder record.
///
/// Field order and names follow the persisted JSON layout:
/// `text, dateDue, priority, dateCreation, id, completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub text: String,
    pub date_due: DateTime<Utc>,
    pub priority: Priority,
    /// Set by [`Reminder::create`]; never changed afterwards.
    pub date_creation: DateTime<Utc>,
    pub id: ReminderId,
    #[serde(default)]
    pub completed: bool,
}

impl Reminder {
    /// Creates a reminder with a generated ID, created at `now`.
    ///
    /// # Errors
    /// - `EmptyText` / `TextTooLong` when text fails [`normalize_text`].
    /// - `DueInPast` when `date_due < now`.
    pub fn create(
        text: &str,
        date_due: DateTime<Utc>,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<Self, ReminderValidationError> {
        let text = normalize_text(text)?;
        validate_due(date_due, now)?;

        Ok(Self {
            text,
            date_due,
            priority,
            date_creation: now,
            id: Uuid::new_v4(),
            completed: false,
        })
    }

    /// Builds a reminder with a fixed id and creation time.
    ///
    /// Reproduces a known record, such as a test fixture. Text is
    /// normalized; the due-date rule is not applied.
    pub fn with_id(
        id: ReminderId,
        text: &str,
        date_due: DateTime<Utc>,
        priority: Priority,
        date_creation: DateTime<Utc>,
    ) -> Result<Self, ReminderValidationError> {
        Ok(Self {
            text: normalize_text(text)?,
            date_due,
            priority,
            date_creation,
            id,
            completed: false,
        })
    }

    /// Checks invariants that must hold for any stored reminder.
    pub fn validate(&self) -> Result<(), ReminderValidationError> {
        normalize_text(&self.text).map(|_| ())
    }

    /// Replaces text, due date and priority after re-validating them.
    ///
    /// On error the reminder is left untouched.
    pub fn apply_edit(
        &mut self,
        text: &str,
        date_due: DateTime<Utc>,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<(), ReminderValidationError> {
        let text = normalize_text(text)?;
        validate_due(date_due, now)?;

        self.text = text;
        self.date_due = date_due;
        self.priority = priority;
        Ok(())
    }

    /// Sets the completion flag. Idempotent.
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Returns whether the reminder is still open and its due date has passed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.date_due < now
    }

    /// Returns whether a reminder with `text` due at `date_due` would
    /// duplicate this one: same due instant, same trimmed text ignoring case.
    pub fn is_duplicate_of(&self, text: &str, date_due: DateTime<Utc>) -> bool {
        self.date_due == date_due
            && self.text.trim().to_lowercase() == text.trim().to_lowercase()
    }
}

/// Trims reminder text and checks its length bounds.
pub fn normalize_text(text: &str) -> Result<String, ReminderValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ReminderValidationError::EmptyText);
    }

    let len = trimmed.chars().count();
    if len >= MAX_TEXT_CHARS {
        return Err(ReminderValidationError::TextTooLong {
            len,
            max: MAX_TEXT_CHARS,
        });
    }

    Ok(trimmed.to_string())
}

/// Rejects due dates earlier than `now`.
pub fn validate_due(
    date_due: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), ReminderValidationError> {
    if date_due < now {
        return Err(ReminderValidationError::DueInPast { due: date_due, now });
    }
    Ok(())
}
