//! Reminder store use-case service.
//!
//! # Responsibility
//! - Own the in-memory reminder collection in insertion order.
//! - Validate and apply add/edit/complete/remove mutations.
//! - Persist the full snapshot after every successful mutation.
//!
//! # Invariants
//! - Reminder ids are unique for the lifetime of the store.
//! - A failed operation (validation, missing id or persistence) leaves the
//!   in-memory collection exactly as it was.
//! - In-memory state never runs ahead of the last successful save.

use crate::model::reminder::{
    normalize_text, Priority, Reminder, ReminderId, ReminderValidationError,
};
use crate::repo::slot_repo::SlotRepository;
use crate::repo::snapshot::{PersistenceError, ReminderPersistence};
use crate::service::query::{run_query, sort_by_due, sort_by_priority, ReminderListQuery};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Service error for reminder store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Input rejected; nothing was changed.
    Validation(ReminderValidationError),
    /// No reminder with this id exists.
    NotFound(ReminderId),
    Persistence(PersistenceError),
}

impl StoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::NotFound(_) => "not_found",
            Self::Persistence(_) => "persistence_failed",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "reminder not found: {id}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<ReminderValidationError> for StoreError {
    fn from(value: ReminderValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PersistenceError> for StoreError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

/// In-memory reminder collection backed by a persisted snapshot.
pub struct ReminderStore<S: SlotRepository> {
    persistence: ReminderPersistence<S>,
    reminders: Vec<Reminder>,
}

impl<S: SlotRepository> ReminderStore<S> {
    /// Loads the persisted snapshot and builds a store from it.
    ///
    /// # Errors
    /// Returns `Persistence` when the snapshot is unreadable or malformed;
    /// use [`ReminderPersistence::discard`] to start over.
    pub fn open(persistence: ReminderPersistence<S>) -> StoreResult<Self> {
        let reminders = persistence.load()?;
        info!(
            "event=store_open module=store status=ok key={} count={}",
            persistence.key(),
            reminders.len()
        );
        Ok(Self {
            persistence,
            reminders,
        })
    }

    pub fn persistence(&self) -> &ReminderPersistence<S> {
        &self.persistence
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    /// Iterates reminders in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Reminder> {
        self.reminders.iter()
    }

    /// Adds a reminder due at `date_due`, validated against the current time.
    pub fn add(
        &mut self,
        text: &str,
        date_due: DateTime<Utc>,
        priority: Priority,
    ) -> StoreResult<Reminder> {
        self.add_at(Utc::now(), text, date_due, priority)
    }

    /// Same as [`Self::add`] with an explicit reference instant.
    ///
    /// # Errors
    /// - `Validation` for blank/too-long text, a due date before `now`, or a
    ///   duplicate of an existing reminder.
    /// - `Persistence` when the snapshot cannot be written.
    pub fn add_at(
        &mut self,
        now: DateTime<Utc>,
        text: &str,
        date_due: DateTime<Utc>,
        priority: Priority,
    ) -> StoreResult<Reminder> {
        let result = self.try_add(now, text, date_due, priority);
        match &result {
            Ok(reminder) => info!(
                "event=reminder_add module=store status=ok id={} priority={} count={}",
                reminder.id,
                reminder.priority,
                self.reminders.len()
            ),
            Err(err) => log_rejected("reminder_add", None, err),
        }
        result
    }

    fn try_add(
        &mut self,
        now: DateTime<Utc>,
        text: &str,
        date_due: DateTime<Utc>,
        priority: Priority,
    ) -> StoreResult<Reminder> {
        let reminder = Reminder::create(text, date_due, priority, now)?;
        self.ensure_unique(None, &reminder.text, reminder.date_due)?;

        let mut next = self.reminders.clone();
        next.push(reminder.clone());
        self.commit(next)?;
        Ok(reminder)
    }

    /// Looks up a reminder by id.
    pub fn find(&self, id: ReminderId) -> StoreResult<&Reminder> {
        self.reminders
            .iter()
            .find(|reminder| reminder.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Deletes a reminder and returns it.
    ///
    /// A missing id reports `NotFound` and leaves the store unchanged.
    pub fn remove(&mut self, id: ReminderId) -> StoreResult<Reminder> {
        let result = self.position(id).and_then(|index| {
            let mut next = self.reminders.clone();
            let removed = next.remove(index);
            self.commit(next)?;
            Ok(removed)
        });

        match &result {
            Ok(_) => info!(
                "event=reminder_remove module=store status=ok id={id} count={}",
                self.reminders.len()
            ),
            Err(err) => log_rejected("reminder_remove", Some(id), err),
        }
        result
    }

    /// Sets the completion flag. Repeating the same value is a no-op change.
    pub fn set_completed(&mut self, id: ReminderId, completed: bool) -> StoreResult<()> {
        let result = self.position(id).and_then(|index| {
            let mut next = self.reminders.clone();
            next[index].set_completed(completed);
            self.commit(next)
        });

        match &result {
            Ok(()) => info!(
                "event=reminder_complete module=store status=ok id={id} completed={completed}"
            ),
            Err(err) => log_rejected("reminder_complete", Some(id), err),
        }
        result
    }

    /// Replaces text, due date and priority of an existing reminder.
    pub fn edit(
        &mut self,
        id: ReminderId,
        text: &str,
        date_due: DateTime<Utc>,
        priority: Priority,
    ) -> StoreResult<Reminder> {
        self.edit_at(Utc::now(), id, text, date_due, priority)
    }

    /// Same as [`Self::edit`] with an explicit reference instant.
    ///
    /// Validation matches [`Self::add_at`]; the edited reminder is excluded
    /// from the duplicate check.
    pub fn edit_at(
        &mut self,
        now: DateTime<Utc>,
        id: ReminderId,
        text: &str,
        date_due: DateTime<Utc>,
        priority: Priority,
    ) -> StoreResult<Reminder> {
        let result = self.try_edit(now, id, text, date_due, priority);
        match &result {
            Ok(reminder) => info!(
                "event=reminder_edit module=store status=ok id={id} priority={}",
                reminder.priority
            ),
            Err(err) => log_rejected("reminder_edit", Some(id), err),
        }
        result
    }

    fn try_edit(
        &mut self,
        now: DateTime<Utc>,
        id: ReminderId,
        text: &str,
        date_due: DateTime<Utc>,
        priority: Priority,
    ) -> StoreResult<Reminder> {
        let index = self.position(id)?;
        let normalized = normalize_text(text)?;
        self.ensure_unique(Some(id), &normalized, date_due)?;

        let mut next = self.reminders.clone();
        next[index].apply_edit(&normalized, date_due, priority, now)?;
        let edited = next[index].clone();
        self.commit(next)?;
        Ok(edited)
    }

    /// Returns reminders ordered by due date; stored order is unchanged.
    ///
    /// `ascending = true` lists the closest due date first. Equal due dates
    /// keep insertion order.
    pub fn list_sorted_by_due_date(&self, ascending: bool) -> Vec<Reminder> {
        sort_by_due(&self.reminders, ascending)
    }

    /// Returns reminders ordered by priority, then due date ascending.
    pub fn list_sorted_by_priority(&self, high_first: bool) -> Vec<Reminder> {
        sort_by_priority(&self.reminders, high_first)
    }

    /// Filters, searches and orders reminders.
    pub fn query(&self, query: &ReminderListQuery) -> Vec<Reminder> {
        run_query(&self.reminders, query)
    }

    fn position(&self, id: ReminderId) -> StoreResult<usize> {
        self.reminders
            .iter()
            .position(|reminder| reminder.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn ensure_unique(
        &self,
        exclude: Option<ReminderId>,
        text: &str,
        date_due: DateTime<Utc>,
    ) -> StoreResult<()> {
        let clash = self
            .reminders
            .iter()
            .filter(|reminder| Some(reminder.id) != exclude)
            .any(|reminder| reminder.is_duplicate_of(text, date_due));

        if clash {
            return Err(ReminderValidationError::Duplicate {
                text: text.to_string(),
                due: date_due,
            }
            .into());
        }
        Ok(())
    }

    fn commit(&mut self, next: Vec<Reminder>) -> StoreResult<()> {
        self.persistence.save(&next)?;
        self.reminders = next;
        Ok(())
    }
}

fn log_rejected(event: &str, id: Option<ReminderId>, err: &StoreError) {
    match id {
        Some(id) => warn!(
            "event={event} module=store status=error id={id} error_code={}",
            err.code()
        ),
        None => warn!(
            "event={event} module=store status=error error_code={}",
            err.code()
        ),
    }
}
