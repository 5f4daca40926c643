//! Read-side projections over a reminder collection.
//!
//! # Responsibility
//! - Sort reminders by due date, priority or creation time.
//! - Filter by completion status and search text.
//!
//! # Invariants
//! - Projections return new vectors; the input order is never mutated.
//! - All sorts are stable, so equal keys keep insertion order.

use crate::model::reminder::Reminder;
use regex::{Regex, RegexBuilder};
use std::cmp::Ordering;

/// Completion-status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    fn accepts(self, reminder: &Reminder) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !reminder.completed,
            Self::Completed => reminder.completed,
        }
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Closest due date first.
    #[default]
    DueAscending,
    DueDescending,
    /// Ties fall back to due date ascending.
    PriorityHighFirst,
    PriorityLowFirst,
    CreatedAscending,
}

/// Query options for listing reminders.
#[derive(Debug, Clone, Default)]
pub struct ReminderListQuery {
    pub status: StatusFilter,
    /// Whitespace-separated terms; every term must occur in the text,
    /// ignoring case. `None` or blank matches everything.
    pub text: Option<String>,
    pub sort: SortOrder,
}

impl ReminderListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn sorted(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

/// Returns reminders ordered by due date.
///
/// `ascending = true` puts the closest due date first.
pub fn sort_by_due(reminders: &[Reminder], ascending: bool) -> Vec<Reminder> {
    let order = if ascending {
        SortOrder::DueAscending
    } else {
        SortOrder::DueDescending
    };
    sorted(reminders.to_vec(), order)
}

/// Returns reminders ordered by priority, then by due date ascending.
pub fn sort_by_priority(reminders: &[Reminder], high_first: bool) -> Vec<Reminder> {
    let order = if high_first {
        SortOrder::PriorityHighFirst
    } else {
        SortOrder::PriorityLowFirst
    };
    sorted(reminders.to_vec(), order)
}

/// Filters, searches and orders reminders according to `query`.
pub fn run_query(reminders: &[Reminder], query: &ReminderListQuery) -> Vec<Reminder> {
    let matchers = query
        .text
        .as_deref()
        .map(term_matchers)
        .unwrap_or_default();

    let selected = reminders
        .iter()
        .filter(|reminder| query.status.accepts(reminder))
        .filter(|reminder| matchers.iter().all(|re| re.is_match(&reminder.text)))
        .cloned()
        .collect::<Vec<_>>();

    sorted(selected, query.sort)
}

fn sorted(mut reminders: Vec<Reminder>, order: SortOrder) -> Vec<Reminder> {
    reminders.sort_by(|a, b| compare(a, b, order));
    reminders
}

fn compare(a: &Reminder, b: &Reminder, order: SortOrder) -> Ordering {
    match order {
        SortOrder::DueAscending => a.date_due.cmp(&b.date_due),
        SortOrder::DueDescending => b.date_due.cmp(&a.date_due),
        SortOrder::PriorityHighFirst => b
            .priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| a.date_due.cmp(&b.date_due)),
        SortOrder::PriorityLowFirst => a
            .priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| a.date_due.cmp(&b.date_due)),
        SortOrder::CreatedAscending => a.date_creation.cmp(&b.date_creation),
    }
}

fn term_matchers(text: &str) -> Vec<Regex> {
    text.split_whitespace()
        .filter_map(|term| {
            RegexBuilder::new(&regex::escape(term))
                .case_insensitive(true)
                .build()
                .ok()
        })
        .collect()
}
