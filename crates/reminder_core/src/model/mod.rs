//! Domain model for reminders.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep validation rules next to the record they protect.
//!
//! # Invariants
//! - Every reminder is identified by a stable `ReminderId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod reminder;
