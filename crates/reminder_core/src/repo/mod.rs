//! Repository layer: key-value slots and the reminder snapshot adapter.
//!
//! # Responsibility
//! - Define the slot storage contract and its SQLite implementation.
//! - Translate reminder collections to and from one named slot.
//!
//! # Invariants
//! - A slot holds one text value; writes replace it whole.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod slot_repo;
pub mod snapshot;
