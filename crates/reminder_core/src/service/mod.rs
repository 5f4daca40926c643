//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, mutation and persistence into store APIs.
//! - Keep view layers decoupled from storage details.

pub mod query;
pub mod reminder_store;
