//! Domain rules for the campaign tracker.
//!
//! Everything here is free of I/O so the same rules back the repository
//! layer, the HTTP handlers, and their tests.

pub mod checklist;
pub mod error;
pub mod numbering;
pub mod patch;
pub mod roster;
pub mod snapshot;
pub mod text;
pub mod types;
