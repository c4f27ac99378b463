//! Schema migrations for the history database
//!
//! Each migration runs once, inside its own transaction, and its checksum is
//! recorded in `schema_version`. Opening a database whose applied
//! migrations no longer match the embedded SQL fails.

mod embedded;
mod runner;

pub use embedded::{Migration, MIGRATIONS};
pub use runner::{applied_migrations, apply_migrations};
