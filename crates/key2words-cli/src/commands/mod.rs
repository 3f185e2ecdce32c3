//! Subcommand handlers.

pub mod backup;
pub mod restore;
