//! Async command layer used by the CLI.

pub mod settings;
pub mod updates;
