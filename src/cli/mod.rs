//! CLI argument parsing, output formatting, and command implementations.

pub mod args;
pub mod list;
pub mod output;
pub mod projects;
pub mod tasks;
