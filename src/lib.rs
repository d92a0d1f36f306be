//! Debrief - A library for extracting project and task state from Obsidian-style vaults.
//!
//! # Overview
//!
//! Debrief scans a vault of markdown files and assembles its project-tagged
//! files into structured projects, enabling:
//! - Checkbox task extraction with emoji metadata (priority, due and
//!   completion dates, tags)
//! - Project detection via tags and frontmatter (status, priority, dates)
//! - Working-file assembly from backlinks
//! - Whole-vault scans that skip broken files instead of aborting
//!
//! # Example
//!
//! ```no_run
//! use debrief::{DirectoryVault, ProjectLoader};
//!
//! // Index a vault directory
//! let vault = DirectoryVault::scan("/path/to/vault").unwrap();
//! let loader = ProjectLoader::new(vault);
//!
//! // Assemble every project in it
//! let scan = loader.load_all_projects();
//! for project in &scan.projects {
//!     println!(
//!         "{}: {} open tasks",
//!         project.main_file.name,
//!         project.pending_tasks().len()
//!     );
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod parser;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use config::Config;
pub use error::{DebriefError, Result};
pub use loader::{ProjectLoader, ScanFailure, VaultScan};
pub use parser::{parse_file_tasks, parse_task_line};
pub use types::*;
pub use vault::{DirectoryVault, VaultIndex};
