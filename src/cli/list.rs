//! The `list` command: every indexed file in the vault.

use crate::cli::output::Output;
use crate::error::Result;
use crate::loader::ProjectLoader;
use crate::vault::VaultIndex;
use serde::Serialize;

/// Output for the list command.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub files: Vec<FileEntry>,
    pub total: usize,
}

/// One indexed file: its logical name and vault-relative path.
#[derive(Debug, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
}

/// List indexed files in index order.
pub fn run<V: VaultIndex>(loader: &ProjectLoader<V>, output: &Output) -> Result<()> {
    let files: Vec<FileEntry> = loader
        .vault()
        .file_index()
        .iter()
        .map(|(name, path)| FileEntry {
            name: name.clone(),
            path: path.display().to_string(),
        })
        .collect();

    let response = ListResponse {
        total: files.len(),
        files,
    };
    output.print(&response)?;

    Ok(())
}
