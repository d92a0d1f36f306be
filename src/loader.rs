//! Project assembly: turning indexed vault files into [`Project`]s.

use crate::error::{DebriefError, Result};
use crate::parser::parse_file_tasks;
use crate::types::{ObsidianFile, Project, TaskPriority};
use crate::vault::VaultIndex;
use chrono::NaiveDate;
use serde_yaml::Mapping;
use std::path::PathBuf;

/// Tag substring that marks a file as a project main file.
const PROJECT_TAG: &str = "project";

/// Status assigned when the frontmatter has no usable `status` key.
const DEFAULT_STATUS: &str = "active";

/// Loads files and assembles projects from a vault index.
pub struct ProjectLoader<V: VaultIndex> {
    vault: V,
}

impl<V: VaultIndex> ProjectLoader<V> {
    pub fn new(vault: V) -> Self {
        Self { vault }
    }

    /// The underlying vault index.
    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// Absolute path for an indexed file name.
    ///
    /// Relative index paths resolve against the vault root; absolute ones
    /// are returned as-is.
    pub fn resolve_path(&self, name: &str) -> Result<PathBuf> {
        let path = self
            .vault
            .file_index()
            .get(name)
            .ok_or_else(|| DebriefError::NameNotInIndex(name.to_string()))?;

        if path.is_absolute() {
            Ok(path.clone())
        } else {
            Ok(self.vault.root().join(path))
        }
    }

    /// Read an indexed file's content as UTF-8.
    pub fn read_content(&self, name: &str) -> Result<String> {
        let path = self.resolve_path(name)?;
        if !path.is_file() {
            return Err(DebriefError::FileNotFound(path));
        }

        let bytes = std::fs::read(&path)?;
        String::from_utf8(bytes).map_err(|_| DebriefError::Decode(path))
    }

    /// Load a single file with its tasks and vault metadata.
    pub fn load_file(&self, name: &str) -> Result<ObsidianFile> {
        let path = self.resolve_path(name)?;
        let content = self.read_content(name)?;
        let tasks = parse_file_tasks(&content)?;

        Ok(ObsidianFile {
            name: name.to_string(),
            path,
            content,
            tasks,
            tags: self.vault.tags(name)?,
            front_matter: self.vault.front_matter(name)?,
            backlinks: self.vault.backlinks(name)?,
            wikilinks: self.vault.wikilinks(name)?,
        })
    }

    /// Load the project rooted at `name`.
    ///
    /// The main file is loaded before the tag check, so a file that fails
    /// to load is an error even when it is not a project. Returns
    /// `Ok(None)` when the loaded file carries no project tag. Backlinks
    /// that point outside the index, and the file's own name, are skipped
    /// when collecting working files.
    pub fn load_project(&self, name: &str) -> Result<Option<Project>> {
        let main_file = self.load_file(name)?;
        if !is_project_file(&main_file.tags) {
            return Ok(None);
        }

        let mut working_files = Vec::new();
        for link in &main_file.backlinks {
            if link == name {
                continue;
            }
            if !self.vault.file_index().contains_key(link.as_str()) {
                continue;
            }
            working_files.push(self.load_file(link)?);
        }

        let front_matter = &main_file.front_matter;
        let status = fm_str(front_matter, "status")
            .unwrap_or(DEFAULT_STATUS)
            .to_string();
        let priority = fm_str(front_matter, "priority").and_then(parse_priority);
        let start_date = fm_date(front_matter, "start_date");
        let due_date = fm_date(front_matter, "due_date");

        Ok(Some(Project {
            main_file,
            working_files,
            status,
            priority,
            start_date,
            due_date,
        }))
    }

    /// Walk the whole index, assembling every project-tagged file.
    ///
    /// A file that fails to load is recorded as a failure and the walk
    /// continues; one bad file never aborts the scan.
    pub fn load_all_projects(&self) -> VaultScan {
        let mut scan = VaultScan::default();

        for name in self.vault.file_index().keys() {
            let tags = match self.vault.tags(name) {
                Ok(tags) => tags,
                Err(error) => {
                    scan.failures.push(ScanFailure {
                        name: name.clone(),
                        error,
                    });
                    continue;
                }
            };
            if !is_project_file(&tags) {
                continue;
            }

            match self.load_project(name) {
                Ok(Some(project)) => scan.projects.push(project),
                Ok(None) => {}
                Err(error) => {
                    scan.failures.push(ScanFailure {
                        name: name.clone(),
                        error,
                    });
                }
            }
        }

        scan
    }
}

/// Outcome of a whole-vault scan: assembled projects plus per-file failures.
#[derive(Debug, Default)]
pub struct VaultScan {
    pub projects: Vec<Project>,
    pub failures: Vec<ScanFailure>,
}

/// A file skipped during a scan, with the error that stopped it.
#[derive(Debug)]
pub struct ScanFailure {
    pub name: String,
    pub error: DebriefError,
}

/// A file is a project main file when any of its tags contains "project",
/// case-insensitively.
fn is_project_file(tags: &[String]) -> bool {
    tags.iter()
        .any(|tag| tag.to_lowercase().contains(PROJECT_TAG))
}

/// String value for a frontmatter key, if present and a string.
fn fm_str<'a>(front_matter: &'a Mapping, key: &str) -> Option<&'a str> {
    front_matter.get(key).and_then(|value| value.as_str())
}

/// Date value for a frontmatter key; anything that is not a YYYY-MM-DD
/// string degrades to `None`.
fn fm_date(front_matter: &Mapping, key: &str) -> Option<NaiveDate> {
    fm_str(front_matter, key)
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
}

/// Priority from a frontmatter value: either a glyph or a level name.
fn parse_priority(raw: &str) -> Option<TaskPriority> {
    let raw = raw.trim();
    TaskPriority::from_glyph(raw).or_else(|| raw.parse().ok())
}
