//! Shared types for Debrief: tasks, files, and project aggregates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::path::PathBuf;

/// Task priority level.
///
/// Ordering follows urgency: `Highest` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Highest,
    High,
    Medium,
    Low,
}

impl TaskPriority {
    /// Glyph table mapping each level to the emoji that marks it in a task
    /// line, highest first.
    pub const GLYPHS: [(TaskPriority, &'static str); 4] = [
        (TaskPriority::Highest, "⏫"),
        (TaskPriority::High, "🔼"),
        (TaskPriority::Medium, "🔽"),
        (TaskPriority::Low, "⏬"),
    ];

    /// The emoji glyph marking this priority.
    pub fn glyph(self) -> &'static str {
        match self {
            TaskPriority::Highest => "⏫",
            TaskPriority::High => "🔼",
            TaskPriority::Medium => "🔽",
            TaskPriority::Low => "⏬",
        }
    }

    /// Look up a priority by its glyph.
    pub fn from_glyph(glyph: &str) -> Option<Self> {
        Self::GLYPHS
            .iter()
            .find(|(_, g)| *g == glyph)
            .map(|(priority, _)| *priority)
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPriority::Highest => write!(f, "highest"),
            TaskPriority::High => write!(f, "high"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "highest" => Ok(TaskPriority::Highest),
            "high" => Ok(TaskPriority::High),
            "medium" => Ok(TaskPriority::Medium),
            "low" => Ok(TaskPriority::Low),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

/// A task parsed from a markdown checkbox line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// The task text with checkbox and metadata tokens removed.
    pub content: String,

    /// Whether the checkbox was marked ([x] or [X]).
    pub completed: bool,

    /// Priority level, if a priority glyph was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    /// Due date (📅 YYYY-MM-DD).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Completion date (✅ YYYY-MM-DD).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,

    /// Tags on the line, in order of appearance, without the leading #.
    /// Duplicates are kept.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A markdown file loaded from the vault, with parsed tasks and metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObsidianFile {
    /// Index key for this file (usually the file stem).
    pub name: String,

    /// Resolved absolute path on disk.
    pub path: PathBuf,

    /// Raw file content.
    #[serde(skip_serializing)]
    pub content: String,

    /// Tasks parsed from the content, in line order.
    pub tasks: Vec<Task>,

    /// Tags for this file (frontmatter and body), without the leading #.
    pub tags: Vec<String>,

    /// Parsed YAML frontmatter.
    pub front_matter: Mapping,

    /// Names of files that link to this one.
    pub backlinks: Vec<String>,

    /// Names this file links to.
    pub wikilinks: Vec<String>,
}

/// A project aggregate rooted at one project-tagged main file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    /// The project's canonical document.
    pub main_file: ObsidianFile,

    /// Files backlinking to the main file, distinct from it.
    pub working_files: Vec<ObsidianFile>,

    /// Project status from frontmatter ("active" when absent).
    pub status: String,

    /// Project-level priority, independent of any task's priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    /// Project start date from frontmatter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    /// Project due date from frontmatter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Project {
    /// All tasks: the main file's first, then each working file's in order.
    pub fn all_tasks(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.main_file.tasks.iter().collect();
        for file in &self.working_files {
            tasks.extend(file.tasks.iter());
        }
        tasks
    }

    /// Tasks not yet completed.
    pub fn pending_tasks(&self) -> Vec<&Task> {
        self.all_tasks()
            .into_iter()
            .filter(|task| !task.completed)
            .collect()
    }

    /// Tasks already completed.
    pub fn completed_tasks(&self) -> Vec<&Task> {
        self.all_tasks()
            .into_iter()
            .filter(|task| task.completed)
            .collect()
    }
}
