//! The `projects` and `project` commands.

use crate::cli::args::ProjectArgs;
use crate::cli::output::Output;
use crate::error::{DebriefError, Result};
use crate::loader::ProjectLoader;
use crate::types::{Project, Task, TaskPriority};
use crate::vault::VaultIndex;
use chrono::NaiveDate;
use serde::Serialize;

/// Output for the projects command.
#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<ProjectSummary>,
    pub total: usize,
}

/// One project, condensed to its headline state.
#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub working_files: usize,
    pub total_tasks: usize,
    pub pending_tasks: usize,
    pub completed_tasks: usize,
}

impl ProjectSummary {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.main_file.name.clone(),
            status: project.status.clone(),
            priority: project.priority,
            start_date: project.start_date,
            due_date: project.due_date,
            working_files: project.working_files.len(),
            total_tasks: project.all_tasks().len(),
            pending_tasks: project.pending_tasks().len(),
            completed_tasks: project.completed_tasks().len(),
        }
    }
}

/// Output for the project command.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub working_files: Vec<WorkingFile>,
    pub tasks: Vec<Task>,
}

/// One working file and its task count.
#[derive(Debug, Serialize)]
pub struct WorkingFile {
    pub name: String,
    pub tasks: usize,
}

impl ProjectDetail {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.main_file.name.clone(),
            status: project.status.clone(),
            priority: project.priority,
            start_date: project.start_date,
            due_date: project.due_date,
            tags: project.main_file.tags.clone(),
            working_files: project
                .working_files
                .iter()
                .map(|file| WorkingFile {
                    name: file.name.clone(),
                    tasks: file.tasks.len(),
                })
                .collect(),
            tasks: project.all_tasks().into_iter().cloned().collect(),
        }
    }
}

/// Summarize every project in the vault.
pub fn run_all<V: VaultIndex>(loader: &ProjectLoader<V>, output: &Output) -> Result<()> {
    let scan = loader.load_all_projects();

    for failure in &scan.failures {
        output.warn(&format!("skipping {}: {}", failure.name, failure.error));
    }

    let projects: Vec<ProjectSummary> = scan
        .projects
        .iter()
        .map(ProjectSummary::from_project)
        .collect();
    let response = ProjectsResponse {
        total: projects.len(),
        projects,
    };
    output.print(&response)?;

    Ok(())
}

/// Show one project in full.
pub fn run_one<V: VaultIndex>(
    loader: &ProjectLoader<V>,
    args: &ProjectArgs,
    output: &Output,
) -> Result<()> {
    let project = loader
        .load_project(&args.name)?
        .ok_or_else(|| DebriefError::NotAProject(args.name.clone()))?;

    output.print(&ProjectDetail::from_project(&project))?;

    Ok(())
}
