//! The `tasks` command: tasks across projects, optionally filtered.

use crate::cli::args::TasksArgs;
use crate::cli::output::Output;
use crate::error::{DebriefError, Result};
use crate::loader::ProjectLoader;
use crate::types::{Project, Task};
use crate::vault::VaultIndex;
use serde::Serialize;

/// Which tasks to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    pub fn from_args(args: &TasksArgs) -> Self {
        if args.pending {
            TaskFilter::Pending
        } else if args.completed {
            TaskFilter::Completed
        } else {
            TaskFilter::All
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.completed,
            TaskFilter::Completed => task.completed,
        }
    }
}

/// Output for the tasks command.
#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub projects: Vec<ProjectTasks>,
    pub total: usize,
}

/// Tasks for one project, main file first.
#[derive(Debug, Serialize)]
pub struct ProjectTasks {
    pub project: String,
    pub tasks: Vec<Task>,
}

/// List tasks for one project or for all of them.
pub fn run<V: VaultIndex>(
    loader: &ProjectLoader<V>,
    args: &TasksArgs,
    output: &Output,
) -> Result<()> {
    let filter = TaskFilter::from_args(args);

    let projects: Vec<Project> = match &args.name {
        Some(name) => {
            let project = loader
                .load_project(name)?
                .ok_or_else(|| DebriefError::NotAProject(name.clone()))?;
            vec![project]
        }
        None => {
            let scan = loader.load_all_projects();
            for failure in &scan.failures {
                output.warn(&format!("skipping {}: {}", failure.name, failure.error));
            }
            scan.projects
        }
    };

    let mut groups = Vec::new();
    let mut total = 0;
    for project in &projects {
        let tasks: Vec<Task> = project
            .all_tasks()
            .into_iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        total += tasks.len();
        groups.push(ProjectTasks {
            project: project.main_file.name.clone(),
            tasks,
        });
    }

    let response = TasksResponse {
        projects: groups,
        total,
    };
    output.print(&response)?;

    Ok(())
}
