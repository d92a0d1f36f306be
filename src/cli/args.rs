//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "debrief")]
#[command(author, version, about = "Extract project and task state from an Obsidian-style vault", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides config default)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with = "yaml")]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with = "json")]
    pub yaml: bool,

    /// Suppress warnings and error messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List indexed files in the vault
    List,

    /// Summarize every project in the vault
    Projects,

    /// Show one project in full
    Project(ProjectArgs),

    /// List tasks, across all projects or one
    Tasks(TasksArgs),
}

#[derive(Parser, Debug)]
pub struct ProjectArgs {
    /// Name of the project's main file
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct TasksArgs {
    /// Restrict to one project's tasks
    pub name: Option<String>,

    /// Only tasks still open
    #[arg(long, conflicts_with = "completed")]
    pub pending: bool,

    /// Only tasks already done
    #[arg(long, conflicts_with = "pending")]
    pub completed: bool,
}
