//! Error types and exit codes for Debrief.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes for the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const NOT_A_PROJECT: i32 = 3;
    pub const INVALID_FRONTMATTER: i32 = 5;
}

/// Main error type for Debrief operations.
#[derive(Error, Debug)]
pub enum DebriefError {
    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("File not in vault index: {0}")]
    NameNotInIndex(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("File is not valid UTF-8: {0}")]
    Decode(PathBuf),

    #[error("Invalid date '{token}': {source}")]
    DateParse {
        token: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    #[error("Not a project file: {0}")]
    NotAProject(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),
}

impl DebriefError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DebriefError::NameNotInIndex(_) | DebriefError::FileNotFound(_) => {
                exit_code::NOT_FOUND
            }
            DebriefError::NotAProject(_) => exit_code::NOT_A_PROJECT,
            DebriefError::InvalidFrontmatter { .. } => exit_code::INVALID_FRONTMATTER,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for Debrief operations.
pub type Result<T> = std::result::Result<T, DebriefError>;
