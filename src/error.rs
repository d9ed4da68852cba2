use std::path::PathBuf;
use thiserror::Error;

/// Exit status used when the compiler cannot be found (shell convention).
pub const EXIT_NOT_FOUND: i32 = 127;
/// Exit status used when the compiler was found but could not be started.
pub const EXIT_NOT_EXECUTABLE: i32 = 126;
/// Exit status used for database failures.
pub const EXIT_DATABASE: i32 = 1;
/// Exit status used for unusable command lines.
pub const EXIT_USAGE: i32 = 2;

/// Failures of the compile-command recorder.
///
/// A compiler that runs and exits non-zero is not an error here; that is
/// reported through [`crate::recorder::RunOutcome::CompileFailed`].
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("empty compiler command line")]
    EmptyCommand,

    #[error("cannot determine the working directory")]
    WorkingDir(#[source] std::io::Error),

    #[error("executable '{name}' not found in PATH")]
    ExecutableNotFound {
        name: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to execute '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("compilation database {} is not a valid JSON array", .path.display())]
    DatabaseCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to access compilation database {}", .path.display())]
    DatabaseIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize compilation database")]
    Serialize(#[from] serde_json::Error),
}

impl RecordError {
    /// Process exit status this error terminates `buildutil` with.
    pub fn exit_code(&self) -> i32 {
        match self {
            RecordError::EmptyCommand => EXIT_USAGE,
            RecordError::ExecutableNotFound { .. } => EXIT_NOT_FOUND,
            RecordError::Spawn { .. } => EXIT_NOT_EXECUTABLE,
            RecordError::WorkingDir(_)
            | RecordError::DatabaseCorrupt { .. }
            | RecordError::DatabaseIo { .. }
            | RecordError::Serialize(_) => EXIT_DATABASE,
        }
    }
}

/// Failures of the project scaffolder.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("invalid project name '{0}': start with a letter or '_', then use letters, digits, '_' or '-'")]
    InvalidName(String),

    #[error("failed to create {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
