//! Project scaffolding for `cmake-new`.
//!
//! [`render`] maps a [`ProjectConfig`] to the files of a new project;
//! [`create_project`] writes them below a root directory.

use crate::config::ProjectConfig;
use crate::error::ScaffoldError;
use crate::templates;
use std::fs;
use std::path::{Path, PathBuf};

/// A file to be written, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFile {
    pub path: PathBuf,
    pub contents: String,
}

impl ScaffoldFile {
    fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Names end up as CMake targets, file stems and header guard macros, so the
/// first character must be a letter or `_`.
pub fn validate_name(name: &str) -> Result<(), ScaffoldError> {
    let starts_ok = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid = starts_ok
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ScaffoldError::InvalidName(name.to_string()))
    }
}

/// Directories created for every project (plus `benchmarks` when enabled).
pub fn project_dirs(config: &ProjectConfig) -> Vec<&'static str> {
    let mut dirs = vec!["include", "src", "tests"];
    if config.benchmark {
        dirs.push("benchmarks");
    }
    dirs
}

pub fn render(config: &ProjectConfig) -> Vec<ScaffoldFile> {
    let name = config.name.as_str();
    let mut files = vec![ScaffoldFile::new(
        Path::new("include").join(format!("{name}.h")),
        templates::header(name),
    )];

    if !config.lib {
        files.push(ScaffoldFile::new(
            Path::new("src").join("main.cpp"),
            templates::main_source(name),
        ));
    }

    files.push(ScaffoldFile::new(
        Path::new("src").join(format!("{name}.cpp")),
        templates::library_source(name),
    ));
    files.push(ScaffoldFile::new(
        Path::new("tests").join(format!("test_{name}.cpp")),
        templates::test_source(name),
    ));

    if config.benchmark {
        files.push(ScaffoldFile::new(
            Path::new("benchmarks").join(format!("benchmark_{name}.cpp")),
            templates::benchmark_source(),
        ));
    }

    files.push(ScaffoldFile::new(
        "CMakeLists.txt",
        templates::cmake_lists(config),
    ));

    if config.format_file {
        files.push(ScaffoldFile::new(".clang-format", templates::clang_format()));
    }

    files.push(ScaffoldFile::new("README.md", templates::readme(name)));
    files
}

/// Write the project for `config` under `root`, overwriting existing files.
///
/// Returns the written paths, joined onto `root`, in render order.
pub fn create_project(root: &Path, config: &ProjectConfig) -> Result<Vec<PathBuf>, ScaffoldError> {
    validate_name(&config.name)?;

    for dir in project_dirs(config) {
        let path = root.join(dir);
        fs::create_dir_all(&path).map_err(|source| ScaffoldError::Io { path, source })?;
    }

    let mut written = Vec::new();
    for file in render(config) {
        let path = root.join(&file.path);
        fs::write(&path, &file.contents).map_err(|source| ScaffoldError::Io {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }
    Ok(written)
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => rest,
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(path),
    }
}
