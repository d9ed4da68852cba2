//! Compilation database (`compile_commands.json`) records and persistence.
//!
//! The database is a JSON array written with two-space indentation and a
//! trailing newline. Every recording run rewrites the whole file through a
//! temporary file in the same directory, so readers never observe a partial
//! array.

use crate::error::RecordError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File name of the compilation database inside the working directory.
pub const DATABASE_FILE: &str = "compile_commands.json";

/// Artifact name compilers use when no `-o` is given.
pub const DEFAULT_OUTPUT: &str = "a.out";

/// One compiled translation unit.
///
/// Field order is the serialized order: `file`, `command`, `directory`, `output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompileRecord {
    pub file: String,
    pub command: String,
    pub directory: String,
    pub output: String,
}

impl CompileRecord {
    /// Build a record for `args` run from `directory` with the resolved `compiler` path.
    ///
    /// `args` must be non-empty. The last argument is taken as the source file
    /// and the value after the first `-o` as the output.
    pub fn from_invocation(args: &[String], compiler: &Path, directory: &Path) -> Self {
        let source = args.last().map(String::as_str).unwrap_or_default();

        Self {
            file: path_string(&directory.join(source)),
            command: format!("{} {}", compiler.display(), args.join(" ")),
            directory: path_string(directory),
            output: path_string(&directory.join(output_name(args))),
        }
    }
}

/// Value following the first `-o` token, or [`DEFAULT_OUTPUT`].
///
/// A trailing `-o` with nothing after it counts as absent.
pub fn output_name(args: &[String]) -> &str {
    args.iter()
        .position(|a| a == "-o")
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
        .unwrap_or(DEFAULT_OUTPUT)
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// A database entry. Entries written by other tools (for example with an
/// `arguments` array instead of `command`) are carried through untouched,
/// keys in their original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatabaseEntry {
    Record(CompileRecord),
    Foreign(serde_json::Value),
}

impl From<CompileRecord> for DatabaseEntry {
    fn from(record: CompileRecord) -> Self {
        DatabaseEntry::Record(record)
    }
}

/// Handle to a `compile_commands.json` file on disk.
#[derive(Debug, Clone)]
pub struct CompileDatabase {
    path: PathBuf,
}

impl CompileDatabase {
    /// The database inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(DATABASE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries. A missing file yields `Ok(None)`.
    pub fn load(&self) -> Result<Option<Vec<DatabaseEntry>>, RecordError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RecordError::DatabaseIo {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let entries = serde_json::from_str(&content).map_err(|e| RecordError::DatabaseCorrupt {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(Some(entries))
    }

    /// Write `record` as the only entry.
    pub fn write_single(&self, record: CompileRecord) -> Result<(), RecordError> {
        self.save(&[record.into()])
    }

    /// Keep the first existing entry (if any) and add `record` after it.
    ///
    /// Entries past the first are dropped. A corrupt file is left untouched.
    pub fn append(&self, record: CompileRecord) -> Result<(), RecordError> {
        let mut entries: Vec<DatabaseEntry> = self
            .load()?
            .and_then(|existing| existing.into_iter().next())
            .into_iter()
            .collect();
        entries.push(record.into());
        self.save(&entries)
    }

    /// Replace the file with `entries`, atomically.
    pub fn save(&self, entries: &[DatabaseEntry]) -> Result<(), RecordError> {
        let mut json = serde_json::to_string_pretty(entries)?;
        json.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_err = |source| RecordError::DatabaseIo {
            path: self.path.clone(),
            source,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;

        // Temp files start out owner-only; keep the target readable as before.
        let permissions = match fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => default_permissions(),
        };
        if let Some(permissions) = permissions {
            tmp.as_file().set_permissions(permissions).map_err(io_err)?;
        }
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    fn sample(file: &str) -> CompileRecord {
        CompileRecord {
            file: format!("/work/{file}"),
            command: format!("/usr/bin/gcc gcc -c {file}"),
            directory: "/work".to_string(),
            output: "/work/a.out".to_string(),
        }
    }

    #[test]
    fn test_record_matches_reference_example() {
        let record = CompileRecord::from_invocation(
            &args("gcc -c foo.c -o foo.o"),
            Path::new("/usr/bin/gcc"),
            Path::new("/work"),
        );
        assert_eq!(record.file, "/work/foo.c");
        assert_eq!(record.command, "/usr/bin/gcc gcc -c foo.c -o foo.o");
        assert_eq!(record.directory, "/work");
        assert_eq!(record.output, "/work/foo.o");
    }

    #[test]
    fn test_record_defaults_output_to_a_out() {
        let record = CompileRecord::from_invocation(
            &args("cc main.c"),
            Path::new("/usr/bin/cc"),
            Path::new("/src"),
        );
        assert_eq!(record.output, "/src/a.out");
    }

    #[test]
    fn test_output_name_trailing_flag_is_absent() {
        assert_eq!(output_name(&args("cc main.c -o")), DEFAULT_OUTPUT);
        assert_eq!(output_name(&args("cc -o out -o other main.c")), "out");
    }

    #[test]
    fn test_serialized_field_order() {
        let json = serde_json::to_string(&sample("a.c")).unwrap();
        let file = json.find("\"file\"").unwrap();
        let command = json.find("\"command\"").unwrap();
        let directory = json.find("\"directory\"").unwrap();
        let output = json.find("\"output\"").unwrap();
        assert!(file < command && command < directory && directory < output);
    }

    #[test]
    fn test_write_single_is_pretty_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let db = CompileDatabase::in_dir(dir.path());
        db.write_single(sample("a.c")).unwrap();

        let content = fs::read_to_string(db.path()).unwrap();
        assert!(content.starts_with("[\n  {\n    \"file\": \"/work/a.c\""));
        assert!(content.ends_with("]\n"));
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let db = CompileDatabase::in_dir(dir.path());
        assert!(db.load().unwrap().is_none());
    }

    #[test]
    fn test_append_keeps_only_first_prior_entry() {
        let dir = tempfile::tempdir().unwrap();
        let db = CompileDatabase::in_dir(dir.path());
        db.save(&[sample("a.c").into(), sample("b.c").into()]).unwrap();

        db.append(sample("c.c")).unwrap();

        let entries = db.load().unwrap().unwrap();
        assert_eq!(
            entries,
            vec![sample("a.c").into(), DatabaseEntry::from(sample("c.c"))]
        );
    }

    #[test]
    fn test_append_to_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let db = CompileDatabase::in_dir(dir.path());
        fs::write(db.path(), "[]\n").unwrap();

        db.append(sample("a.c")).unwrap();
        assert_eq!(db.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_append_preserves_foreign_entry() {
        let dir = tempfile::tempdir().unwrap();
        let db = CompileDatabase::in_dir(dir.path());
        fs::write(
            db.path(),
            r#"[{"directory": "/w", "arguments": ["cc", "-c", "x.c"], "file": "x.c"}]"#,
        )
        .unwrap();

        db.append(sample("a.c")).unwrap();

        let entries = db.load().unwrap().unwrap();
        match &entries[0] {
            DatabaseEntry::Foreign(value) => assert_eq!(value["arguments"][2], "x.c"),
            other => panic!("expected foreign entry, got {other:?}"),
        }
        assert_eq!(entries[1], DatabaseEntry::from(sample("a.c")));
    }

    #[test]
    fn test_append_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = CompileDatabase::in_dir(dir.path());
        fs::write(db.path(), "not json {").unwrap();

        let err = db.append(sample("a.c")).unwrap_err();
        assert!(matches!(err, RecordError::DatabaseCorrupt { .. }));
        assert_eq!(fs::read_to_string(db.path()).unwrap(), "not json {");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let db = CompileDatabase::in_dir(dir.path());
        fs::write(db.path(), "[]\n").unwrap();
        fs::set_permissions(db.path(), fs::Permissions::from_mode(0o664)).unwrap();

        db.write_single(sample("a.c")).unwrap();

        let mode = fs::metadata(db.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_database_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let db = CompileDatabase::in_dir(dir.path());
        db.write_single(sample("a.c")).unwrap();

        let mode = fs::metadata(db.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_foreign_entry_keeps_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let db = CompileDatabase::in_dir(dir.path());
        fs::write(
            db.path(),
            r#"[{"file": "x.c", "directory": "/w", "arguments": ["cc", "x.c"]}]"#,
        )
        .unwrap();

        db.append(sample("a.c")).unwrap();

        let raw = fs::read_to_string(db.path()).unwrap();
        let file = raw.find("\"x.c\"").unwrap();
        let directory = raw.find("\"/w\"").unwrap();
        let arguments = raw.find("\"arguments\"").unwrap();
        assert!(file < directory && directory < arguments);
    }

    #[test]
    fn test_non_array_json_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let db = CompileDatabase::in_dir(dir.path());
        fs::write(db.path(), r#"{"file": "a.c"}"#).unwrap();

        assert!(matches!(
            db.load(),
            Err(RecordError::DatabaseCorrupt { .. })
        ));
    }
}
