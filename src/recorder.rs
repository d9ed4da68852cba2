//! Compile-command recorder.
//!
//! Runs one compiler invocation, mirrors its exit status, and on success
//! records it into `compile_commands.json`.
//!
//! ```no_run
//! use buildutil::config::RecordOptions;
//! use buildutil::recorder::Recorder;
//!
//! let recorder = Recorder::new(RecordOptions::default())?;
//! let outcome = recorder.run("gcc -c foo.c -o foo.o")?;
//! std::process::exit(outcome.exit_code());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::config::RecordOptions;
use crate::database::{CompileDatabase, CompileRecord};
use crate::error::RecordError;
use colored::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};

/// What happened to a compiler invocation that could be started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Compiler succeeded and the database was written.
    Recorded(PathBuf),
    /// Compiler succeeded; recording was disabled.
    Compiled,
    /// Compiler exited with this non-zero status. Nothing was recorded.
    CompileFailed(i32),
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Recorded(_) | RunOutcome::Compiled => 0,
            RunOutcome::CompileFailed(code) => *code,
        }
    }
}

pub struct Recorder {
    options: RecordOptions,
    working_dir: PathBuf,
}

impl Recorder {
    /// Recorder bound to the process working directory.
    pub fn new(options: RecordOptions) -> Result<Self, RecordError> {
        let working_dir = std::env::current_dir().map_err(RecordError::WorkingDir)?;
        Ok(Self::in_dir(options, working_dir))
    }

    /// Recorder that compiles in, and records relative to, `working_dir`.
    ///
    /// A relative `working_dir` is made absolute against the process working
    /// directory so recorded paths stay absolute.
    pub fn in_dir(options: RecordOptions, working_dir: impl Into<PathBuf>) -> Self {
        let working_dir = working_dir.into();
        let working_dir = std::path::absolute(&working_dir).unwrap_or(working_dir);
        Self {
            options,
            working_dir,
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn database(&self) -> CompileDatabase {
        CompileDatabase::in_dir(&self.working_dir)
    }

    /// Run `command_line` and record it when it succeeds.
    pub fn run(&self, command_line: &str) -> Result<RunOutcome, RecordError> {
        let args = split_command_line(command_line)?;
        let compiler = self.resolve(&args[0])?;

        let output = Command::new(&compiler)
            .args(&args[1..])
            .current_dir(&self.working_dir)
            .output()
            .map_err(|e| RecordError::Spawn {
                program: args[0].clone(),
                source: e,
            })?;

        if !output.status.success() {
            if self.options.verbose {
                echo(&mut std::io::stderr(), &output.stderr);
            }
            return Ok(RunOutcome::CompileFailed(status_code(output.status)));
        }

        if self.options.verbose && !output.stdout.is_empty() {
            echo(&mut std::io::stdout(), &output.stdout);
        }
        self.forward_warnings(&output);

        if !self.options.record {
            return Ok(RunOutcome::Compiled);
        }

        let record = CompileRecord::from_invocation(&args, &compiler, &self.working_dir);
        let db = self.database();
        if self.options.append {
            db.append(record)?;
        } else {
            db.write_single(record)?;
        }
        Ok(RunOutcome::Recorded(db.path().to_path_buf()))
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, RecordError> {
        which::which_in(name, std::env::var_os("PATH"), &self.working_dir).map_err(|e| {
            RecordError::ExecutableNotFound {
                name: name.to_string(),
                source: e,
            }
        })
    }

    // Successful compiles can still emit warnings on stderr.
    fn forward_warnings(&self, output: &Output) {
        if self.options.verbose && !output.stderr.is_empty() {
            echo(&mut std::io::stderr(), &output.stderr);
        }
    }
}

/// Split a compiler command line on whitespace.
pub fn split_command_line(command_line: &str) -> Result<Vec<String>, RecordError> {
    let args: Vec<String> = command_line.split_whitespace().map(str::to_string).collect();
    if args.is_empty() {
        return Err(RecordError::EmptyCommand);
    }
    Ok(args)
}

/// Exit status of a finished child, with signals mapped to `128 + signal`.
fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

fn echo(stream: &mut impl Write, bytes: &[u8]) {
    let _ = stream.write_all(bytes);
    let _ = stream.flush();
}

/// Run `command_line` with `options` in the current directory and return the
/// exit status `buildutil` should terminate with.
///
/// Diagnostics for a missing compiler are printed only when verbose; database
/// failures are always reported.
pub fn run(command_line: &str, options: &RecordOptions) -> i32 {
    let result = Recorder::new(*options).and_then(|recorder| recorder.run(command_line));

    match result {
        Ok(outcome) => {
            if options.verbose {
                report_outcome(&outcome);
            }
            outcome.exit_code()
        }
        Err(e) => {
            let always = matches!(
                e,
                RecordError::WorkingDir(_)
                    | RecordError::DatabaseCorrupt { .. }
                    | RecordError::DatabaseIo { .. }
                    | RecordError::Serialize(_)
            );
            if options.verbose || always {
                report_error(&e);
            }
            e.exit_code()
        }
    }
}

fn report_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Recorded(path) => {
            eprintln!("{} Recorded to {}", "✓".green(), path.display());
        }
        RunOutcome::Compiled => {
            eprintln!("{} Compiled (recording disabled)", "✓".green());
        }
        RunOutcome::CompileFailed(code) => {
            eprintln!(
                "{} Compilation failed with exit code {}",
                "x".red(),
                code.to_string().bold()
            );
        }
    }
}

fn report_error(err: &RecordError) {
    eprintln!("{} {}", "x".red(), err);
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        eprintln!("   {} {}", "caused by:".dimmed(), cause);
        source = cause.source();
    }
}
