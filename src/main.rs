//! # buildutil CLI Entry Point
//!
//! Runs one compiler command and records it into `compile_commands.json`.
//! The process exits with the compiler's own exit status.

use clap::Parser;

use buildutil::config::RecordOptions;
use buildutil::recorder;

#[derive(Parser)]
#[command(name = "buildutil")]
#[command(about = "Simple build utility for C/C++", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Cli {
    /// Compiler command, quoted as one argument (e.g. "g++ -c main.cpp -o main.o")
    cmd: String,
    /// Create compile_commands.json file for the build [default: on]
    #[arg(short = 'c', long = "compile-commands")]
    compile_commands: bool,
    /// Merge with the existing compile_commands.json instead of overwriting it
    #[arg(short = 'a', long)]
    append: bool,
    /// Do not write compile_commands.json
    #[arg(long, conflicts_with = "compile_commands")]
    no_record: bool,
    /// Echo compiler output and diagnostics
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> RecordOptions {
        RecordOptions {
            record: !self.no_record,
            append: self.append,
            verbose: self.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let code = recorder::run(&cli.cmd, &cli.options());
    std::process::exit(code);
}
