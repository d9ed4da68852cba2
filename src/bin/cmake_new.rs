//! # cmake-new CLI Entry Point
//!
//! Creates a CMake project with a GoogleTest setup.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use colored::*;
use inquire::Text;

use buildutil::config::{CppStandard, ProjectConfig};
use buildutil::scaffold;

#[derive(Parser)]
#[command(name = "cmake-new")]
#[command(about = "Create a simple CMake project with GoogleTest setup", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Cli {
    /// The name of the project (prompted for when omitted)
    project_name: Option<String>,
    /// The C++ standard version
    #[arg(long, value_enum, default_value_t = CppStandard::Cpp11)]
    std: CppStandard,
    /// Create library project instead of program project
    #[arg(long)]
    lib: bool,
    /// The root path where the project will be created
    #[arg(long, default_value = ".")]
    path: String,
    /// Add Google Benchmark into the project
    #[arg(long = "add-benchmark")]
    benchmark: bool,
    /// Enable address sanitizer
    #[arg(long = "enable-asan")]
    asan: bool,
    /// Create .clang-format file
    #[arg(long = "create-formatfile")]
    format_file: bool,
    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Cli {
    fn project_config(&self, name: String) -> ProjectConfig {
        ProjectConfig {
            name,
            std: self.std,
            lib: self.lib,
            benchmark: self.benchmark,
            asan: self.asan,
            format_file: self.format_file,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        return Ok(());
    }

    let name = match &cli.project_name {
        Some(n) => n.clone(),
        None => Text::new("What is your project name?")
            .with_default("my-app")
            .prompt()?,
    };

    let config = cli.project_config(name);
    let root = scaffold::expand_home(&cli.path);

    let written = scaffold::create_project(&root, &config)
        .with_context(|| format!("Failed to create project in {}", root.display()))?;

    for path in &written {
        println!("   {} Created {}", "+".green(), path.display());
    }

    let settings = toml::to_string_pretty(&config).context("Failed to render settings")?;
    println!();
    for line in settings.lines() {
        println!("   {}", line.dimmed());
    }
    println!();
    println!(
        "{} CMake project '{}' created successfully in '{}'!",
        "✓".green(),
        config.name.bold(),
        cli.path
    );
    println!("  cmake -S {} -B build && cmake --build build", cli.path);
    Ok(())
}
