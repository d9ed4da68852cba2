//! # buildutil - small C/C++ developer tools
//!
//! Two command-line tools share this crate:
//!
//! - `buildutil` runs a single compiler command and records it into
//!   `compile_commands.json` so editors and analyzers can reproduce it.
//! - `cmake-new` scaffolds a CMake project with GoogleTest, and optionally
//!   Google Benchmark, AddressSanitizer and a `.clang-format` file.
//!
//! ## Quick Start
//!
//! ```bash
//! # Compile and record
//! buildutil "g++ -c main.cpp -o main.o"
//!
//! # Compile and merge with the existing database
//! buildutil -ca "g++ -c util.cpp -o util.o"
//!
//! # New library project with benchmarks
//! cmake-new mylib --lib --std c++17 --add-benchmark
//! ```
//!
//! ## Module Organization
//!
//! - [`recorder`] - Runs the compiler and decides what gets recorded
//! - [`database`] - `compile_commands.json` records and persistence
//! - [`scaffold`] - Project layout rendering and writing
//! - [`templates`] - File contents for scaffolded projects

/// Typed options for both tools.
pub mod config;

/// Compilation database records and persistence.
pub mod database;

/// Error types and exit codes.
pub mod error;

/// Compiler invocation and recording.
pub mod recorder;

/// Project scaffolding (`cmake-new`).
pub mod scaffold;

/// Project file templates.
pub mod templates;
