use clap::ValueEnum;
use serde::Serialize;

/// Options controlling a single `buildutil` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOptions {
    /// Write a record to `compile_commands.json` after a successful compile.
    pub record: bool,
    /// Merge with the existing database instead of overwriting it.
    pub append: bool,
    /// Echo captured compiler output and diagnostics.
    pub verbose: bool,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            record: true,
            append: false,
            verbose: false,
        }
    }
}

/// C++ language standards offered by `cmake-new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
pub enum CppStandard {
    #[default]
    #[value(name = "c++11")]
    #[serde(rename = "c++11")]
    Cpp11,
    #[value(name = "c++14")]
    #[serde(rename = "c++14")]
    Cpp14,
    #[value(name = "c++17")]
    #[serde(rename = "c++17")]
    Cpp17,
    #[value(name = "c++20")]
    #[serde(rename = "c++20")]
    Cpp20,
}

impl CppStandard {
    /// The value CMake expects for `CMAKE_CXX_STANDARD` ("c++17" -> "17").
    pub fn cmake_version(&self) -> &'static str {
        match self {
            CppStandard::Cpp11 => "11",
            CppStandard::Cpp14 => "14",
            CppStandard::Cpp17 => "17",
            CppStandard::Cpp20 => "20",
        }
    }
}

/// Everything the scaffolder needs to render a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    pub name: String,
    pub std: CppStandard,
    /// Library project (no `main.cpp`, `add_library` target).
    pub lib: bool,
    /// Add a Google Benchmark target.
    pub benchmark: bool,
    /// Enable AddressSanitizer flags in `CMakeLists.txt`.
    pub asan: bool,
    /// Write a `.clang-format` file.
    pub format_file: bool,
}

impl ProjectConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            std: CppStandard::default(),
            lib: false,
            benchmark: false,
            asan: false,
            format_file: false,
        }
    }
}
