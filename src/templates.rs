//! File templates for `cmake-new`.
//!
//! Every generated project has the same shape:
//!
//! - `include/<name>.h` and `src/<name>.cpp` - a tiny `example::add` library
//! - `src/main.cpp` - only for executable projects
//! - `tests/test_<name>.cpp` - GoogleTest sample
//! - `benchmarks/benchmark_<name>.cpp` - Google Benchmark sample (optional)
//! - `CMakeLists.txt`, `README.md`, and optionally `.clang-format`

use crate::config::ProjectConfig;

const GOOGLETEST_URL: &str =
    "https://github.com/google/googletest/archive/refs/tags/release-1.12.1.zip";
const BENCHMARK_URL: &str = "https://github.com/google/benchmark/archive/refs/tags/v1.6.1.zip";

pub fn header(name: &str) -> String {
    let guard = format!("{}_H", name.to_uppercase().replace('-', "_"));
    format!(
        r#"#ifndef {guard}
#define {guard}

#include <iostream>

namespace example
{{
    int add(int a, int b);
}}

#endif
"#
    )
}

pub fn library_source(name: &str) -> String {
    format!(
        r#"#include "{name}.h"
namespace example
{{
    int add(int a, int b)
    {{
        return a + b;
    }}
}}
"#
    )
}

pub fn main_source(name: &str) -> String {
    format!(
        r#"#include "{name}.h"

int main(int argc, char* argv [])
{{
    std::cout << "Hello result: " << example::add(2, 4) << "\n";
}}
"#
    )
}

pub fn test_source(name: &str) -> String {
    format!(
        r#"#include <gtest/gtest.h>
#include "{name}.h"

TEST(HelloTest, BasicAssertions)
{{
    // Expect two strings not to be equal.
    EXPECT_STRNE("hello", "world");
    // Expect equality.
    EXPECT_EQ(7 * 6, 42);
}}

int main(int argc, char **argv)
{{
    ::testing::InitGoogleTest(&argc, argv);
    return RUN_ALL_TESTS();
}}
"#
    )
}

pub fn benchmark_source() -> &'static str {
    r#"#include <benchmark/benchmark.h>
#include <vector>
#include <algorithm>

// Example function to benchmark
void ExampleFunction(std::vector<int>& data)
{
    std::sort(data.begin(), data.end());
}

static void BM_ExampleFunction(benchmark::State& state)
{
    std::vector<int> data(state.range(0));
    std::generate(data.begin(), data.end(), std::rand);

    for(auto _ : state)
    {
        // Sort a fresh copy every iteration
        std::vector<int> data_copy = data;
        ExampleFunction(data_copy);
    }

    state.SetItemsProcessed(state.iterations() * state.range(0));
}

BENCHMARK(BM_ExampleFunction)->Range(8, 8<<10);

BENCHMARK_MAIN();
"#
}

pub fn cmake_lists(config: &ProjectConfig) -> String {
    let name = &config.name;
    let mut content = format!(
        r#"cmake_minimum_required(VERSION 3.12)
project({name})

# Create compile_commands.json in build directory
set(CMAKE_EXPORT_COMPILE_COMMANDS ON)

# Set C++ standard
set(CMAKE_CXX_STANDARD {std})
set(CMAKE_CXX_STANDARD_REQUIRED True)

# Add include directory
include_directories(include)
"#,
        std = config.std.cmake_version()
    );

    if config.lib {
        content.push_str(&format!(
            r#"
# Library target
add_library({name}
    src/{name}.cpp
)
"#
        ));
    } else {
        content.push_str(&format!(
            r#"
# Executable target
add_executable({name}
    src/main.cpp
    include/{name}.h
    src/{name}.cpp
)
"#
        ));
    }

    content.push_str(&format!(
        r#"
# Fetch GoogleTest
include(FetchContent)
FetchContent_Declare(
    googletest
    URL {GOOGLETEST_URL}
)
# For Windows: Prevent overriding the parent project's compiler/linker settings
set(gtest_force_shared_crt ON CACHE BOOL "" FORCE)
FetchContent_MakeAvailable(googletest)

# Enable testing
enable_testing()

# Add test executable
add_executable(test_{name}
    tests/test_{name}.cpp
)

# Link test executable against gtest & gtest_main
target_link_libraries(test_{name}
    gtest_main
)

include(GoogleTest)
gtest_discover_tests(test_{name})
"#
    ));

    if config.asan {
        content.push_str(
            r#"
# Enable AddressSanitizer
if (CMAKE_CXX_COMPILER_ID MATCHES "Clang" OR CMAKE_CXX_COMPILER_ID MATCHES "GNU")
    set(ASAN_FLAGS "-fsanitize=address -fno-omit-frame-pointer")
    set(CMAKE_CXX_FLAGS "${CMAKE_CXX_FLAGS} ${ASAN_FLAGS}")
    set(CMAKE_C_FLAGS "${CMAKE_C_FLAGS} ${ASAN_FLAGS}")
    set(CMAKE_EXE_LINKER_FLAGS "${CMAKE_EXE_LINKER_FLAGS} ${ASAN_FLAGS}")
    set(CMAKE_SHARED_LINKER_FLAGS "${CMAKE_SHARED_LINKER_FLAGS} ${ASAN_FLAGS}")
endif()
"#,
        );
    }

    if config.benchmark {
        content.push_str(&format!(
            r#"
# Fetch Google Benchmark
FetchContent_Declare(
    googlebenchmark
    URL {BENCHMARK_URL}
)
FetchContent_MakeAvailable(googlebenchmark)

# Add benchmark executable
add_executable(benchmark_{name}
    benchmarks/benchmark_{name}.cpp
)

# Link benchmark executable against benchmark library
target_link_libraries(benchmark_{name}
    benchmark::benchmark
)
"#
        ));
    }

    content
}

pub fn clang_format() -> &'static str {
    r#"Language:        Cpp
BasedOnStyle:    Google
IndentWidth:     4
TabWidth:        4
UseTab:          Never
BreakBeforeBraces: Allman
AllowShortIfStatementsOnASingleLine: false
ColumnLimit:     80
PointerAlignment: Left
SpaceAfterControlStatementKeyword: true
IndentPPDirectives: AfterHash
ConstructorInitializerIndentWidth: 2
ContinuationIndentWidth: 2
SpaceBeforeParens: Custom
SpaceBeforeParensOptions:
  AfterControlStatements: false
"#
}

pub fn readme(name: &str) -> String {
    format!(
        r#"{name}

## About
Add description here
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CppStandard;

    #[test]
    fn test_header_guard_uses_upper_name() {
        let h = header("my-lib");
        assert!(h.contains("#ifndef MY_LIB_H"));
        assert!(h.contains("#define MY_LIB_H"));
        assert!(h.contains("int add(int a, int b);"));
    }

    #[test]
    fn test_sources_include_project_header() {
        assert!(library_source("calc").contains("#include \"calc.h\""));
        assert!(main_source("calc").contains("example::add(2, 4)"));
        assert!(test_source("calc").contains("RUN_ALL_TESTS()"));
    }

    #[test]
    fn test_benchmark_source_has_single_braces() {
        let src = benchmark_source();
        assert!(src.contains("BENCHMARK_MAIN();"));
        assert!(!src.contains("{{"));
    }

    #[test]
    fn test_cmake_executable_project() {
        let mut config = ProjectConfig::new("app");
        config.std = CppStandard::Cpp20;
        let cmake = cmake_lists(&config);
        assert!(cmake.contains("project(app)"));
        assert!(cmake.contains("set(CMAKE_CXX_STANDARD 20)"));
        assert!(cmake.contains("add_executable(app\n    src/main.cpp"));
        assert!(!cmake.contains("add_library"));
        assert!(cmake.contains("gtest_discover_tests(test_app)"));
        assert!(!cmake.contains("ASAN_FLAGS"));
        assert!(!cmake.contains("googlebenchmark"));
    }

    #[test]
    fn test_cmake_library_project() {
        let mut config = ProjectConfig::new("core");
        config.lib = true;
        let cmake = cmake_lists(&config);
        assert!(cmake.contains("add_library(core\n    src/core.cpp\n)"));
        assert!(!cmake.contains("src/main.cpp"));
    }

    #[test]
    fn test_cmake_optional_blocks() {
        let mut config = ProjectConfig::new("fast");
        config.asan = true;
        config.benchmark = true;
        let cmake = cmake_lists(&config);
        assert!(cmake.contains("-fsanitize=address -fno-omit-frame-pointer"));
        assert!(cmake.contains("${CMAKE_CXX_FLAGS} ${ASAN_FLAGS}"));
        assert!(cmake.contains(BENCHMARK_URL));
        assert!(cmake.contains("benchmarks/benchmark_fast.cpp"));
        assert!(cmake.contains("benchmark::benchmark"));
    }

    #[test]
    fn test_readme_starts_with_name() {
        assert!(readme("tool").starts_with("tool\n\n## About"));
    }
}
