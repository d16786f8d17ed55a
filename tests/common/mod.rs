// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

/// Creates a minimal project directory for the runner to provision
/// workspaces from.
pub fn setup_project_dir() -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary project directory");
    fs::write(
        temp_dir.path().join("README.md"),
        "sample project for pipeline-runner tests\n",
    )
    .expect("Failed to write sample project file");
    temp_dir
}

/// Writes a pipeline descriptor into the given directory and returns its path.
pub fn write_pipeline(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write pipeline descriptor");
    path
}

/// Builds the canonical four-entry descriptor (linux/3.6, linux/3.7, osx/3.6,
/// osx/3.7) around the given phase commands. `marker_dir` is exported to all
/// steps as `MARKER_DIR` so commands can leave observable traces outside the
/// per-entry workspaces.
pub fn four_entry_pipeline(
    marker_dir: &str,
    install: &str,
    script: &str,
    after_success: &str,
) -> String {
    format!(
        r#"
language = "en"
env = ["MARKER_DIR={marker_dir}"]
install = [{install}]
script = [{script}]
after_success = [{after_success}]

[[matrix]]
os = "linux"
runtime = "3.6"
env = "TOXENV=py36"

[[matrix]]
os = "linux"
runtime = "3.7"
env = "TOXENV=py37"

[[matrix]]
os = "osx"
runtime = "3.6"
env = "TOXENV=py36"

[[matrix]]
os = "osx"
runtime = "3.7"
env = "TOXENV=py37"
"#
    )
}

/// The after_success command used by the concrete coverage-upload scenarios:
/// leaves one marker file per entry that reached the upload step.
pub fn coverage_marker_command() -> &'static str {
    r#""touch $MARKER_DIR/cov-$PIPELINE_OS-$PIPELINE_RUNTIME""#
}

/// Counts the coverage markers left behind by `coverage_marker_command`.
pub fn count_coverage_markers(marker_dir: &std::path::Path) -> usize {
    fs::read_dir(marker_dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|e| e.file_name().to_string_lossy().starts_with("cov-"))
                .count()
        })
        .unwrap_or(0)
}
