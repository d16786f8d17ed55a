//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations,
//! such as provisioning isolated per-entry workspaces.
//!
//! 此模块提供文件系统操作的实用功能，
//! 如为每个条目置备隔离的工作区。

use anyhow::{Context, Result};
use fs_extra::dir::{CopyOptions, copy};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Provisions an isolated workspace for one matrix entry.
///
/// The project tree is copied into a fresh temporary directory so entries
/// share no on-disk state; the directory is deleted when the returned guard
/// is dropped.
///
/// 为一个矩阵条目置备隔离的工作区。
///
/// 项目树被复制到一个新的临时目录中，因此条目之间不共享任何磁盘状态；
/// 当返回的 guard 被丢弃时，该目录会被删除。
///
/// # Arguments
/// * `project_root` - Path to the project root directory
/// * `entry_label` - Label of the matrix entry, used in the directory prefix
///
/// # Returns
/// The workspace path and the `TempDir` guard that owns it
pub fn create_entry_workspace(
    project_root: &Path,
    entry_label: &str,
) -> Result<(PathBuf, TempDir)> {
    let sanitized_label = entry_label
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>();

    let temp_dir = tempfile::Builder::new()
        .prefix(&format!("pipeline_runner_{}_", sanitized_label))
        .tempdir()
        .with_context(|| "Failed to create temporary workspace directory".to_string())?;

    let mut options = CopyOptions::new();
    options.overwrite = true;
    options.content_only = true;
    copy(project_root, temp_dir.path(), &options).with_context(|| {
        format!(
            "Failed to copy project into workspace: {}",
            temp_dir.path().display()
        )
    })?;

    let path = temp_dir.path().to_path_buf();

    Ok((path, temp_dir))
}

/// Checks if a path exists and is a directory.
///
/// # Arguments
/// * `path` - Path to check
///
/// # Returns
/// `true` if the path exists and is a directory, `false` otherwise
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

/// Gets the absolute path from a potentially relative path.
///
/// # Arguments
/// * `path` - Path to canonicalize
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}
