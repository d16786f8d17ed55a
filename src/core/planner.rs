//! # Execution Planner Module / 执行计划模块
//!
//! This module decides which matrix entries actually run: it applies the
//! `branches.only` gate and, in CI, splits the matrix across multiple
//! distributed runners.
//!
//! 此模块决定哪些矩阵条目实际运行：它应用 `branches.only` 门禁，
//! 并在 CI 中将矩阵拆分到多个分布式运行器上。

use crate::core::config::{MatrixEntry, Pipeline};
use anyhow::{Result, bail};

/// Represents a complete execution plan for a pipeline run.
/// 表示一次流水线运行的完整执行计划。
#[derive(Debug)]
pub struct ExecutionPlan {
    /// The matrix entries to be executed, in declaration order.
    /// 要执行的矩阵条目，按声明顺序排列。
    pub entries_to_run: Vec<MatrixEntry>,
    /// `true` if the whole run was gated off by `branches.only`.
    /// 如果整个运行被 `branches.only` 门禁挡下则为 `true`。
    pub branch_gated: bool,
    /// Whether the entries are distributed across multiple runners (CI environment).
    /// 条目是否分布在多个运行器上（CI 环境）。
    pub is_distributed: bool,
}

/// Creates an execution plan for the given pipeline.
///
/// The branch gate only applies when the current branch is known: a pipeline
/// with `branches.only = ["master"]` runs nothing for `--branch dev`, but runs
/// normally when no `--branch` is given (a plain local invocation).
///
/// 为给定的流水线创建执行计划。
///
/// 分支门禁仅在当前分支已知时适用：带有 `branches.only = ["master"]` 的流水线
/// 在 `--branch dev` 时什么都不运行，但在未给出 `--branch` 时（普通的本地调用）
/// 正常运行。
///
/// # Arguments
/// * `pipeline` - The loaded pipeline descriptor
/// * `current_branch` - The branch this run is for, if known
/// * `total_runners` - Optional total number of runners for distributed execution
/// * `runner_index` - Optional index of this runner (0-based)
///
/// # Returns
/// An `ExecutionPlan` with the gated and possibly distributed matrix entries
pub fn plan_execution(
    pipeline: &Pipeline,
    current_branch: Option<&str>,
    total_runners: Option<usize>,
    runner_index: Option<usize>,
) -> Result<ExecutionPlan> {
    // Apply the branch gate first: a gated run has nothing to distribute.
    if let (Some(branches), Some(branch)) = (&pipeline.branches, current_branch) {
        if !branches.only.is_empty() && !branches.only.iter().any(|b| b == branch) {
            return Ok(ExecutionPlan {
                entries_to_run: vec![],
                branch_gated: true,
                is_distributed: false,
            });
        }
    }

    let entries = pipeline.matrix.clone();

    // Distribute entries if running in CI
    let (entries_to_run, is_distributed) =
        if let (Some(total), Some(index)) = (total_runners, runner_index) {
            if index >= total {
                bail!("Runner index must be less than total runners.");
            }
            let distributed: Vec<_> = entries
                .into_iter()
                .enumerate()
                .filter(|(i, _)| i % total == index)
                .map(|(_, entry)| entry)
                .collect();
            (distributed, true)
        } else {
            if total_runners.is_some() || runner_index.is_some() {
                bail!("Both --total-runners and --runner-index must be provided.");
            }
            (entries, false)
        };

    Ok(ExecutionPlan {
        entries_to_run,
        branch_gated: false,
        is_distributed,
    })
}
