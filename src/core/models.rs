//! # Data Models Module / 数据模型模块
//!
//! This module defines the result structures produced by running matrix
//! entries, including the failure-phase taxonomy used for reporting.
//!
//! 此模块定义运行矩阵条目产生的结果结构，
//! 包括用于报告的失败阶段分类。

use crate::core::config::MatrixEntry;
use crate::infra::t;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The phase in which a matrix entry failed. Failures in any of these
/// phases are fatal to the entry; `after_success` failures are not part of
/// this taxonomy because they never fail an entry.
///
/// 矩阵条目失败的阶段。这些阶段中的任何失败对条目都是致命的；
/// `after_success` 的失败不属于此分类，因为它们永远不会使条目失败。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum FailurePhase {
    /// The isolated workspace or entry environment could not be set up.
    /// 无法建立隔离的工作区或条目环境。
    Provision,
    /// A command in the `install` phase exited non-zero.
    /// `install` 阶段中的某个命令以非零退出。
    Install,
    /// A command in the `script` (test) phase exited non-zero.
    /// `script`（测试）阶段中的某个命令以非零退出。
    Script,
}

impl FailurePhase {
    /// Localized display name of the phase.
    /// 阶段的本地化显示名称。
    pub fn display_name(&self, locale: &str) -> String {
        match self {
            FailurePhase::Provision => t!("phase.provision", locale = locale).to_string(),
            FailurePhase::Install => t!("phase.install", locale = locale).to_string(),
            FailurePhase::Script => t!("phase.script", locale = locale).to_string(),
        }
    }
}

/// The final result of executing a single matrix entry.
/// 执行单个矩阵条目的最终结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntryResult {
    /// Every `install` and `script` command exited zero.
    /// 每个 `install` 和 `script` 命令都以零退出。
    Passed {
        /// The matrix entry that was executed / 执行的矩阵条目
        entry: MatrixEntry,
        /// The combined output of all steps / 所有步骤的合并输出
        output: String,
        /// Wall-clock time for the whole entry / 整个条目的墙钟时间
        duration: Duration,
        /// `false` if an `after_success` command failed. The entry still
        /// counts as passed; the failure is surfaced as a warning only.
        /// 如果某个 `after_success` 命令失败则为 `false`。
        /// 条目仍算作通过；该失败仅作为警告显示。
        after_success_ok: bool,
    },
    /// A fatal step failed; no later step of this entry ran.
    /// 某个致命步骤失败；此条目的后续步骤均未运行。
    Failed {
        /// The matrix entry that failed / 失败的矩阵条目
        entry: MatrixEntry,
        /// The combined output up to and including the failing step
        /// 直到并包括失败步骤的合并输出
        output: String,
        /// The phase in which the failure occurred / 失败发生的阶段
        phase: FailurePhase,
        /// Time spent before the failure / 失败前花费的时间
        duration: Duration,
    },
    /// The entry never ran (the run was interrupted).
    /// 条目从未运行（运行被中断）。
    Skipped,
}

impl EntryResult {
    /// Checks if the result is any kind of fatal failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, EntryResult::Failed { .. })
    }

    /// Checks if the entry passed but its `after_success` phase failed.
    pub fn has_after_success_warning(&self) -> bool {
        matches!(
            self,
            EntryResult::Passed {
                after_success_ok: false,
                ..
            }
        )
    }

    /// Gets the label of the entry. Returns "Skipped" for skipped entries.
    /// 获取条目的标签。对于跳过的条目，返回 "Skipped"。
    pub fn entry_label(&self) -> String {
        match self {
            EntryResult::Passed { entry, .. } => entry.label(),
            EntryResult::Failed { entry, .. } => entry.label(),
            EntryResult::Skipped => "Skipped".to_string(),
        }
    }

    /// Gets the status of the entry result as a string for display.
    /// 以字符串形式获取条目结果的状态以供显示。
    pub fn get_status_str(&self, locale: &str) -> String {
        match self {
            EntryResult::Passed {
                after_success_ok: true,
                ..
            } => t!("report.status_passed", locale = locale).to_string(),
            EntryResult::Passed { .. } => {
                t!("report.status_passed_warn", locale = locale).to_string()
            }
            EntryResult::Failed { .. } => t!("report.status_failed", locale = locale).to_string(),
            EntryResult::Skipped => t!("report.status_skipped", locale = locale).to_string(),
        }
    }

    /// Gets the appropriate CSS class for the entry status.
    pub fn get_status_class(&self) -> &str {
        match self {
            EntryResult::Passed {
                after_success_ok: true,
                ..
            } => "status-Passed",
            EntryResult::Passed { .. } => "status-Passed-Warning",
            EntryResult::Failed { .. } => "status-Failed",
            EntryResult::Skipped => "status-Skipped",
        }
    }

    /// Gets the combined step output. Returns an empty string if there is none.
    /// 获取合并的步骤输出。如果没有，则返回空字符串。
    pub fn get_output(&self) -> String {
        match self {
            EntryResult::Passed { output, .. } => output.clone(),
            EntryResult::Failed { output, .. } => output.clone(),
            EntryResult::Skipped => String::new(),
        }
    }

    /// Gets the duration of the entry. Returns None if it never ran.
    /// 获取条目的持续时间。如果从未运行，则返回 None。
    pub fn get_duration(&self) -> Option<Duration> {
        match self {
            EntryResult::Passed { duration, .. } => Some(*duration),
            EntryResult::Failed { duration, .. } => Some(*duration),
            EntryResult::Skipped => None,
        }
    }

    /// Gets the failure phase, if the entry failed.
    pub fn get_failure_phase(&self) -> Option<FailurePhase> {
        match self {
            EntryResult::Failed { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

impl fmt::Display for EntryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
