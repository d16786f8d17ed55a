//! # Pipeline Descriptor Module / 流水线描述符模块
//!
//! This module defines the declarative surface of a pipeline: the build
//! matrix, the branch gate and the ordered step lists. A descriptor is
//! loaded once from a TOML file and never mutated afterwards.
//!
//! 此模块定义流水线的声明式表面：构建矩阵、分支门禁和有序步骤列表。
//! 描述符从 TOML 文件加载一次，此后不再修改。

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::infra::t;

/// The operating-system family a matrix entry is declared for.
/// The runner does not provision foreign hosts itself; the value is exported
/// to every step as `PIPELINE_OS` so the install commands can branch on it.
///
/// 矩阵条目声明的操作系统系列。
/// 运行器本身不置备外部主机；该值以 `PIPELINE_OS` 的形式导出给每个步骤，
/// 以便安装命令根据它进行分支。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Linux,
    Osx,
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Linux => write!(f, "linux"),
            OsFamily::Osx => write!(f, "osx"),
        }
    }
}

/// One concrete combination of OS, runtime version and environment variable
/// under which the pipeline runs independently. Instantiated at load time,
/// one instance per matrix entry, never mutated.
///
/// 操作系统、运行时版本和环境变量的一个具体组合，
/// 流水线在其下独立运行。在加载时实例化，每个矩阵条目一个实例，从不修改。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatrixEntry {
    /// The declared operating-system family for this entry.
    /// 此条目声明的操作系统系列。
    pub os: OsFamily,
    /// The language runtime version to provision (e.g. "3.6").
    /// Exported to every step as `PIPELINE_RUNTIME`.
    /// 要置备的语言运行时版本（例如 "3.6"）。
    /// 以 `PIPELINE_RUNTIME` 的形式导出给每个步骤。
    pub runtime: String,
    /// A single `NAME=VALUE` environment variable visible to all steps of
    /// this entry. Overrides a global pair of the same name.
    /// 对此条目所有步骤可见的单个 `NAME=VALUE` 环境变量。
    /// 覆盖同名的全局变量。
    #[serde(default)]
    pub env: Option<String>,
}

impl MatrixEntry {
    /// A short human-readable label, e.g. `linux/3.6`.
    /// 简短的人类可读标签，例如 `linux/3.6`。
    pub fn label(&self) -> String {
        format!("{}/{}", self.os, self.runtime)
    }
}

impl Default for MatrixEntry {
    fn default() -> Self {
        Self {
            os: OsFamily::Linux,
            runtime: "unknown".to_string(),
            env: None,
        }
    }
}

/// Restricts execution to runs on the listed branch names.
/// An empty list means no restriction.
/// 将执行限制在列出的分支名称上。空列表表示不限制。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Branches {
    #[serde(default)]
    pub only: Vec<String>,
}

/// The entire pipeline descriptor, loaded from a TOML file.
/// Field order matters for serialization: plain values and arrays first,
/// tables last, so `toml::to_string_pretty` produces a valid document.
///
/// 从 TOML 文件加载的完整流水线描述符。
/// 字段顺序对序列化很重要：普通值和数组在前，表在后，
/// 这样 `toml::to_string_pretty` 才能生成有效的文档。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Pipeline {
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// Defaults to "en" if not specified.
    ///
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    /// 如果未指定，则默认为 "en"。
    #[serde(default = "default_language")]
    pub language: String,

    /// Global `NAME=VALUE` pairs visible to every step of every entry.
    /// 对每个条目的每个步骤可见的全局 `NAME=VALUE` 对。
    #[serde(default)]
    pub env: Vec<String>,

    /// Ordered shell commands executed before the test phase.
    /// 在测试阶段之前执行的有序 shell 命令。
    #[serde(default)]
    pub install: Vec<String>,

    /// Ordered shell commands constituting the test phase. Their exit codes
    /// determine pass/fail for the entry.
    /// 构成测试阶段的有序 shell 命令。它们的退出码决定条目的通过/失败。
    #[serde(default)]
    pub script: Vec<String>,

    /// Ordered shell commands run only if every `script` command succeeded.
    /// Best-effort: a failure here never fails the entry.
    /// 仅当每个 `script` 命令都成功时才运行的有序 shell 命令。
    /// 尽力而为：此处的失败永远不会使条目失败。
    #[serde(default)]
    pub after_success: Vec<String>,

    /// Optional branch gate for the whole run.
    /// 整个运行的可选分支门禁。
    #[serde(default)]
    pub branches: Option<Branches>,

    /// The declared build matrix. Fixed and finite, known entirely at load
    /// time; the runner never expands it dynamically.
    /// 声明的构建矩阵。固定且有限，在加载时完全已知；运行器从不动态展开它。
    pub matrix: Vec<MatrixEntry>,
}

fn default_language() -> String {
    "en".to_string()
}

/// Splits a `NAME=VALUE` declaration on the first `=`.
/// 在第一个 `=` 处拆分 `NAME=VALUE` 声明。
pub fn parse_env_pair(pair: &str) -> Result<(String, String)> {
    match pair.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => bail!(t!("config.bad_env_pair", pair = pair)),
    }
}

/// Loads and validates a pipeline descriptor from disk.
///
/// Validation catches what would otherwise surface mid-run: an empty matrix
/// and malformed environment declarations (global or per-entry).
///
/// 从磁盘加载并验证流水线描述符。
///
/// 验证会捕获那些否则会在运行中途才暴露的问题：
/// 空矩阵和格式错误的环境变量声明（全局或逐条目）。
pub fn load_pipeline(path: &Path) -> Result<Pipeline> {
    let content = fs::read_to_string(path)
        .with_context(|| t!("config.read_failed_path", path = path.display()))?;
    let pipeline: Pipeline =
        toml::from_str(&content).with_context(|| t!("config.parse_failed"))?;

    if pipeline.matrix.is_empty() {
        bail!(t!("config.empty_matrix"));
    }
    for pair in &pipeline.env {
        parse_env_pair(pair)?;
    }
    for entry in &pipeline.matrix {
        if let Some(pair) = &entry.env {
            parse_env_pair(pair)
                .with_context(|| t!("config.bad_entry_env", entry = entry.label()))?;
        }
    }

    Ok(pipeline)
}
