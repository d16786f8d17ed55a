//! # JSON Reporting Module / JSON 报告模块
//!
//! Serializes the run outcome to a machine-readable JSON file, for
//! consumption by dashboards or follow-up tooling.
//!
//! 将运行结果序列化为机器可读的 JSON 文件，供仪表盘或后续工具使用。

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::models::EntryResult;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    total: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
    after_success_warnings: usize,
    entries: &'a [EntryResult],
}

/// Writes a JSON report of all entry results to `output_path`.
/// 将所有条目结果的 JSON 报告写入 `output_path`。
pub fn write_json_report(results: &[EntryResult], output_path: &Path) -> Result<()> {
    let report = JsonReport {
        generated_at: chrono::Local::now().to_rfc3339(),
        total: results.len(),
        passed: results
            .iter()
            .filter(|r| matches!(r, EntryResult::Passed { .. }))
            .count(),
        failed: results.iter().filter(|r| r.is_failure()).count(),
        skipped: results
            .iter()
            .filter(|r| matches!(r, EntryResult::Skipped))
            .count(),
        after_success_warnings: results
            .iter()
            .filter(|r| r.has_after_success_warning())
            .count(),
        entries: results,
    };

    let content = serde_json::to_string_pretty(&report)
        .context("Failed to serialize the JSON report")?;
    fs::write(output_path, content)
        .with_context(|| format!("Failed to write JSON report: {}", output_path.display()))?;
    Ok(())
}
