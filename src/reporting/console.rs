//! # Console Reporting Module / 控制台报告模块
//!
//! This module handles the generation and display of run reports in the
//! console. It provides functionality for printing colorful, formatted
//! summaries with internationalization support.
//!
//! 此模块处理控制台中运行报告的生成和显示。
//! 它提供打印彩色格式化摘要的功能，支持国际化。

use crate::core::models::EntryResult;
use crate::infra::t;
use colored::*;

/// Prints a formatted summary of entry results to the console.
/// Displays a table with entry status, label and duration, using color
/// coding to highlight different statuses.
///
/// 在控制台打印格式化的条目结果摘要。
/// 显示一个包含条目状态、标签和持续时间的表格，使用颜色编码突出显示不同的状态。
///
/// # Output Format / 输出格式
/// ```text
/// --- Pipeline Summary ---
///   - Passed           | linux/3.6            |      1.23s
///   - Passed (upload warning) | linux/3.7     |      1.10s
///   - Failed           | osx/3.7              |      0.45s
///   - Skipped          | Skipped              |        N/A
/// ```
pub fn print_summary(results: &[EntryResult], locale: &str) {
    println!("\n{}", t!("report.summary_banner", locale = locale).bold());

    for result in results {
        let status_str = result.get_status_str(locale);
        let duration_str = result
            .get_duration()
            .map(|d| format!("{:.2?}", d))
            .unwrap_or_else(|| "N/A".to_string());

        let status_colored = match result {
            EntryResult::Passed {
                after_success_ok: true,
                ..
            } => status_str.green(),
            EntryResult::Passed { .. } => status_str.yellow(),
            EntryResult::Failed { .. } => status_str.red(),
            EntryResult::Skipped => status_str.dimmed(),
        };

        println!(
            "  - {:<24} | {:<24} | {:>10}",
            status_colored,
            result.entry_label(),
            duration_str
        );
    }
}

/// Prints detailed information about failed entries.
/// Shows the failing phase and the full step output for each entry,
/// helping developers debug issues.
///
/// 打印失败条目的详细信息。
/// 显示每个条目的失败阶段和完整步骤输出，帮助开发者调试问题。
pub fn print_failure_details(failures: &[&EntryResult], locale: &str) {
    if failures.is_empty() {
        return;
    }

    println!(
        "\n{}",
        t!("report.failure_banner", locale = locale).red().bold()
    );
    println!("{}", "-".repeat(80));

    for (i, result) in failures.iter().enumerate() {
        println!(
            "[{}/{}] {} '{}'",
            i + 1,
            failures.len(),
            t!("report.header_failure", locale = locale).red(),
            result.entry_label().cyan()
        );

        if let EntryResult::Failed { output, phase, .. } = result {
            println!(
                "\n--- {} ---\n",
                t!(
                    "report.phase_log",
                    locale = locale,
                    phase = phase.display_name(locale)
                )
                .yellow()
            );
            println!("{}", output);
            println!("\n{}", "-".repeat(80));
        }
    }
}

/// Prints one warning line per entry whose `after_success` phase failed.
/// These entries still count as passed.
///
/// 为每个 `after_success` 阶段失败的条目打印一行警告。这些条目仍算作通过。
pub fn print_after_success_warnings(results: &[EntryResult], locale: &str) {
    let warned: Vec<_> = results
        .iter()
        .filter(|r| r.has_after_success_warning())
        .collect();
    if warned.is_empty() {
        return;
    }

    println!(
        "\n{}",
        t!("report.warnings_banner", locale = locale).yellow().bold()
    );
    for result in warned {
        println!(
            "  - {}",
            t!(
                "report.after_success_warning_line",
                locale = locale,
                name = result.entry_label()
            )
            .yellow()
        );
    }
}

/// Gets the error output from an entry result for display.
///
/// 获取条目结果的错误输出以供显示。
pub fn get_error_output_from_result(result: &EntryResult, locale: &str) -> String {
    match result {
        EntryResult::Failed { output, .. } => output.clone(),
        _ => t!("report.no_error_output", locale = locale).to_string(),
    }
}
