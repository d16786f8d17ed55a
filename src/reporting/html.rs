//! # HTML Reporting Module / HTML 报告模块
//!
//! This module handles the generation of HTML run reports.
//! It creates styled HTML files with entry statistics, a detailed results
//! table, and interactive features for viewing failure output.
//!
//! 此模块处理 HTML 运行报告的生成。
//! 它创建带有条目统计、详细结果表格和查看失败输出的交互功能的样式化 HTML 文件。

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::core::models::EntryResult;
use crate::infra::t;
use crate::reporting::console::get_error_output_from_result;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = "\
body{font-family:sans-serif;margin:2em;background:#f7f7f7;color:#222}\
h1{font-size:1.4em}\
.summary-container{display:flex;gap:1.5em;margin:1em 0}\
.summary-item{background:#fff;border:1px solid #ddd;border-radius:6px;padding:.8em 1.4em;text-align:center}\
.summary-item .count{display:block;font-size:1.6em;font-weight:bold}\
.passed-text{color:#2e7d32}.failed-text{color:#c62828}.skipped-text{color:#9e9e9e}.warning-text{color:#f9a825}\
table{border-collapse:collapse;width:100%;background:#fff}\
th,td{border:1px solid #ddd;padding:.5em .8em;text-align:left}\
.status-cell{font-weight:bold;border-radius:4px;padding:.15em .5em;display:inline-block}\
.status-Passed{color:#2e7d32}.status-Passed-Warning{color:#f9a825}.status-Failed{color:#c62828}.status-Skipped{color:#9e9e9e}\
.duration-cell,.phase-cell{white-space:nowrap}\
.output-toggle{cursor:pointer;color:#1565c0;font-size:.85em;margin-top:.3em}\
.output-content{white-space:pre-wrap;background:#1e1e1e;color:#e0e0e0;padding:1em;border-radius:4px;overflow-x:auto}\
.footer{margin-top:1.5em;color:#888;font-size:.85em}";

/// Embedded JavaScript for HTML report interactivity / HTML 报告交互性的嵌入式 JavaScript
const HTML_SCRIPT: &str = "\
function toggleOutput(id){\
var row=document.getElementById(id);\
row.style.display=row.style.display==='none'?'table-row':'none';\
}";

/// Generates a comprehensive HTML report from entry results.
/// Creates a styled HTML file with entry statistics, a detailed results
/// table, and interactive features for viewing failure output.
///
/// 从条目结果生成综合的 HTML 报告。
/// 创建一个样式化的 HTML 文件，包含条目统计、详细结果表格和查看失败输出的交互功能。
///
/// # Errors / 错误
/// This function will return an error if the output file cannot be written
/// to the specified path.
///
/// 如果无法将输出文件写入指定路径，此函数会返回错误。
pub fn generate_html_report(
    results: &[EntryResult],
    output_path: &Path,
    locale: &str,
) -> Result<()> {
    let mut html = String::new();
    html.push_str(&format!(
        "<!DOCTYPE html><html><head><meta charset='utf-8'><title>{}</title>",
        t!("html_report.title", locale = locale)
    ));
    html.push_str("<style>");
    html.push_str(HTML_STYLE);
    html.push_str("</style>");
    html.push_str("</head><body>");
    html.push_str(&format!(
        "<h1>{}</h1>",
        t!("html_report.main_header", locale = locale)
    ));

    // Add summary statistics
    let total = results.len();
    let passed = results
        .iter()
        .filter(|r| matches!(r, EntryResult::Passed { .. }))
        .count();
    let failed = results.iter().filter(|r| r.is_failure()).count();
    let skipped = results
        .iter()
        .filter(|r| matches!(r, EntryResult::Skipped))
        .count();
    let warnings = results
        .iter()
        .filter(|r| r.has_after_success_warning())
        .count();

    html.push_str("<div class='summary-container'>");
    html.push_str(&format!(
        "<div class='summary-item'><span class='count'>{}</span><span class='label'>{}</span></div>",
        total,
        t!("html_report.summary.total", locale = locale)
    ));
    html.push_str(&format!(
        "<div class='summary-item'><span class='count passed-text'>{}</span><span class='label'>{}</span></div>",
        passed,
        t!("html_report.summary.passed", locale = locale)
    ));
    html.push_str(&format!(
        "<div class='summary-item'><span class='count failed-text'>{}</span><span class='label'>{}</span></div>",
        failed,
        t!("html_report.summary.failed", locale = locale)
    ));
    html.push_str(&format!(
        "<div class='summary-item'><span class='count warning-text'>{}</span><span class='label'>{}</span></div>",
        warnings,
        t!("html_report.summary.warnings", locale = locale)
    ));
    html.push_str(&format!(
        "<div class='summary-item'><span class='count skipped-text'>{}</span><span class='label'>{}</span></div>",
        skipped,
        t!("html_report.summary.skipped", locale = locale)
    ));
    html.push_str("</div>");

    // Add results table
    html.push_str("<table><thead><tr>");
    html.push_str(&format!(
        "<th>{}</th>",
        t!("html_report.table.header.entry", locale = locale)
    ));
    html.push_str(&format!(
        "<th class='status-col'>{}</th>",
        t!("html_report.table.header.status", locale = locale)
    ));
    html.push_str(&format!(
        "<th class='phase-cell'>{}</th>",
        t!("html_report.table.header.phase", locale = locale)
    ));
    html.push_str(&format!(
        "<th class='duration-cell'>{}</th>",
        t!("html_report.table.header.duration", locale = locale)
    ));
    html.push_str("</tr></thead><tbody>");

    for (i, result) in results.iter().enumerate() {
        let status_str = result.get_status_str(locale);
        let status_class = result.get_status_class();
        let duration_str = result
            .get_duration()
            .map(|d| format!("{:.2}s", d.as_secs_f64()))
            .unwrap_or_else(|| "N/A".to_string());
        let phase_str = result
            .get_failure_phase()
            .map(|p| p.display_name(locale))
            .unwrap_or_default();

        let output_id = format!("output-{}", i);
        let error_details = if result.is_failure() {
            let error_output = get_error_output_from_result(result, locale);
            let escaped_output = escape_html(&error_output);
            format!(
                "<tr id='{}' style='display:none;'><td colspan='4'><pre class='output-content'>{}</pre></td></tr>",
                output_id, escaped_output
            )
        } else {
            String::new()
        };

        let output_toggle = if result.is_failure() {
            format!(
                "<div class='output-toggle' onclick=\"toggleOutput('{}')\">{}</div>",
                output_id,
                t!("html_report.toggle_output", locale = locale)
            )
        } else {
            String::new()
        };

        html.push_str("<tr>");
        html.push_str(&format!("<td>{}</td>", result.entry_label()));
        html.push_str(&format!(
            "<td class='status-col'><div class='status-cell {}'>{}</div>{}</td>",
            status_class, status_str, output_toggle
        ));
        html.push_str(&format!("<td class='phase-cell'>{}</td>", phase_str));
        html.push_str(&format!("<td class='duration-cell'>{}</td>", duration_str));
        html.push_str("</tr>");
        html.push_str(&error_details);
    }

    html.push_str("</tbody></table>");
    html.push_str(&format!(
        "<div class='footer'>{}</div>",
        t!(
            "html_report.generated_at",
            locale = locale,
            time = chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )
    ));
    html.push_str("<script>");
    html.push_str(HTML_SCRIPT);
    html.push_str("</script></body></html>");

    fs::write(output_path, html)?;
    Ok(())
}

/// Simple HTML escape function to replace special characters with their HTML entities
/// 简单的 HTML 转义函数，用 HTML 实体替换特殊字符
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
