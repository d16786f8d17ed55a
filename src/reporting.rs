//! # Reporting Module / 报告模块
//!
//! This module provides run result reporting for Pipeline Runner:
//! console summaries, HTML reports and machine-readable JSON reports.
//!
//! 此模块为 Pipeline Runner 提供运行结果报告：
//! 控制台摘要、HTML 报告和机器可读的 JSON 报告。

pub mod console;
pub mod html;
pub mod json;
