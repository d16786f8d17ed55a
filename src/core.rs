//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Pipeline Runner,
//! including the pipeline descriptor model, execution planning and
//! the per-entry step execution engine.
//!
//! 此模块包含 Pipeline Runner 的核心功能，
//! 包括流水线描述符模型、执行计划和逐条目步骤执行引擎。

pub mod config;
pub mod execution;
pub mod models;
pub mod planner;

// Re-exports
pub use config::Pipeline;
pub use execution::run_entry;
pub use models::EntryResult;
