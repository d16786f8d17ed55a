//! # Entry Execution Engine Module / 条目执行引擎模块
//!
//! This module runs one matrix entry through the fixed step sequence:
//! provision an isolated workspace, run the install phase, run the script
//! phase, and on script success run the best-effort after_success phase.
//! The first failing step in install or script is terminal for the entry.
//!
//! 此模块让一个矩阵条目经历固定的步骤序列：
//! 置备隔离的工作区、运行 install 阶段、运行 script 阶段，
//! 并在 script 成功时运行尽力而为的 after_success 阶段。
//! install 或 script 中第一个失败的步骤对条目是终止性的。

use anyhow::Result;
use colored::*;
use std::path::Path;
use std::time::Instant;

use crate::{
    core::{
        config::{MatrixEntry, Pipeline, parse_env_pair},
        models::{EntryResult, FailurePhase},
    },
    infra::{command, fs, t},
};

/// Composes the environment visible to every step of one entry: global pairs
/// first, then the entry's own pair, then the runner-provided `PIPELINE_OS`
/// and `PIPELINE_RUNTIME`. Later pairs override earlier ones.
///
/// 组合对一个条目的每个步骤可见的环境：先是全局变量对，然后是条目自身的变量对，
/// 最后是运行器提供的 `PIPELINE_OS` 和 `PIPELINE_RUNTIME`。后面的对覆盖前面的。
pub fn compose_entry_env(entry: &MatrixEntry, pipeline: &Pipeline) -> Result<Vec<(String, String)>> {
    let mut envs = Vec::with_capacity(pipeline.env.len() + 3);
    for pair in &pipeline.env {
        envs.push(parse_env_pair(pair)?);
    }
    if let Some(pair) = &entry.env {
        envs.push(parse_env_pair(pair)?);
    }
    envs.push(("PIPELINE_OS".to_string(), entry.os.to_string()));
    envs.push(("PIPELINE_RUNTIME".to_string(), entry.runtime.clone()));
    Ok(envs)
}

/// The main entry point for running a single matrix entry.
///
/// Step failures never abort the overall run: every failure mode is folded
/// into an `EntryResult` so sibling entries keep running. `Err` is reserved
/// for defects in the runner itself.
///
/// # Arguments
/// * `entry` - The matrix entry to execute
/// * `pipeline` - The loaded pipeline descriptor (shared step lists)
/// * `project_root` - Path to the project root directory
///
/// # Returns
/// An `EntryResult` indicating the outcome of the entry
pub async fn run_entry(
    entry: MatrixEntry,
    pipeline: &Pipeline,
    project_root: &Path,
) -> Result<EntryResult> {
    let label = entry.label();
    let start_time = Instant::now();

    println!("{}", t!("run.entry_started", name = &label).blue());

    // Step 1: provision. Environment composition and workspace creation
    // failures are both classified as provisioning failures.
    let envs = match compose_entry_env(&entry, pipeline) {
        Ok(envs) => envs,
        Err(e) => {
            println!("{}", t!("run.provision_failed", name = &label).red());
            return Ok(EntryResult::Failed {
                entry,
                output: e.to_string(),
                phase: FailurePhase::Provision,
                duration: start_time.elapsed(),
            });
        }
    };

    // The guard keeps the workspace alive until the entry finishes.
    let (workspace, _workspace_guard) = match fs::create_entry_workspace(project_root, &label) {
        Ok(ws) => ws,
        Err(e) => {
            println!("{}", t!("run.provision_failed", name = &label).red());
            return Ok(EntryResult::Failed {
                entry,
                output: e.to_string(),
                phase: FailurePhase::Provision,
                duration: start_time.elapsed(),
            });
        }
    };

    let mut log = String::new();

    // Step 2: install phase. First non-zero exit is terminal.
    if !run_phase(&pipeline.install, &envs, &workspace, &mut log).await {
        let duration = start_time.elapsed();
        println!(
            "{}",
            t!(
                "run.entry_failed",
                name = &label,
                phase = FailurePhase::Install.display_name(&rust_i18n::locale()),
                duration = duration.as_secs_f64()
            )
            .red()
        );
        return Ok(EntryResult::Failed {
            entry,
            output: log,
            phase: FailurePhase::Install,
            duration,
        });
    }

    // Step 3: script (test) phase.
    if !run_phase(&pipeline.script, &envs, &workspace, &mut log).await {
        let duration = start_time.elapsed();
        println!(
            "{}",
            t!(
                "run.entry_failed",
                name = &label,
                phase = FailurePhase::Script.display_name(&rust_i18n::locale()),
                duration = duration.as_secs_f64()
            )
            .red()
        );
        return Ok(EntryResult::Failed {
            entry,
            output: log,
            phase: FailurePhase::Script,
            duration,
        });
    }

    // Step 4: after_success, only reached when every script command passed.
    // A failure here is a warning, never a failure of the entry.
    let mut after_success_ok = true;
    if !pipeline.after_success.is_empty()
        && !run_phase(&pipeline.after_success, &envs, &workspace, &mut log).await
    {
        after_success_ok = false;
        println!("{}", t!("run.after_success_warning", name = &label).yellow());
    }

    let duration = start_time.elapsed();
    println!(
        "{}",
        t!(
            "run.entry_passed",
            name = &label,
            duration = duration.as_secs_f64()
        )
        .green()
    );

    Ok(EntryResult::Passed {
        entry,
        output: log,
        duration,
        after_success_ok,
    })
}

/// Runs the commands of one phase strictly in order inside the workspace.
/// Returns `false` on the first command that cannot be built, cannot be
/// spawned, or exits non-zero; later commands of the phase do not run.
///
/// 在工作区内严格按顺序运行一个阶段的命令。
/// 在第一个无法构建、无法派生或以非零退出的命令处返回 `false`；
/// 该阶段的后续命令不会运行。
async fn run_phase(
    commands: &[String],
    envs: &[(String, String)],
    workspace: &Path,
    log: &mut String,
) -> bool {
    for raw in commands {
        println!("{} {}", t!("run.command_prefix").blue(), raw);
        log.push_str(&format!("$ {}\n", raw));

        let cmd = match command::build_step_command(raw, envs, workspace) {
            Ok(cmd) => cmd,
            Err(e) => {
                let message = e.to_string();
                println!("{}", message.red());
                log.push_str(&message);
                log.push('\n');
                return false;
            }
        };

        let (status_res, output) = command::spawn_and_capture(cmd).await;

        if !output.trim().is_empty() {
            println!("{}", output.trim());
        }
        log.push_str(&output);

        let status = match status_res {
            Ok(status) => status,
            Err(e) => {
                let message = t!("run.step_spawn_failed", command = raw, error = e).to_string();
                println!("{}", message.red());
                log.push_str(&message);
                log.push('\n');
                return false;
            }
        };

        if !status.success() {
            let code = status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            let message = t!("run.step_failed", command = raw, code = code).to_string();
            println!("{}", message.red());
            log.push_str(&message);
            log.push('\n');
            return false;
        }
    }
    true
}
