//! # Step Command Module / 步骤命令模块
//!
//! Turns the raw command strings of a pipeline phase into spawnable
//! processes and captures their combined output.
//!
//! 将流水线阶段的原始命令字符串转换为可派生的进程并捕获其合并输出。

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::infra::t;

/// Builds a spawnable process from one raw step command.
///
/// The command is variable/tilde expanded against the composed entry
/// environment first and the runner's own environment second, then tokenized
/// with shell-like quoting rules. No implicit shell is involved: commands that
/// need shell syntax must invoke one explicitly (e.g. `sh -c '...'`).
///
/// 从一条原始步骤命令构建可派生的进程。
///
/// 命令首先针对组合的条目环境、其次针对运行器自身的环境进行变量/波浪号展开，
/// 然后按照类 shell 的引用规则进行分词。不涉及隐式 shell：
/// 需要 shell 语法的命令必须显式调用一个（例如 `sh -c '...'`）。
pub fn build_step_command(
    raw: &str,
    envs: &[(String, String)],
    cwd: &Path,
) -> Result<tokio::process::Command> {
    // Later pairs win, matching how the composed environment is applied to
    // the child process.
    let lookup = |name: &str| -> Result<Option<String>, std::env::VarError> {
        if let Some((_, value)) = envs.iter().rev().find(|(k, _)| k.as_str() == name) {
            return Ok(Some(value.clone()));
        }
        match std::env::var(name) {
            Ok(v) => Ok(Some(v)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(e),
        }
    };

    let expanded = shellexpand::full_with_context(raw, || std::env::var("HOME").ok(), lookup)
        .with_context(|| format!("Failed to expand command: {raw}"))?
        .to_string();

    let parts = shlex::split(&expanded)
        .ok_or_else(|| anyhow::anyhow!("Failed to parse command: {}", expanded))?;

    if parts.is_empty() {
        return Err(anyhow::anyhow!("Empty command after parsing."));
    }

    let program = &parts[0];
    let args = &parts[1..];

    let mut cmd = tokio::process::Command::new(program);
    cmd.args(args)
        .envs(envs.iter().cloned())
        .kill_on_drop(true)
        .current_dir(cwd);

    Ok(cmd)
}

/// Spawns a command, captures its stdout and stderr.
/// The output streams are read concurrently and combined into a single string.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// A tuple containing:
/// - The `ExitStatus` of the process wrapped in an `io::Result`.
/// - The combined stdout and stderr as a `String`.
///
/// 派生一个命令，捕获其 stdout 和 stderr。
/// 输出流被并发读取并合并到一个字符串中。
///
/// # Arguments
/// * `cmd` - 要执行的 `tokio::process::Command`。
///
/// # Returns
/// 一个元组，包含：
/// - 进程的 `ExitStatus`（包装在 `io::Result` 中）。
/// - 合并的 stdout 和 stderr，为一个 `String`。
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
) -> (std::io::Result<std::process::ExitStatus>, String) {
    // Configure the command to capture stdout and stderr.
    // 配置命令以捕获 stdout 和 stderr。
    let mut child = match cmd
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            // If spawning fails, we return the error and an empty string for the output.
            // 如果派生失败，我们返回错误和空字符串作为输出。
            return (Err(e), String::new());
        }
    };

    let stdout = match child.stdout.take() {
        Some(stdout) => stdout,
        None => {
            return (
                Err(std::io::Error::other(
                    t!("run.capture_stdout_failed").to_string(),
                )),
                String::new(),
            );
        }
    };
    let stderr = match child.stderr.take() {
        Some(stderr) => stderr,
        None => {
            return (
                Err(std::io::Error::other(
                    t!("run.capture_stderr_failed").to_string(),
                )),
                String::new(),
            );
        }
    };

    // Use an Arc<Mutex<String>> to allow concurrent writes from stdout and stderr tasks.
    // 使用 Arc<Mutex<String>> 来允许多个任务（stdout 和 stderr）并发写入。
    let output = Arc::new(tokio::sync::Mutex::new(String::new()));

    // Spawn a task to read stdout line by line.
    // 派生一个任务来逐行读取 stdout。
    let stdout_output = Arc::clone(&output);
    let stdout_handle = tokio::spawn(async move {
        let reader = BufReader::new(stdout);
        let mut lines = reader.lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let mut output = stdout_output.lock().await;
            output.push_str(&line);
            output.push('\n');
        }
    });

    // Spawn a task to read stderr line by line.
    // 派生一个任务来逐行读取 stderr。
    let stderr_output = Arc::clone(&output);
    let stderr_handle = tokio::spawn(async move {
        let reader = BufReader::new(stderr);
        let mut lines = reader.lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let mut output = stderr_output.lock().await;
            output.push_str(&line);
            output.push('\n');
        }
    });

    // Wait for the process to exit.
    // 等待进程退出。
    let status = child.wait().await;

    // Wait for the stdout and stderr reading tasks to complete to ensure all output is captured.
    // 等待 stdout 和 stderr 读取任务完成，以确保所有输出都被捕获。
    if let Err(e) = stdout_handle.await {
        eprintln!("Failed to join stdout task: {}", e);
    }
    if let Err(e) = stderr_handle.await {
        eprintln!("Failed to join stderr task: {}", e);
    }

    (status, output.lock().await.clone())
}
