//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command for the Pipeline Runner CLI,
//! which executes every planned matrix entry through the pipeline's step
//! sequence and reports the overall outcome.
//!
//! 此模块实现了 Pipeline Runner CLI 的 `run` 命令，
//! 它让每个计划内的矩阵条目经历流水线的步骤序列并报告整体结果。

use anyhow::{Context, Result};
use colored::*;
use futures::{StreamExt, stream};
use std::{fs, path::PathBuf, sync::Arc, time::Duration};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::{self, MatrixEntry, Pipeline},
        execution::run_entry,
        models::{EntryResult, FailurePhase},
        planner,
    },
    infra::{fs as infra_fs, t},
    reporting::{
        console::{print_after_success_warnings, print_failure_details, print_summary},
        html::generate_html_report,
        json::write_json_report,
    },
};

/// Executes the run command with the provided arguments.
///
/// # Arguments
/// * `jobs` - Number of matrix entries to run in parallel
/// * `config` - Path to the pipeline descriptor file
/// * `project_dir` - Path to the project directory
/// * `branch` - The branch this run is for, checked against `branches.only`
/// * `total_runners` - Total number of distributed runners (for CI)
/// * `runner_index` - Index of this runner (for CI)
/// * `html` - Optional path for HTML report output
/// * `json` - Optional path for JSON report output
///
/// # Returns
/// A Result indicating success or failure of the command execution
#[allow(clippy::too_many_arguments)]
pub async fn execute(
    jobs: Option<usize>,
    config: PathBuf,
    project_dir: PathBuf,
    branch: Option<String>,
    total_runners: Option<usize>,
    runner_index: Option<usize>,
    html: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<()> {
    let (pipeline, config_path) = setup_and_parse_config(&config)?;
    let locale = pipeline.language.clone();
    rust_i18n::set_locale(&locale);

    if !infra_fs::is_directory(&project_dir) {
        anyhow::bail!(t!(
            "project_dir_not_found",
            locale = locale,
            path = project_dir.display()
        ));
    }
    let project_root = infra_fs::absolute_path(&project_dir)?;

    println!(
        "{}",
        t!(
            "project_root_detected",
            locale = locale,
            path = project_root.display()
        )
    );
    println!(
        "{}",
        t!(
            "loading_pipeline",
            locale = locale,
            path = config_path.display()
        )
    );

    let overall_stop_token = setup_signal_handler(&locale)?;

    let plan = planner::plan_execution(
        &pipeline,
        branch.as_deref(),
        total_runners,
        runner_index,
    )?;

    if plan.branch_gated {
        println!(
            "{}",
            t!(
                "branch_gated",
                locale = locale,
                branch = branch.as_deref().unwrap_or_default()
            )
            .cyan()
        );
        return Ok(());
    }

    println!(
        "{}",
        t!(
            "matrix_size",
            locale = locale,
            count = plan.entries_to_run.len()
        )
        .cyan()
    );

    if let (Some(total), Some(index)) = (total_runners, runner_index) {
        println!(
            "{}",
            t!(
                "running_as_split_runner",
                locale = locale,
                index = index + 1,
                total = total,
                count = plan.entries_to_run.len()
            )
            .bold()
        );
    } else {
        println!("{}", t!("running_as_single_runner", locale = locale).bold());
    }

    if plan.entries_to_run.is_empty() {
        println!("{}", t!("no_entries_to_run", locale = locale).green());
        return Ok(());
    }

    let final_results = run_entries(
        plan.entries_to_run,
        jobs.unwrap_or(num_cpus::get() / 2 + 1),
        Arc::new(pipeline),
        project_root,
        overall_stop_token,
    )
    .await;

    print_summary(&final_results, &locale);
    print_after_success_warnings(&final_results, &locale);

    if let Some(report_path) = &html {
        println!("\nGenerating HTML report at: {}", report_path.display());
        if let Err(e) = generate_html_report(&final_results, report_path, &locale) {
            eprintln!("{} {}", "Failed to generate HTML report:".red(), e);
        }
    }
    if let Some(report_path) = &json {
        if let Err(e) = write_json_report(&final_results, report_path) {
            eprintln!("{} {}", "Failed to generate JSON report:".red(), e);
        }
    }

    let has_failures = final_results.iter().any(|r| r.is_failure());
    if has_failures {
        let failures: Vec<_> = final_results.iter().filter(|r| r.is_failure()).collect();
        print_failure_details(&failures, &locale);
        anyhow::bail!(t!("matrix_failed", locale = locale));
    } else {
        println!(
            "\n{}",
            t!("all_entries_passed", locale = locale).green().bold()
        );
        Ok(())
    }
}

/// Sets up and parses the pipeline descriptor file.
fn setup_and_parse_config(config_path_arg: &PathBuf) -> Result<(Pipeline, PathBuf)> {
    // For config parsing, we don't have the locale yet. Use English as a default.
    let locale = "en";
    let config_path = fs::canonicalize(config_path_arg).with_context(|| {
        t!(
            "config.read_failed_path",
            locale = locale,
            path = config_path_arg.display()
        )
    })?;

    let pipeline = config::load_pipeline(&config_path)
        .with_context(|| t!("config.parse_failed", locale = locale))?;

    Ok((pipeline, config_path))
}

/// Sets up a signal handler for graceful shutdown.
fn setup_signal_handler(locale: &str) -> Result<CancellationToken> {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("shutdown_signal", locale = &locale).yellow());
            token_clone.cancel();
        }
    });

    Ok(token)
}

/// Runs the matrix entries with bounded parallelism.
///
/// Entries are independent by construction: one entry's failure never
/// cancels or reorders another. Only the Ctrl-C token stops outstanding
/// entries, which then report as `Skipped`.
///
/// 以有限的并行度运行矩阵条目。
///
/// 条目在构造上是相互独立的：一个条目的失败永远不会取消或重排另一个条目。
/// 只有 Ctrl-C 令牌会停止未完成的条目，它们随后报告为 `Skipped`。
async fn run_entries(
    entries_to_run: Vec<MatrixEntry>,
    jobs: usize,
    pipeline: Arc<Pipeline>,
    project_root: PathBuf,
    overall_stop_token: CancellationToken,
) -> Vec<EntryResult> {
    let results = stream::iter(entries_to_run.into_iter().map(|entry| {
        let pipeline = Arc::clone(&pipeline);
        let project_root = project_root.clone();
        let overall_stop_token = overall_stop_token.clone();
        let entry_for_error = entry.clone();

        tokio::spawn(async move {
            let mut handle =
                tokio::spawn(async move { run_entry(entry, &pipeline, &project_root).await });

            tokio::select! {
                biased;
                _ = overall_stop_token.cancelled() => {
                    handle.abort();
                    EntryResult::Skipped
                }
                res = &mut handle => {
                    match res {
                        Ok(Ok(result)) => result,
                        Ok(Err(e)) => EntryResult::Failed {
                            entry: entry_for_error,
                            output: e.to_string(),
                            phase: FailurePhase::Provision,
                            duration: Duration::default(),
                        },
                        Err(e) => EntryResult::Failed {
                            entry: entry_for_error,
                            output: e.to_string(),
                            phase: FailurePhase::Provision,
                            duration: Duration::default(),
                        },
                    }
                }
            }
        })
    }))
    .buffer_unordered(jobs)
    .collect::<Vec<Result<EntryResult, tokio::task::JoinError>>>()
    .await;

    results
        .into_iter()
        .map(|res| match res {
            Ok(entry_result) => entry_result,
            Err(e) => EntryResult::Failed {
                entry: MatrixEntry::default(),
                output: format!("Critical error during entry execution: {}", e),
                phase: FailurePhase::Provision,
                duration: Duration::default(),
            },
        })
        .collect()
}
