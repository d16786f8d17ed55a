//! # Pipeline Initialization Module / 流水线初始化模块
//!
//! This module provides functionality for initializing a new pipeline
//! descriptor through an interactive command-line wizard. It helps users
//! create a `Pipeline.toml` file with a build matrix and step templates.
//!
//! 此模块通过交互式命令行向导提供初始化新流水线描述符的功能。
//! 它帮助用户创建带有构建矩阵和步骤模板的 `Pipeline.toml` 文件。
//!
//! ## Features / 功能特性
//!
//! - **Interactive Wizard**: Step-by-step guidance for descriptor setup
//! - **Matrix Templates**: OS/runtime cross product built from the answers
//! - **Overwrite Protection**: Confirmation prompts before overwriting existing descriptors
//!
//! - **交互式向导**: 描述符设置的逐步指导
//! - **矩阵模板**: 根据回答构建的 OS/运行时叉积
//! - **覆盖保护**: 覆盖现有描述符前的确认提示

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, MultiSelect, theme::ColorfulTheme};
use std::fs;
use std::path::Path;

use crate::core::config::{Branches, MatrixEntry, OsFamily, Pipeline};
use crate::infra::t;

/// Runs the interactive wizard to generate a `Pipeline.toml` file.
///
/// This function provides a step-by-step guided process for creating a new
/// pipeline descriptor with a build matrix and install/script/after_success
/// command lists.
///
/// 运行交互式向导以生成 `Pipeline.toml` 文件。
///
/// 此函数提供逐步指导过程，用于创建带有构建矩阵和
/// install/script/after_success 命令列表的新流水线描述符。
pub fn run_init_wizard(language: &str, non_interactive: bool) -> Result<()> {
    let config_path = Path::new("Pipeline.toml");
    let theme = ColorfulTheme::default();

    if !non_interactive {
        println!(
            "\n{}",
            t!("init_wizard_welcome", locale = language).cyan().bold()
        );
        println!("{}", t!("init_wizard_description", locale = language));
    }

    if config_path.exists() && !non_interactive {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!(
                "init_overwrite_prompt",
                locale = language,
                path = config_path.display()
            ))
            .default(false)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init_aborted", locale = language));
            return Ok(());
        }
    }

    if non_interactive {
        return write_config(config_path, &default_pipeline(), language);
    }

    // Interactive part starts here
    let os_options = [OsFamily::Linux, OsFamily::Osx];
    let selections = MultiSelect::with_theme(&theme)
        .with_prompt(t!("init_os_selection_prompt", locale = language))
        .items(&os_options.iter().map(|os| os.to_string()).collect::<Vec<_>>())
        .defaults(&[true, false])
        .interact()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    let oses: Vec<OsFamily> = if selections.is_empty() {
        println!("{}", t!("init_no_os_selected", locale = language).yellow());
        vec![OsFamily::Linux]
    } else {
        selections.into_iter().map(|i| os_options[i]).collect()
    };

    let runtimes_raw: String = Input::with_theme(&theme)
        .with_prompt(t!("init_runtimes_prompt", locale = language))
        .default("3.6,3.7".to_string())
        .interact_text()?;
    let runtimes: Vec<String> = runtimes_raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let install: String = Input::with_theme(&theme)
        .with_prompt(t!("init_install_prompt", locale = language))
        .default("pip install -e .".to_string())
        .interact_text()?;

    let script: String = Input::with_theme(&theme)
        .with_prompt(t!("init_script_prompt", locale = language))
        .default("pytest".to_string())
        .interact_text()?;

    let after_success: String = Input::with_theme(&theme)
        .with_prompt(t!("init_after_success_prompt", locale = language))
        .default("coveralls".to_string())
        .allow_empty(true)
        .interact_text()?;

    let mut matrix = Vec::new();
    for os in &oses {
        for runtime in &runtimes {
            matrix.push(MatrixEntry {
                os: *os,
                runtime: runtime.clone(),
                env: None,
            });
        }
    }

    let pipeline = Pipeline {
        language: language.to_string(),
        env: vec![],
        install: vec![install],
        script: vec![script],
        after_success: if after_success.trim().is_empty() {
            vec![]
        } else {
            vec![after_success]
        },
        branches: None,
        matrix,
    };

    write_config(config_path, &pipeline, language)
}

/// The non-interactive template: a four-entry matrix over two OS families
/// and two runtime versions, with per-entry environment variables and a
/// best-effort coverage upload.
///
/// 非交互式模板：覆盖两个操作系统系列和两个运行时版本的四条目矩阵，
/// 带有逐条目的环境变量和尽力而为的覆盖率上传。
fn default_pipeline() -> Pipeline {
    Pipeline {
        language: "en".to_string(),
        env: vec![],
        install: vec![
            "pip install --upgrade pip".to_string(),
            "pip install -e .".to_string(),
        ],
        script: vec!["pytest".to_string()],
        after_success: vec!["coveralls".to_string()],
        branches: Some(Branches {
            only: vec!["master".to_string()],
        }),
        matrix: vec![
            MatrixEntry {
                os: OsFamily::Linux,
                runtime: "3.6".to_string(),
                env: Some("TOXENV=py36".to_string()),
            },
            MatrixEntry {
                os: OsFamily::Linux,
                runtime: "3.7".to_string(),
                env: Some("TOXENV=py37".to_string()),
            },
            MatrixEntry {
                os: OsFamily::Osx,
                runtime: "3.6".to_string(),
                env: Some("TOXENV=py36".to_string()),
            },
            MatrixEntry {
                os: OsFamily::Osx,
                runtime: "3.7".to_string(),
                env: Some("TOXENV=py37".to_string()),
            },
        ],
    }
}

fn write_config(path: &Path, pipeline: &Pipeline, language: &str) -> Result<()> {
    let toml_string = toml::to_string_pretty(pipeline)
        .context(t!("init_serialize_failed", locale = language).to_string())?;

    fs::write(path, toml_string)
        .with_context(|| t!("init_write_failed", locale = language, path = path.display()))?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!(
            "init_success_created",
            locale = language,
            path = path.display()
        )
        .bold()
    );
    println!("{}", t!("init_usage_hint", locale = language));

    Ok(())
}
