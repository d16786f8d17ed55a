//! # Config Module Unit Tests / Config 模块单元测试
//!
//! This module contains unit tests for the pipeline descriptor model:
//! the `Pipeline` and `MatrixEntry` structures, their defaults, validation
//! and serialization.
//!
//! 此模块包含流水线描述符模型的单元测试：
//! `Pipeline` 和 `MatrixEntry` 结构体、它们的默认值、验证和序列化。

use pipeline_runner::core::config::{
    Branches, MatrixEntry, OsFamily, Pipeline, load_pipeline, parse_env_pair,
};
use std::fs;
use tempfile::tempdir;

#[cfg(test)]
mod matrix_entry_tests {
    use super::*;

    #[test]
    fn test_matrix_entry_deserialization_minimal() {
        let toml_str = r#"
            os = "linux"
            runtime = "3.6"
        "#;

        let entry: MatrixEntry = toml::from_str(toml_str).unwrap();

        assert_eq!(entry.os, OsFamily::Linux);
        assert_eq!(entry.runtime, "3.6");
        assert!(entry.env.is_none());
    }

    #[test]
    fn test_matrix_entry_deserialization_full() {
        let toml_str = r#"
            os = "osx"
            runtime = "3.7"
            env = "TOXENV=py37"
        "#;

        let entry: MatrixEntry = toml::from_str(toml_str).unwrap();

        assert_eq!(entry.os, OsFamily::Osx);
        assert_eq!(entry.runtime, "3.7");
        assert_eq!(entry.env, Some("TOXENV=py37".to_string()));
    }

    #[test]
    fn test_matrix_entry_unknown_os_rejected() {
        let toml_str = r#"
            os = "windows"
            runtime = "3.6"
        "#;

        let result: Result<MatrixEntry, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_matrix_entry_label() {
        let entry = MatrixEntry {
            os: OsFamily::Linux,
            runtime: "3.6".to_string(),
            env: None,
        };
        assert_eq!(entry.label(), "linux/3.6");

        let entry = MatrixEntry {
            os: OsFamily::Osx,
            runtime: "3.7".to_string(),
            env: Some("TOXENV=py37".to_string()),
        };
        assert_eq!(entry.label(), "osx/3.7");
    }

    #[test]
    fn test_os_family_serializes_lowercase() {
        let entry = MatrixEntry {
            os: OsFamily::Osx,
            runtime: "3.6".to_string(),
            env: None,
        };

        let toml_str = toml::to_string(&entry).unwrap();
        assert!(toml_str.contains("os = \"osx\""));
    }
}

#[cfg(test)]
mod env_pair_tests {
    use super::*;

    #[test]
    fn test_parse_env_pair_basic() {
        let (name, value) = parse_env_pair("TOXENV=py36").unwrap();
        assert_eq!(name, "TOXENV");
        assert_eq!(value, "py36");
    }

    #[test]
    fn test_parse_env_pair_value_may_contain_equals() {
        let (name, value) = parse_env_pair("FLAGS=-a=1 -b=2").unwrap();
        assert_eq!(name, "FLAGS");
        assert_eq!(value, "-a=1 -b=2");
    }

    #[test]
    fn test_parse_env_pair_empty_value_allowed() {
        let (name, value) = parse_env_pair("EMPTY=").unwrap();
        assert_eq!(name, "EMPTY");
        assert_eq!(value, "");
    }

    #[test]
    fn test_parse_env_pair_missing_equals_rejected() {
        assert!(parse_env_pair("TOXENV").is_err());
    }

    #[test]
    fn test_parse_env_pair_missing_name_rejected() {
        assert!(parse_env_pair("=value").is_err());
    }
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn test_pipeline_defaults() {
        let toml_str = r#"
            [[matrix]]
            os = "linux"
            runtime = "3.6"
        "#;

        let pipeline: Pipeline = toml::from_str(toml_str).unwrap();

        // Should default to "en" when language is not specified
        assert_eq!(pipeline.language, "en");
        assert!(pipeline.env.is_empty());
        assert!(pipeline.install.is_empty());
        assert!(pipeline.script.is_empty());
        assert!(pipeline.after_success.is_empty());
        assert!(pipeline.branches.is_none());
        assert_eq!(pipeline.matrix.len(), 1);
    }

    #[test]
    fn test_pipeline_full_descriptor() {
        let toml_str = r#"
            language = "zh-CN"
            env = ["GLOBAL=1"]
            install = ["pip install --upgrade pip", "pip install -e ."]
            script = ["pytest"]
            after_success = ["coveralls"]

            [branches]
            only = ["master"]

            [[matrix]]
            os = "linux"
            runtime = "3.6"
            env = "TOXENV=py36"

            [[matrix]]
            os = "linux"
            runtime = "3.7"
            env = "TOXENV=py37"

            [[matrix]]
            os = "osx"
            runtime = "3.6"
            env = "TOXENV=py36"

            [[matrix]]
            os = "osx"
            runtime = "3.7"
            env = "TOXENV=py37"
        "#;

        let pipeline: Pipeline = toml::from_str(toml_str).unwrap();

        assert_eq!(pipeline.language, "zh-CN");
        assert_eq!(pipeline.env, vec!["GLOBAL=1"]);
        assert_eq!(pipeline.install.len(), 2);
        assert_eq!(pipeline.script, vec!["pytest"]);
        assert_eq!(pipeline.after_success, vec!["coveralls"]);
        assert_eq!(pipeline.branches.unwrap().only, vec!["master"]);
        assert_eq!(pipeline.matrix.len(), 4);
        assert_eq!(pipeline.matrix[3].label(), "osx/3.7");
    }

    #[test]
    fn test_pipeline_serialization_roundtrip() {
        let original = Pipeline {
            language: "en".to_string(),
            env: vec!["GLOBAL=1".to_string()],
            install: vec!["pip install -e .".to_string()],
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
                    os: OsFamily::Osx,
                    runtime: "3.7".to_string(),
                    env: None,
                },
            ],
        };

        // Serialize to TOML; plain values must precede tables for this to
        // produce a valid document.
        let toml_str = toml::to_string_pretty(&original).unwrap();

        // Deserialize back
        let deserialized: Pipeline = toml::from_str(&toml_str).unwrap();

        assert_eq!(original.language, deserialized.language);
        assert_eq!(original.env, deserialized.env);
        assert_eq!(original.install, deserialized.install);
        assert_eq!(original.script, deserialized.script);
        assert_eq!(original.after_success, deserialized.after_success);
        assert_eq!(
            original.branches.as_ref().unwrap().only,
            deserialized.branches.as_ref().unwrap().only
        );
        assert_eq!(original.matrix, deserialized.matrix);
    }

    #[test]
    fn test_load_pipeline_rejects_empty_matrix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Pipeline.toml");
        fs::write(
            &path,
            r#"
            language = "en"
            script = ["pytest"]
            matrix = []
            "#,
        )
        .unwrap();

        assert!(load_pipeline(&path).is_err());
    }

    #[test]
    fn test_load_pipeline_rejects_bad_global_env() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Pipeline.toml");
        fs::write(
            &path,
            r#"
            env = ["NOT_A_PAIR"]

            [[matrix]]
            os = "linux"
            runtime = "3.6"
            "#,
        )
        .unwrap();

        assert!(load_pipeline(&path).is_err());
    }

    #[test]
    fn test_load_pipeline_rejects_bad_entry_env() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Pipeline.toml");
        fs::write(
            &path,
            r#"
            [[matrix]]
            os = "linux"
            runtime = "3.6"
            env = "missing-equals"
            "#,
        )
        .unwrap();

        assert!(load_pipeline(&path).is_err());
    }

    #[test]
    fn test_load_pipeline_rejects_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Pipeline.toml");
        fs::write(
            &path,
            r#"
            [[matrix]
            os = "linux"
            "#,
        )
        .unwrap();

        assert!(load_pipeline(&path).is_err());
    }

    #[test]
    fn test_load_pipeline_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("DoesNotExist.toml");
        assert!(load_pipeline(&path).is_err());
    }

    #[test]
    fn test_load_pipeline_accepts_valid_descriptor() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Pipeline.toml");
        fs::write(
            &path,
            r#"
            install = ["true"]
            script = ["true"]

            [[matrix]]
            os = "linux"
            runtime = "3.6"
            env = "TOXENV=py36"
            "#,
        )
        .unwrap();

        let pipeline = load_pipeline(&path).unwrap();
        assert_eq!(pipeline.matrix.len(), 1);
        assert_eq!(pipeline.matrix[0].env, Some("TOXENV=py36".to_string()));
    }
}
