//! Integration tests for the uttercut binary.

mod common;

use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use common::{CorpusDirs, write_wav};
use predicates::prelude::*;
use std::fs;
use std::process::Command;

/// A command with an empty config file so the user's own config is ignored.
fn uttercut(dirs: &CorpusDirs) -> Command {
    let config = dirs.root.path().join("config.toml");
    fs::write(&config, "").unwrap();

    let mut cmd = Command::new(cargo_bin("uttercut"));
    cmd.env_remove("RUST_LOG")
        .arg("--config")
        .arg(config)
        .arg("--no-progress");
    cmd
}

#[test]
fn test_build_prints_dataset_path() {
    let dirs = CorpusDirs::new();
    dirs.add_call1();

    uttercut(&dirs)
        .arg(&dirs.audio)
        .arg(&dirs.grids)
        .arg(&dirs.output)
        .assert()
        .success()
        .stdout(predicate::str::contains("primock57"));

    let metadata = fs::read_to_string(dirs.dataset_dir().join("metadata.csv")).unwrap();
    assert!(metadata.contains("data/call1_u2.wav,how are you,call1_u2"));
}

#[test]
fn test_environment_does_not_rename_dataset() {
    let dirs = CorpusDirs::new();
    dirs.add_call1();

    uttercut(&dirs)
        .env("UTTERCUT_DATASET_NAME", "elsewhere")
        .env("UTTERCUT_CONFIG", dirs.root.path().join("missing.toml"))
        .arg(&dirs.audio)
        .arg(&dirs.grids)
        .arg(&dirs.output)
        .assert()
        .success();

    assert!(dirs.dataset_dir().join("metadata.csv").exists());
    assert!(!dirs.output.join("elsewhere").exists());
}

#[test]
fn test_named_path_options() {
    let dirs = CorpusDirs::new();
    dirs.add_call1();

    uttercut(&dirs)
        .arg("--audio-path")
        .arg(&dirs.audio)
        .arg("--transcript-path")
        .arg(&dirs.grids)
        .arg("--output-path")
        .arg(&dirs.output)
        .arg("--dataset-name")
        .arg("calls")
        .assert()
        .success();

    assert!(dirs.output.join("calls/data/call1_u0.wav").exists());
}

#[test]
fn test_json_summary() {
    let dirs = CorpusDirs::new();
    dirs.add_call1();

    let output = uttercut(&dirs)
        .arg("--json")
        .arg(&dirs.audio)
        .arg(&dirs.grids)
        .arg(&dirs.output)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["event"], "result");
    assert_eq!(value["payload"]["result_type"], "dataset_build");
    assert_eq!(value["payload"]["report"]["utterances_accepted"], 2);
    assert_eq!(value["payload"]["report"]["skipped_empty"], 1);
}

#[test]
fn test_fail_fast_on_missing_annotation() {
    let dirs = CorpusDirs::new();
    dirs.add_call1();
    write_wav(&dirs.audio.join("call2.wav"), 16_000, 1);

    uttercut(&dirs)
        .arg("--fail-fast")
        .arg(&dirs.audio)
        .arg(&dirs.grids)
        .arg(&dirs.output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing annotation for recording 'call2'"));
}

#[test]
fn test_missing_annotation_skipped_by_default() {
    let dirs = CorpusDirs::new();
    dirs.add_call1();
    write_wav(&dirs.audio.join("call2.wav"), 16_000, 1);

    uttercut(&dirs)
        .arg(&dirs.audio)
        .arg(&dirs.grids)
        .arg(&dirs.output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping recording 'call2'"));
}

#[test]
fn test_missing_input_directory() {
    let dirs = CorpusDirs::new();

    uttercut(&dirs)
        .arg(dirs.root.path().join("nowhere"))
        .arg(&dirs.grids)
        .arg(&dirs.output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("input directory does not exist"));
}

#[test]
fn test_missing_arguments_is_usage_error() {
    Command::new(cargo_bin("uttercut"))
        .arg("only-one")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_tier_flag_selects_tier() {
    let dirs = CorpusDirs::new();
    dirs.add_call1();

    uttercut(&dirs)
        .arg("--tier")
        .arg("Nurse")
        .arg("--fail-fast")
        .arg(&dirs.audio)
        .arg(&dirs.grids)
        .arg(&dirs.output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nurse"));
}
