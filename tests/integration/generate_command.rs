//! End-to-end generation against a stubbed terraform binary.

#![cfg(unix)]
#![allow(clippy::expect_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tfinv() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tfinv"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Drop a fake `terraform` script into the temp dir and return its path.
fn write_stub(dir: &TempDir, body: &str) -> PathBuf {
    let stub = dir.path().join("terraform-stub");
    std::fs::write(&stub, format!("#!/bin/sh\n{body}\n")).expect("write stub");
    std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).expect("chmod stub");
    stub
}

fn stub_args(dir: &TempDir, stub: &Path) -> Vec<String> {
    vec![
        "--terraform-bin".to_string(),
        stub.display().to_string(),
        "--terraform-dir".to_string(),
        dir.path().display().to_string(),
        "--output".to_string(),
        dir.path().join("inventory").display().to_string(),
    ]
}

#[test]
fn test_generate_writes_inventory_and_exits_zero() {
    let dir = TempDir::new().expect("tempdir");
    let stub = write_stub(
        &dir,
        r#"echo '{"master_ips":{"value":["10.0.0.1","10.0.0.2"]},"worker_ips":{"value":["10.0.1.1"]}}'"#,
    );

    tfinv()
        .args(stub_args(&dir, &stub))
        .arg("--quiet")
        .assert()
        .success();

    let content =
        std::fs::read_to_string(dir.path().join("inventory")).expect("read inventory");
    assert!(content.contains("master-1 ansible_host=10.0.0.1"));
    assert!(content.contains("master-2 ansible_host=10.0.0.2"));
    assert!(content.contains("worker-1 ansible_host=10.0.1.1"));
    assert!(content.contains("[k8s_cluster:children]"));
}

#[test]
fn test_generate_failing_terraform_still_exits_zero() {
    let dir = TempDir::new().expect("tempdir");
    let stub = write_stub(&dir, "echo 'No state file was found!' >&2\nexit 1");

    tfinv()
        .args(stub_args(&dir, &stub))
        .arg("--quiet")
        .assert()
        .success();

    let content =
        std::fs::read_to_string(dir.path().join("inventory")).expect("read inventory");
    assert!(content.contains("# No master nodes found in Terraform output"));
    assert!(content.contains("# No worker nodes found in Terraform output"));
}

#[test]
fn test_generate_prints_preview_and_destination() {
    let dir = TempDir::new().expect("tempdir");
    let stub = write_stub(
        &dir,
        r#"echo '{"master_ips":{"value":["10.0.0.1"]},"worker_ips":{"value":[]}}'"#,
    );

    tfinv()
        .args(stub_args(&dir, &stub))
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated inventory at"))
        .stdout(predicate::str::contains("[all:vars]"))
        .stdout(predicate::str::contains("master-1 ansible_host=10.0.0.1"));
}

#[test]
fn test_generate_quiet_suppresses_preview() {
    let dir = TempDir::new().expect("tempdir");
    let stub = write_stub(&dir, r#"echo '{}'"#);

    tfinv()
        .args(stub_args(&dir, &stub))
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_generate_warns_when_terraform_dir_not_initialized() {
    let dir = TempDir::new().expect("tempdir");
    let stub = write_stub(&dir, r#"echo '{}'"#);

    tfinv()
        .args(stub_args(&dir, &stub))
        .assert()
        .success()
        .stdout(predicate::str::contains("Terraform not initialized"));
}

#[test]
fn test_generate_no_warning_when_terraform_dir_initialized() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::create_dir(dir.path().join(".terraform")).expect("mkdir .terraform");
    let stub = write_stub(&dir, r#"echo '{}'"#);

    tfinv()
        .args(stub_args(&dir, &stub))
        .assert()
        .success()
        .stdout(predicate::str::contains("Terraform not initialized").not());
}

#[test]
fn test_generate_unwritable_output_exits_one() {
    let dir = TempDir::new().expect("tempdir");
    let stub = write_stub(&dir, r#"echo '{}'"#);

    tfinv()
        .args([
            "--terraform-bin".to_string(),
            stub.display().to_string(),
            "--terraform-dir".to_string(),
            dir.path().display().to_string(),
            "--output".to_string(),
            dir.path().join("no-such-dir").join("inventory").display().to_string(),
            "--quiet".to_string(),
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_generate_hung_terraform_times_out_and_exits_zero() {
    let dir = TempDir::new().expect("tempdir");
    let stub = write_stub(&dir, "sleep 30");

    tfinv()
        .args(stub_args(&dir, &stub))
        .args(["--timeout-secs", "1", "--quiet"])
        .assert()
        .success();

    let content =
        std::fs::read_to_string(dir.path().join("inventory")).expect("read inventory");
    assert!(content.contains("# No master nodes found in Terraform output"));
}
