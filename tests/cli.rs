#![allow(deprecated)]
//! Binary contract: exit codes, skip paths and the JSON hand-off.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn bundler() -> Command {
    let mut cmd = Command::cargo_bin("kodegen_bundler_maven").unwrap();
    cmd.env_remove("GPG_PASSPHRASE").env_remove("RUST_LOG");
    cmd
}

#[test]
fn skip_exits_cleanly_without_writing() {
    let out = tempdir().unwrap();

    bundler()
        .arg("--skip")
        .arg("--output")
        .arg(out.path())
        .assert()
        .success();

    assert!(!out.path().join("central-publishing").exists());
}

#[test]
fn absent_projects_directory_is_nothing_to_do() {
    let out = tempdir().unwrap();

    bundler()
        .args(["--projects-dir"])
        .arg(out.path().join("no-such-dir"))
        .args(["--project", "core", "--output"])
        .arg(out.path())
        .assert()
        .success();

    assert!(!out.path().join("central-publishing").exists());
}

#[test]
fn no_projects_is_configuration_error() {
    bundler()
        .arg("--projects-dir")
        .arg(fixtures_dir())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no projects specified"));
}

#[test]
fn unsupported_checksum_is_configuration_error() {
    let out = tempdir().unwrap();

    bundler()
        .arg("--projects-dir")
        .arg(fixtures_dir())
        .args(["--project", "tools-bom", "--skip-sign", "--checksums", "MD5,CRC32"])
        .arg("--output")
        .arg(out.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error").and(predicate::str::contains("CRC32")));
}

#[test]
fn json_prints_the_deployment_request() {
    let out = tempdir().unwrap();

    let assert = bundler()
        .arg("--projects-dir")
        .arg(fixtures_dir())
        .args(["--project", "platform-bom,tools-bom", "--skip-sign", "--json"])
        .args(["--auto-publish", "--wait-until", "published"])
        .arg("--output")
        .arg(out.path())
        .assert()
        .success();

    let request: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(request["deployment_name"], "io.kodegen.platform:platform-bom:2.4.1");
    assert_eq!(request["publishing_type"], "AUTOMATIC");
    assert_eq!(request["wait_until"], "PUBLISHED");

    let bundle = out.path().join("central-publishing/central-bundle.zip");
    assert_eq!(request["bundle_path"], bundle.to_string_lossy().as_ref());
    assert!(bundle.is_file());
}

#[test]
fn published_requires_auto_publish() {
    bundler()
        .arg("--projects-dir")
        .arg(fixtures_dir())
        .args(["--project", "tools-bom", "--skip-sign", "--wait-until", "published"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("automatic publishing"));
}

#[test]
fn failed_batch_exits_one_and_leaves_no_bundle() {
    let out = tempdir().unwrap();

    bundler()
        .arg("--projects-dir")
        .arg(fixtures_dir())
        .args(["--project", "tools-bom,tools-bom", "--skip-sign"])
        .arg("--output")
        .arg(out.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Duplicate"));

    assert!(!out.path().join("central-publishing/central-bundle.zip").exists());
}
