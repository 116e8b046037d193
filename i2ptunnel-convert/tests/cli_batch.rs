use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn copy_fixtures(names: &[&str], dir: &Path) {
    for name in names {
        fs::copy(fixture(&format!("fixtures/{name}")), dir.join(name)).expect("fixture copy");
    }
}

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("i2ptunnel-convert"))
}

fn pattern(dir: &Path, glob: &str) -> String {
    dir.join(glob)
        .to_str()
        .expect("path should be valid utf-8")
        .to_string()
}

#[test]
fn batch_converts_every_match() {
    let dir = tempdir().expect("tempdir");
    copy_fixtures(&["httpclient.config", "numbered.config"], dir.path());

    cmd()
        .arg("--batch")
        .arg("--out-format")
        .arg("ini")
        .arg(pattern(dir.path(), "*.config"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Batch conversion summary: 2/2 files converted, 0 failed",
        ));

    assert!(dir.path().join("httpclient.conf").exists());
    assert!(dir.path().join("numbered.conf").exists());
}

#[test]
fn batch_continues_after_failure_and_exits_nonzero() {
    let dir = tempdir().expect("tempdir");
    copy_fixtures(&["eepsite.conf", "unclosed.conf", "socks.conf"], dir.path());

    cmd()
        .arg("--batch")
        .arg("--validate")
        .arg(pattern(dir.path(), "*.conf"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("is valid (ini format)"))
        .stdout(predicate::str::contains("Failed to process"))
        .stdout(predicate::str::contains("Validation summary: 2/3 files valid, 1 failed"))
        .stderr(predicate::str::contains("1 of 3 files failed processing"));
}

#[test]
fn batch_dry_run_prints_documents_then_summary() {
    let dir = tempdir().expect("tempdir");
    copy_fixtures(&["client.yaml", "server.yaml"], dir.path());

    cmd()
        .arg("--batch")
        .arg("--dry-run")
        .arg("--out-format")
        .arg("properties")
        .arg(pattern(dir.path(), "*.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("from yaml to properties format:\nname=git\n"))
        .stdout(predicate::str::contains("name=ssh\ntype=server\n"))
        .stdout(predicate::str::contains("Dry-run conversion"))
        .stdout(predicate::str::contains("Dry-run summary: 2/2 files processed, 0 failed"));

    assert!(!dir.path().join("client.properties").exists());
}

#[test]
fn batch_json_report() {
    let dir = tempdir().expect("tempdir");
    copy_fixtures(&["client.yaml", "two-tunnels.yaml"], dir.path());

    let out = cmd()
        .arg("--batch")
        .arg("--validate")
        .arg("--report")
        .arg("json")
        .arg(pattern(dir.path(), "*.yaml"))
        .output()
        .expect("run");

    assert_eq!(out.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(json["mode"], "validate");
    assert_eq!(json["total"], 2);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["results"][0]["in_format"], "yaml");
    assert_eq!(json["results"][1]["success"], false);
}

#[test]
fn batch_rejects_output_file() {
    let dir = tempdir().expect("tempdir");
    copy_fixtures(&["client.yaml"], dir.path());

    cmd()
        .arg("--batch")
        .arg(pattern(dir.path(), "*.yaml"))
        .arg("-o")
        .arg("out.conf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot specify output file in batch mode"));
}

#[test]
fn batch_without_matches_fails() {
    let dir = tempdir().expect("tempdir");

    cmd()
        .arg("--batch")
        .arg(pattern(dir.path(), "*.config"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no files match pattern"));
}
