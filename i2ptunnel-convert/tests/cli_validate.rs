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

fn path_as_str(path: &Path) -> &str {
    path.to_str().expect("path should be valid utf-8")
}

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("i2ptunnel-convert"))
}

#[test]
fn validate_reports_valid_file() {
    let input = fixture("fixtures/eepsite.conf");
    cmd()
        .arg(path_as_str(&input))
        .arg("--validate")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Configuration in '{}' is valid (ini format)",
            input.display()
        )));
}

#[test]
fn validate_does_not_write() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("t.config");
    fs::write(&input, "name=t\ntype=client\nlistenPort=7000\n").expect("write input");

    cmd().arg(path_as_str(&input)).arg("--validate").assert().success();
    assert!(!dir.path().join("t.yaml").exists());
}

#[test]
fn missing_port_fails_validation() {
    cmd()
        .arg(path_as_str(&fixture("fixtures/missing-port.config")))
        .arg("--validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("validation error in"))
        .stderr(predicate::str::contains("Local port is required for HTTP client"));
}

#[test]
fn strict_mode_flags_privileged_port() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("web.config");
    fs::write(&input, "name=web\ntype=httpclient\nlistenPort=80\n").expect("write input");

    cmd().arg(path_as_str(&input)).arg("--validate").assert().success();
    cmd()
        .arg(path_as_str(&input))
        .arg("--validate")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("privileged range"));
}

#[test]
fn strict_mode_rejects_unknown_type() {
    let input = fixture("fixtures/socks.conf");
    cmd().arg(path_as_str(&input)).arg("--validate").assert().success();
    cmd()
        .arg(path_as_str(&input))
        .arg("--validate")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tunnel type: socks"));
}

#[test]
fn strict_setting_from_config_file() {
    let dir = tempdir().expect("tempdir");
    let settings = dir.path().join("settings.toml");
    fs::write(&settings, "[convert]\nstrict = true\n").expect("write settings");

    cmd()
        .arg(path_as_str(&fixture("fixtures/socks.conf")))
        .arg("--validate")
        .arg("--config")
        .arg(path_as_str(&settings))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tunnel type"));
}

#[test]
fn yaml_with_two_tunnels_is_rejected() {
    cmd()
        .arg(path_as_str(&fixture("fixtures/two-tunnels.yaml")))
        .arg("--validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("found 2 tunnels (alpha, beta)"));
}
