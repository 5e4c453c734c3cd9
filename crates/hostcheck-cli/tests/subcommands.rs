//! Integration tests for the report, explain, and roles subcommands.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn hostcheck_cmd() -> Command {
    Command::cargo_bin("hostcheck").unwrap()
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("hostcheck-cli should have parent")
        .parent()
        .expect("crates should have parent")
        .join("tests")
        .join("fixtures")
}

/// Run the drift fixture once and return the report path inside `dir`.
fn write_drift_report(dir: &Path) -> PathBuf {
    let report_path = dir.join("report.json");
    let target = format!(
        "snapshot://{}",
        fixtures_dir().join("solr_drift").join("host.toml").display()
    );
    hostcheck_cmd()
        .arg("--config")
        .arg(dir.join("no-suite.toml"))
        .arg("--role")
        .arg("solr")
        .arg("check")
        .arg("--quiet")
        .arg("--target")
        .arg(target)
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .code(2);
    report_path
}

// ============================================================================
// md
// ============================================================================

#[test]
fn md_renders_existing_report_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let report = write_drift_report(temp_dir.path());

    hostcheck_cmd()
        .arg("md")
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Hostcheck report"))
        .stdout(predicate::str::contains("Checks: 6 passed, 7 failed, 0 skipped"))
        .stdout(predicate::str::contains(
            "link_target: expected `/opt/solr-6.2.0`, found `/opt/solr-6.3.0`",
        ));
}

#[test]
fn md_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let report = write_drift_report(temp_dir.path());
    let out = temp_dir.path().join("md").join("comment.md");

    hostcheck_cmd()
        .arg("md")
        .arg("--report")
        .arg(&report)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let md = std::fs::read_to_string(&out).expect("markdown written");
    assert!(md.contains("| FAIL | solr | `host.package_installed` | `sudo` |"));
}

#[test]
fn md_rejects_foreign_report() {
    let temp_dir = TempDir::new().unwrap();
    let report = temp_dir.path().join("other.json");
    std::fs::write(&report, r#"{"schema":"otherguard.report.v2"}"#).unwrap();

    hostcheck_cmd()
        .arg("md")
        .arg("--report")
        .arg(&report)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown report schema"));
}

// ============================================================================
// annotations
// ============================================================================

#[test]
fn annotations_emit_one_line_per_failure() {
    let temp_dir = TempDir::new().unwrap();
    let report = write_drift_report(temp_dir.path());

    let output = hostcheck_cmd()
        .arg("annotations")
        .arg("--report")
        .arg(&report)
        .output()
        .expect("run annotations");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines.iter().all(|l| l.starts_with("::error title=snapshot")));
    assert!(lines[0].contains("::[host.package_installed:package_missing] package 'sudo'"));
}

#[test]
fn annotations_respect_max() {
    let temp_dir = TempDir::new().unwrap();
    let report = write_drift_report(temp_dir.path());

    let output = hostcheck_cmd()
        .arg("annotations")
        .arg("--report")
        .arg(&report)
        .arg("--max")
        .arg("2")
        .output()
        .expect("run annotations");

    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 2);
}

// ============================================================================
// explain
// ============================================================================

#[test]
fn explain_check_id_prints_remediation_and_probe() {
    hostcheck_cmd()
        .arg("explain")
        .arg("host.symlink_target")
        .assert()
        .success()
        .stdout(predicate::str::contains("Remediation"))
        .stdout(predicate::str::contains("Inspect by hand:"))
        .stdout(predicate::str::contains("readlink -f"));
}

#[test]
fn explain_code_resolves_to_its_check() {
    hostcheck_cmd()
        .arg("explain")
        .arg("service_enabled_mismatch")
        .assert()
        .success()
        .stdout(predicate::str::contains("systemctl"));
}

#[test]
fn explain_unknown_lists_available_identifiers() {
    hostcheck_cmd()
        .arg("explain")
        .arg("host.kernel_version")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown check_id or code: host.kernel_version"))
        .stderr(predicate::str::contains("  - host.path_ownership"));
}

// ============================================================================
// roles
// ============================================================================

#[test]
fn roles_lists_builtin_roles() {
    let temp_dir = TempDir::new().unwrap();

    hostcheck_cmd()
        .arg("--config")
        .arg(temp_dir.path().join("no-suite.toml"))
        .arg("roles")
        .assert()
        .success()
        .stdout(predicate::str::contains("suite: builtin"))
        .stdout(predicate::str::contains("* solr"))
        .stdout(predicate::str::contains("* zookeeper"))
        .stdout(predicate::str::contains("(2 disabled)"));
}

#[test]
fn roles_marks_only_enabled_roles_of_a_suite_file() {
    let suite = fixtures_dir().join("custom_suite").join("hostcheck.toml");

    hostcheck_cmd()
        .arg("--config")
        .arg(&suite)
        .arg("roles")
        .assert()
        .success()
        .stdout(predicate::str::contains("* web"))
        .stdout(predicate::str::contains("  batch"));
}

#[test]
fn roles_reports_malformed_suite() {
    let suite = fixtures_dir().join("malformed").join("hostcheck.toml");

    hostcheck_cmd()
        .arg("--config")
        .arg(&suite)
        .arg("roles")
        .assert()
        .failure()
        .stderr(predicate::str::contains("role `solr`, symlinks[0]"));
}
