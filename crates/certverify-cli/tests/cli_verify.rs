//! End-to-end tests for the `certverify` binary.
//!
//! Runs against the built-in static registry and a temporary local archive,
//! so no network access is needed.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const AMAZON_CERT: &str = "\
CARBON OFFSET CERTIFICATE
Name: Green Future Innovations Corp.
Issuer: Verra
Project ID: VCS-875
Score: 85
";

fn certverify(archive: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("certverify").expect("certverify binary");
    cmd.env("CERTVERIFY_REGISTRY_BACKEND", "static")
        .env("CERTVERIFY_ARCHIVE_BACKEND", "local")
        .env("CERTVERIFY_ARCHIVE_DIR", archive)
        .env_remove("CERTVERIFY_CONFIG")
        .env_remove("CERTVERIFY_MIN_TRUST_SCORE")
        .env_remove("CERTVERIFY_OCR_COMMAND")
        .env_remove("CERTVERIFY_REGISTRY_TABLE")
        .env_remove("CERTVERIFY_REGISTRY_TIMEOUT")
        .env_remove("CERTVERIFY_VERIFY_TIMEOUT")
        .env("RUST_LOG", "warn");
    cmd
}

fn write_cert(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write certificate");
    path
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn verify_authenticates_known_project() {
    let work = TempDir::new().unwrap();
    let archive = TempDir::new().unwrap();
    let cert = write_cert(work.path(), "cert.txt", AMAZON_CERT);

    let output = certverify(archive.path())
        .arg("verify")
        .arg(&cert)
        .assert()
        .code(0)
        .get_output()
        .clone();

    let verdict = stdout_json(&output);
    assert_eq!(verdict["status"], "authenticated");
    assert_eq!(verdict["meta"]["project_id"], "VCS-875");
    assert_eq!(
        verdict["meta"]["project_name"],
        "Amazon Basin REDD+ Conservation"
    );
    assert_eq!(verdict["meta"]["score"], 85);
    assert_eq!(verdict["meta"]["issuer"], "Verra");
    assert_eq!(verdict["meta"]["issued_to"], "Green Future Innovations Corp.");

    let cid = verdict["meta"]["cid"].as_str().unwrap();
    let hex = cid.strip_prefix("sha256:").expect("local content id");
    let archived = std::fs::read(archive.path().join("sha256").join(hex)).unwrap();
    assert_eq!(archived, AMAZON_CERT.as_bytes());
}

#[test]
fn verify_same_document_twice_gives_same_verdict() {
    let work = TempDir::new().unwrap();
    let archive = TempDir::new().unwrap();
    let cert = write_cert(work.path(), "cert.txt", AMAZON_CERT);

    let first = certverify(archive.path())
        .arg("verify")
        .arg(&cert)
        .output()
        .unwrap();
    let second = certverify(archive.path())
        .arg("verify")
        .arg(&cert)
        .output()
        .unwrap();

    assert_eq!(stdout_json(&first), stdout_json(&second));
}

#[test]
fn verify_low_score_is_rejected_and_not_archived() {
    let work = TempDir::new().unwrap();
    let archive = TempDir::new().unwrap();
    let cert = write_cert(
        work.path(),
        "low.txt",
        "Name: Someone\nProject ID: VCS-875\nScore: 40\n",
    );

    certverify(archive.path())
        .arg("verify")
        .arg(&cert)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            r#"{"status":"rejected","reason":"score below 70"}"#,
        ));

    assert!(!archive.path().join("sha256").exists());
}

#[test]
fn verify_unknown_project_is_rejected() {
    let work = TempDir::new().unwrap();
    let archive = TempDir::new().unwrap();
    let cert = write_cert(
        work.path(),
        "unknown.txt",
        "Project ID: VCS-9999\nScore: 90\n",
    );

    certverify(archive.path())
        .arg("verify")
        .arg(&cert)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("invalid project identifier"));

    assert!(!archive.path().join("sha256").exists());
}

#[test]
fn verify_missing_project_id_is_rejected() {
    let work = TempDir::new().unwrap();
    let archive = TempDir::new().unwrap();
    let cert = write_cert(work.path(), "noid.txt", "Name: Someone\nScore: 99\n");

    certverify(archive.path())
        .arg("verify")
        .arg(&cert)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing project identifier"));
}

#[test]
fn verify_binary_garbage_is_extraction_failure() {
    let work = TempDir::new().unwrap();
    let archive = TempDir::new().unwrap();
    let path = work.path().join("garbage.bin");
    std::fs::write(&path, [0xff_u8, 0xfe, 0x00, 0x9f]).unwrap();

    certverify(archive.path())
        .arg("verify")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("extraction failed"));
}

#[test]
fn min_score_flag_changes_threshold() {
    let work = TempDir::new().unwrap();
    let archive = TempDir::new().unwrap();
    let cert = write_cert(work.path(), "cert.txt", AMAZON_CERT);

    certverify(archive.path())
        .args(["verify", "--min-score", "90"])
        .arg(&cert)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("score below 90"));
}

#[test]
fn registry_table_override_is_used() {
    let work = TempDir::new().unwrap();
    let archive = TempDir::new().unwrap();
    let table = write_cert(
        work.path(),
        "table.yaml",
        "GS-42:\n  category: Cookstoves\n",
    );
    let cert = write_cert(work.path(), "gs.txt", "Project: GS-42\nScore: 75\n");

    let output = certverify(archive.path())
        .arg("verify")
        .arg("--registry-table")
        .arg(&table)
        .arg(&cert)
        .assert()
        .code(0)
        .get_output()
        .clone();

    let verdict = stdout_json(&output);
    assert_eq!(verdict["meta"]["project_name"], "N/A");
    assert_eq!(verdict["meta"]["issuer"], serde_json::Value::Null);
}

#[test]
fn verify_missing_file_is_config_error() {
    let archive = TempDir::new().unwrap();

    certverify(archive.path())
        .args(["verify", "/nonexistent/certificate.pdf"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[test]
fn lookup_reports_found_and_not_found() {
    let archive = TempDir::new().unwrap();

    let output = certverify(archive.path())
        .args(["lookup", "VCS-1654"])
        .assert()
        .code(0)
        .get_output()
        .clone();
    let found = stdout_json(&output);
    assert_eq!(found["status"], "found");
    assert_eq!(found["record"]["name"], "Borneo Peatland Restoration");
    assert_eq!(found["record"]["country"], "Indonesia");

    certverify(archive.path())
        .args(["lookup", "VCS-9999"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#"{"status":"not_found"}"#));
}

#[test]
fn extract_prints_claims() {
    let work = TempDir::new().unwrap();
    let archive = TempDir::new().unwrap();
    let cert = write_cert(work.path(), "cert.txt", AMAZON_CERT);

    let output = certverify(archive.path())
        .args(["extract", "--no-text"])
        .arg(&cert)
        .assert()
        .code(0)
        .get_output()
        .clone();

    let claims = stdout_json(&output);
    assert_eq!(claims["trust_score"], 85);
    assert_eq!(claims["project_id"], "VCS-875");
    assert_eq!(claims["raw_text"], "");
}

#[cfg(unix)]
#[test]
fn ocr_command_is_used_for_recognition() {
    let work = TempDir::new().unwrap();
    let archive = TempDir::new().unwrap();
    let cert = write_cert(work.path(), "scan.txt", AMAZON_CERT);

    certverify(archive.path())
        .args(["verify", "--ocr-command", "cat"])
        .arg(&cert)
        .assert()
        .code(0)
        .stdout(predicate::str::contains(r#""status":"authenticated""#));
}

#[cfg(unix)]
#[test]
fn verify_timeout_discards_verdict() {
    let work = TempDir::new().unwrap();
    let archive = TempDir::new().unwrap();
    let cert = write_cert(work.path(), "slow.txt", AMAZON_CERT);

    certverify(archive.path())
        .env("CERTVERIFY_OCR_ARGS", "5")
        .args(["verify", "--ocr-command", "sleep", "--timeout-secs", "1"])
        .arg(&cert)
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("timed out"));

    assert!(!archive.path().join("sha256").exists());
}

#[test]
fn verify_reads_score_and_id_past_headings() {
    let work = TempDir::new().unwrap();
    let archive = TempDir::new().unwrap();
    let cert = write_cert(
        work.path(),
        "report.txt",
        "\
Trust Score Report
Project: Amazon Basin REDD+ Conservation
Project ID: VCS-875
Scored by independent auditor
Trust Score: 85
",
    );

    let output = certverify(archive.path())
        .arg("verify")
        .arg(&cert)
        .assert()
        .code(0)
        .get_output()
        .clone();

    let verdict = stdout_json(&output);
    assert_eq!(verdict["meta"]["project_id"], "VCS-875");
    assert_eq!(verdict["meta"]["score"], 85);
}

#[test]
fn invalid_backend_env_is_config_error() {
    let work = TempDir::new().unwrap();
    let archive = TempDir::new().unwrap();
    let cert = write_cert(work.path(), "cert.txt", AMAZON_CERT);

    certverify(archive.path())
        .env("CERTVERIFY_REGISTRY_BACKEND", "ftp")
        .arg("verify")
        .arg(&cert)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("CERTVERIFY_REGISTRY_BACKEND"));

    certverify(archive.path())
        .env("CERTVERIFY_ARCHIVE_BACKEND", "s3")
        .arg("verify")
        .arg(&cert)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("CERTVERIFY_ARCHIVE_BACKEND"));
}
