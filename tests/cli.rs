mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn authdev(config_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("authdev").unwrap();
    cmd.env_remove("AUTHDEV_URL")
        .env_remove("AUTHDEV_SESSION")
        .env_remove("AUTHDEV_LOG")
        .arg("--config")
        .arg(config_dir.path().join("config.toml"));
    cmd
}

#[test]
fn help_mentions_webauthn() {
    Command::cargo_bin("authdev")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("webauthn"));
}

#[test]
fn config_json_redacts_session() {
    let dir = tempfile::tempdir().unwrap();
    authdev(&dir)
        .env("AUTHDEV_URL", "https://auth.example.com")
        .env("AUTHDEV_SESSION", "top-secret")
        .args(["config", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://auth.example.com"))
        .stdout(predicate::str::contains("<redacted>"))
        .stdout(predicate::str::contains("top-secret").not());
}

#[test]
fn config_file_is_read() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[server]\nurl = \"https://from-file.example.com\"\n",
    )
    .unwrap();
    authdev(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://from-file.example.com"));
}

#[test]
fn devices_without_url_fails() {
    let dir = tempfile::tempdir().unwrap();
    authdev(&dir)
        .arg("devices")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no portal URL configured"));
}

#[test]
fn devices_json_keeps_null() {
    let dir = tempfile::tempdir().unwrap();
    let (url, _requests) = common::serve_once("200 OK", "null");
    authdev(&dir)
        .args(["devices", "--format", "json", "--url", &url])
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn devices_human_lists_filtered() {
    let dir = tempfile::tempdir().unwrap();
    let (url, _requests) = common::serve_once(
        "200 OK",
        r#"[{"id":1,"description":"YubiKey","attachment":"cross-platform"},{"id":2,"description":"Laptop","attachment":"platform"}]"#,
    );
    authdev(&dir)
        .args(["devices", "--platform", "--url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Laptop"))
        .stdout(predicate::str::contains("YubiKey").not())
        .stdout(predicate::str::contains("1 device"));
}

#[test]
fn unauthorized_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let (url, _requests) = common::serve_once("401 Unauthorized", r#"{"status":"KO"}"#);
    authdev(&dir)
        .args(["devices", "--url", &url])
        .assert()
        .failure()
        .stderr(predicate::str::contains("401"));
}

#[test]
fn summary_human_counts_devices() {
    let dir = tempfile::tempdir().unwrap();
    let (url, _requests) = common::serve_once(
        "200 OK",
        r#"[{"id":1,"attachment":"cross-platform","last_used_at":"2024-05-02T08:30:00+02:00"},{"id":2,"attachment":"platform","clone_warning":true}]"#,
    );
    authdev(&dir)
        .args(["summary", "--url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 devices"))
        .stdout(predicate::str::contains("cross-platform: 1"))
        .stdout(predicate::str::contains("clone warnings: 1"))
        .stdout(predicate::str::contains("never used:     1"));
}

#[test]
fn summary_json_keeps_null() {
    let dir = tempfile::tempdir().unwrap();
    let (url, _requests) = common::serve_once("200 OK", "null");
    authdev(&dir)
        .args(["summary", "--format", "json", "--url", &url])
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn summary_human_reports_absent() {
    let dir = tempfile::tempdir().unwrap();
    let (url, _requests) = common::serve_once("200 OK", "null");
    authdev(&dir)
        .args(["summary", "--url", &url])
        .assert()
        .success()
        .stdout("no device data returned\n");
}

#[test]
fn devices_json_echoes_records_as_received() {
    let dir = tempfile::tempdir().unwrap();
    let body = r#"[{"id":1,"created_at":"2024-03-01T10:00:00.123456789+11:00","last_used_at":null,"aaguid":null,"description":"key"}]"#;
    let (url, _requests) = common::serve_once("200 OK", body);
    let output = authdev(&dir)
        .args(["devices", "--format", "json", "--url", &url])
        .output()
        .unwrap();
    assert!(output.status.success());
    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let expected: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(printed, expected);
}
