//! Command-line behaviour, mostly without a backend

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Command isolated from the caller's environment and session
fn admin(session_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("spinovo-admin").unwrap();
    cmd.env_clear()
        .env("SPINOVO_SESSION_FILE", session_dir.join("session.json"))
        .env("SPINOVO_API_URL", "http://127.0.0.1:9/api/v1")
        .env("SPINOVO_ENV", "development")
        .env("NO_COLOR", "1");
    cmd
}

fn write_session(dir: &Path, expiry_ms: i64) {
    let user = json!({"_id": "adm1", "name": "Asha Rao", "mobile": "9876543210"}).to_string();
    let session = json!({
        "spinovo_admin_token": "jwt-1",
        "spinovo_admin_user": user,
        "spinovo_token_expiry": expiry_ms.to_string(),
    });
    std::fs::write(dir.join("session.json"), session.to_string()).unwrap();
}

fn status_json(dir: &Path) -> Value {
    let output = admin(dir).args(["status", "--format", "json"]).output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    admin(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("bookings"))
        .stdout(predicate::str::contains("packages"));
}

#[test]
fn test_status_without_session() {
    let dir = TempDir::new().unwrap();
    admin(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));

    assert_eq!(status_json(dir.path())["state"], "unauthenticated");
}

#[test]
fn test_status_reads_stored_session() {
    let dir = TempDir::new().unwrap();
    write_session(dir.path(), 4_102_444_800_000);

    let status = status_json(dir.path());
    assert_eq!(status["state"], "authenticated");
    assert_eq!(status["user"]["name"], "Asha Rao");
    assert_eq!(status["base_url"], "http://127.0.0.1:9/api/v1");
}

#[test]
fn test_status_reports_expired_session() {
    let dir = TempDir::new().unwrap();
    write_session(dir.path(), 1_000);

    assert_eq!(status_json(dir.path())["state"], "expired");
}

#[test]
fn test_logout_clears_session_file() {
    let dir = TempDir::new().unwrap();
    write_session(dir.path(), 4_102_444_800_000);

    admin(dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    let stored = std::fs::read_to_string(dir.path().join("session.json")).unwrap();
    assert!(!stored.contains("jwt-1"));
    assert_eq!(status_json(dir.path())["state"], "unauthenticated");
}

#[test]
fn test_login_rejects_bad_mobile_locally() {
    let dir = TempDir::new().unwrap();
    admin(dir.path())
        .args(["login", "--mobile", "12345", "--password", "password123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid mobile number format"));
}

#[test]
fn test_login_reads_password_from_env() {
    let dir = TempDir::new().unwrap();
    admin(dir.path())
        .env("SPINOVO_PASSWORD", "short")
        .args(["login", "--mobile", "9876543210"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid password format"));
}

#[test]
fn test_invalid_id_rejected_before_request() {
    let dir = TempDir::new().unwrap();
    admin(dir.path())
        .args(["customers", "show", "undefined"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid customer ID provided"));
}

#[test]
fn test_signed_out_call_fails_without_network() {
    let dir = TempDir::new().unwrap();
    admin(dir.path())
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No authentication token found"));
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    admin(dir.path())
        .args(["status", "--config"])
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
}

/// Config file pointing at `base_url` with a single request attempt
fn write_config(dir: &Path, base_url: &str, environment: &str) -> std::path::PathBuf {
    let file = dir.join("admin.toml");
    let session = dir.join("session.json").display().to_string();
    let body = format!(
        "base_url = {base_url:?}\nenvironment = {environment:?}\nsession_file = {session:?}\n\n[retry]\nmax_attempts = 1\n"
    );
    std::fs::write(&file, body).unwrap();
    file
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_login_exits_with_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": false,
            "msg": "Invalid credentials"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    admin(dir.path())
        .env("SPINOVO_API_URL", format!("{}/api/v1", server.uri()))
        .args(["login", "--mobile", "9876543210", "--password", "password123"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Signed in").not())
        .stderr(predicate::str::contains("Invalid credentials"));

    assert_eq!(status_json(dir.path())["state"], "unauthenticated");
}

#[test]
fn test_config_file_overrides_environment() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "http://127.0.0.1:9/v2", "staging");

    let output = admin(dir.path())
        .env("SPINOVO_ENV", "production")
        .args(["status", "--format", "json", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    let status: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["environment"], "staging");
    assert_eq!(status["base_url"], "http://127.0.0.1:9/v2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_config_file_environment_controls_error_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/dashboard"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let base_url = format!("{}/api/v1", server.uri());

    let dir = TempDir::new().unwrap();
    write_session(dir.path(), 4_102_444_800_000);

    let development = write_config(dir.path(), &base_url, "development");
    admin(dir.path())
        .env("SPINOVO_ENV", "production")
        .args(["dashboard", "--config"])
        .arg(&development)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Server error: 500"));

    let production = write_config(dir.path(), &base_url, "production");
    admin(dir.path())
        .env("SPINOVO_ENV", "development")
        .args(["dashboard", "--config"])
        .arg(&production)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: An unexpected error occurred. Please try again later.",
        ));
}

#[test]
fn test_no_color_output_is_plain() {
    let dir = TempDir::new().unwrap();
    admin(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());
}
