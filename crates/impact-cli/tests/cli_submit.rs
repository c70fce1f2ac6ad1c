use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn impact_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("impact").unwrap();
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("UPDATEIMPACT_APIKEY")
        .env_remove("UPDATEIMPACT_URL")
        .env_remove("UPDATEIMPACT_OPENBROWSER")
        .env_remove("RUST_LOG");
    cmd
}

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/reactor.txt")
}

#[test]
fn test_submit_without_api_key_fails_before_maven() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    impact_cmd(home.path())
        .current_dir(project.path())
        .args(["submit", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no API key configured"))
        .stderr(predicate::str::contains("no pom.xml").not());
}

#[test]
fn test_blank_api_key_is_rejected() {
    let home = TempDir::new().unwrap();

    impact_cmd(home.path())
        .env("UPDATEIMPACT_APIKEY", "   ")
        .arg("submit")
        .arg("--input")
        .arg(fixture())
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no API key configured"));
}

#[test]
fn test_dry_run_writes_report_file() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join("pom.xml"),
        "<project><artifactId>shop</artifactId></project>",
    )
    .unwrap();
    let out = project.path().join("target/impact.json");

    impact_cmd(home.path())
        .arg("submit")
        .arg("--project-dir")
        .arg(project.path())
        .arg("--input")
        .arg(fixture())
        .args(["--api-key", "cli-key", "--dry-run", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("dry run"));

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc["projectName"], "shop");
    assert_eq!(doc["apikey"], "cli-key");
    assert_eq!(doc["formatVersion"], "1.0");
    assert_eq!(doc["modules"][1]["moduleName"], "shop-core");
}

#[test]
fn test_api_key_from_config_file() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".updateimpact");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[submit]\napi-key = \"file-key\"\nopen-browser = false\n",
    )
    .unwrap();
    let out = home.path().join("report.json");

    impact_cmd(home.path())
        .arg("submit")
        .arg("--input")
        .arg(fixture())
        .arg("--dry-run")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc["apikey"], "file-key");
}

#[test]
fn test_env_api_key_wins_over_config_file() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".updateimpact");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[submit]\napi-key = \"file-key\"\n").unwrap();
    let out = home.path().join("report.json");

    impact_cmd(home.path())
        .env("UPDATEIMPACT_APIKEY", "env-key")
        .arg("submit")
        .arg("--input")
        .arg(fixture())
        .arg("--dry-run")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc["apikey"], "env-key");
}

#[test]
fn test_malformed_config_file_fails() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".updateimpact");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[submit\n").unwrap();

    impact_cmd(home.path())
        .args(["submit", "--api-key", "k", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_no_browser_flag_with_open_browser_env() {
    let home = TempDir::new().unwrap();

    impact_cmd(home.path())
        .env("UPDATEIMPACT_OPENBROWSER", "true")
        .args(["submit", "--api-key", "k", "--no-browser", "--dry-run", "--input"])
        .arg(fixture())
        .assert()
        .success();
}
