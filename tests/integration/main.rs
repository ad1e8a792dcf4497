//! Integration tests for the healthdesk CLI and HTTP surface
//!
//! CLI tests run the real binary against a temp data dir selected through
//! `HEALTHDESK_CONFIG`. The lifecycle tests drive the full verification
//! cycle through the router: register → pending → review → dashboard.


#[path = "../common/mod.rs"]
#[allow(dead_code)]
mod common;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use assert_cmd::cargo;
use chrono::Duration;
use healthdesk::adapters::{DiskFileStorage, LocalStore, stores_from};
use healthdesk::config::AppConfig;
use healthdesk::core::ports::Stores;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a healthdesk command
fn healthdesk(config: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("healthdesk"));
    cmd.env("HEALTHDESK_CONFIG", config).env_remove("HEALTHDESK_ADMIN_PASSWORD");
    cmd
}

/// Temp dir with a config whose data dir lives inside it
fn setup() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");
    let mut config = AppConfig::default();
    config.storage.data_dir = Some(temp.path().join("data"));
    config.save_to(&config_path).unwrap();
    (temp, config_path)
}

/// Stores over the same data dir the binary uses
fn open_stores(temp: &TempDir) -> Stores {
    let data = temp.path().join("data");
    stores_from(
        Arc::new(LocalStore::open(&data, Duration::hours(1)).unwrap()),
        Arc::new(DiskFileStorage::new(data.join("files"))),
    )
}

// =============================================================================
// BASIC COMMANDS
// =============================================================================

#[test]
fn test_version() {
    let (_temp, config) = setup();
    healthdesk(&config)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("healthdesk v"));

    healthdesk(&config)
        .args(["version", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn test_no_command_prints_hint() {
    let (_temp, config) = setup();
    healthdesk(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("--help"));
}

#[test]
fn test_config_shows_data_dir() {
    let (temp, config) = setup();
    let data_dir = temp.path().join("data");
    healthdesk(&config)
        .args(["config", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"exists\":true"))
        .stdout(predicate::str::contains(data_dir.display().to_string()));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let (_temp, config) = setup();
    healthdesk(&config)
        .args(["config", "--init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_init_writes_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("fresh/config.toml");
    healthdesk(&config).args(["config", "--init"]).assert().success();
    assert!(config.exists());
    assert_eq!(AppConfig::load_from(&config).unwrap(), AppConfig::default());
}

// =============================================================================
// ADMINISTRATION
// =============================================================================

#[test]
fn test_add_admin() {
    let (temp, config) = setup();
    healthdesk(&config)
        .args(["add-admin", "root@example.com", "--password", "secret123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created admin root@example.com"));

    let stores = open_stores(&temp);
    let session = stores.auth.sign_in("root@example.com", "secret123").unwrap();
    assert_eq!(session.role(), healthdesk::core::models::Role::Admin);

    healthdesk(&config)
        .args(["add-admin", "root@example.com", "--password", "secret123"])
        .assert()
        .failure();
}

#[test]
fn test_add_admin_short_password() {
    let (_temp, config) = setup();
    healthdesk(&config)
        .args(["add-admin", "root@example.com", "--password", "123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 6 characters"));
}

#[test]
fn test_status_unknown_email() {
    let (_temp, config) = setup();
    healthdesk(&config)
        .args(["status", "ghost@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No account registered"));
}

#[test]
fn test_review_cycle_from_cli() {
    let (temp, config) = setup();
    {
        let stores = open_stores(&temp);
        common::fixtures::register(&stores, "ada@example.com");
    }

    healthdesk(&config)
        .args(["status", "ada@example.com", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"state\": \"pending\""))
        .stdout(predicate::str::contains("/doctor/verification-status"));

    healthdesk(&config)
        .args(["review", "ada@example.com", "--status", "rejected", "--notes", "Invalid license"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked rejected"));

    healthdesk(&config)
        .args(["status", "ada@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid license"));

    healthdesk(&config)
        .args(["review", "ada@example.com", "--credentials"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(3 credentials)"));

    healthdesk(&config)
        .args(["doctors", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ada@example.com"));

    healthdesk(&config)
        .args(["doctors", "--search", "oncology"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No verified doctors found."));
}

#[test]
fn test_review_rejects_pending_decision() {
    let (temp, config) = setup();
    {
        let stores = open_stores(&temp);
        common::fixtures::register(&stores, "ada@example.com");
    }

    healthdesk(&config)
        .args(["review", "ada@example.com", "--status", "pending"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("verified"));
}
