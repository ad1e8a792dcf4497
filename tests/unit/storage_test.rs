//! Tests for the persisted local store and disk file storage

use std::sync::Arc;

use chrono::Duration;
use healthdesk::adapters::local::STORE_FILE;
use healthdesk::adapters::{DiskFileStorage, LocalStore, MemoryFileStorage, stores_from};
use healthdesk::core::models::{Medication, Role};
use healthdesk::core::ports::{DoctorProfileStore, FileStorage, HealthRecordStore};
use healthdesk::core::services::{ReviewDecision, dashboard_gate, review_profile};
use tempfile::TempDir;

use crate::common::fixtures;

fn open(dir: &TempDir) -> Arc<LocalStore> {
    Arc::new(LocalStore::open(dir.path(), Duration::hours(1)).unwrap())
}

#[test]
fn test_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let files = Arc::new(DiskFileStorage::new(dir.path().join("files")));

    let profile_id = {
        let stores = stores_from(open(&dir), files.clone());
        let registration = fixtures::register(&stores, "ada@example.com");
        review_profile(&stores, "admin", &registration.profile.id, &ReviewDecision::verify())
            .unwrap();
        stores
            .health
            .add_medication(&Medication::new("patient-1", "Aspirin", None, None))
            .unwrap();
        registration.profile.id
    };

    assert!(dir.path().join(STORE_FILE).exists());

    let store = open(&dir);
    let profile = DoctorProfileStore::get(&*store, &profile_id).unwrap().unwrap();
    assert!(profile.is_verified());
    assert_eq!(store.medications("patient-1").unwrap().len(), 1);

    // Passwords were hashed and persisted; the reopened store can sign in
    let stores = stores_from(store, files);
    let session = fixtures::sign_in(&stores, "ada@example.com");
    assert_eq!(session.role(), Role::Doctor);
}

#[test]
fn test_two_handles_on_one_data_dir_keep_each_others_writes() {
    let dir = TempDir::new().unwrap();
    let files = || Arc::new(DiskFileStorage::new(dir.path().join("files")));
    let server = stores_from(open(&dir), files());
    let cli = stores_from(open(&dir), files());

    fixtures::account(&server, "pat@example.com", Role::Patient);
    fixtures::account(&cli, "admin@example.com", Role::Admin);

    // The server handle sees the account created by the other handle
    assert!(server.auth.find_by_email("admin@example.com").unwrap().is_some());

    // A later server write keeps the other handle's account on disk
    fixtures::sign_in(&server, "pat@example.com");
    let reopened = stores_from(open(&dir), files());
    assert!(reopened.auth.find_by_email("admin@example.com").unwrap().is_some());
    assert!(reopened.auth.find_by_email("pat@example.com").unwrap().is_some());
    let admin = fixtures::sign_in(&server, "admin@example.com");
    assert_eq!(admin.role(), Role::Admin);
}

#[test]
fn test_review_from_other_handle_reaches_gate() {
    let dir = TempDir::new().unwrap();
    let files = || Arc::new(DiskFileStorage::new(dir.path().join("files")));
    let server = stores_from(open(&dir), files());
    let cli = stores_from(open(&dir), files());

    let registration = fixtures::register(&server, "ada@example.com");
    let session = fixtures::sign_in(&server, "ada@example.com");
    assert!(!dashboard_gate(&server, &session).unwrap().renders());

    review_profile(&cli, "cli", &registration.profile.id, &ReviewDecision::verify()).unwrap();
    assert!(dashboard_gate(&server, &session).unwrap().renders());
}

#[test]
fn test_password_not_stored_in_clear() {
    let dir = TempDir::new().unwrap();
    let stores = stores_from(open(&dir), Arc::new(DiskFileStorage::new(dir.path().join("files"))));
    fixtures::account(&stores, "pat@example.com", Role::Patient);

    let raw = std::fs::read_to_string(dir.path().join(STORE_FILE)).unwrap();
    assert!(!raw.contains(fixtures::PASSWORD));
    assert!(raw.contains("$argon2"));
}

#[test]
fn test_corrupt_store_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(STORE_FILE), "{not json").unwrap();

    let err = LocalStore::open(dir.path(), Duration::hours(1)).unwrap_err();
    assert!(err.to_string().contains("Corrupt store file"));
}

#[test]
fn test_disk_documents_written_under_identity() {
    let dir = TempDir::new().unwrap();
    let files = Arc::new(DiskFileStorage::new(dir.path().join("files")));
    let stores = stores_from(open(&dir), files.clone());

    let registration = fixtures::register(&stores, "ada@example.com");
    let id = &registration.identity.id;

    let license = dir.path().join("files").join(id).join("medical_license.pdf");
    assert_eq!(std::fs::read(&license).unwrap(), b"license");
    assert_eq!(
        files.download(&format!("{id}/degree.pdf")).unwrap().as_deref(),
        Some(&b"degree"[..])
    );
}

#[test]
fn test_sessions_expire() {
    let stores = stores_from(
        Arc::new(LocalStore::in_memory(Duration::zero())),
        Arc::new(MemoryFileStorage::new()),
    );
    let session = fixtures::account(&stores, "pat@example.com", Role::Patient);
    assert!(stores.auth.session(&session.token).unwrap().is_none());
}
