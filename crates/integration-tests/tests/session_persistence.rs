//! Shapes and lifecycle of the persisted session store.
//!
//! The store file is part of this demo's contract: a plaintext JSON
//! key-value map that can be read, edited, or corrupted by hand. These
//! tests pin the persisted shapes and prove that damage never blocks a
//! launch.

use std::sync::Arc;

use cartwheel_integration_tests::TestContext;
use cartwheel_storefront::clock::ManualClock;
use cartwheel_storefront::config::AppConfig;
use cartwheel_storefront::state::AppState;
use cartwheel_storefront::storage::{FileStorage, Storage};

use serde_json::{Value, json};

// ============================================================================
// Persisted Shapes
// ============================================================================

#[tokio::test]
async fn test_signup_persists_the_documented_shapes() {
    let ctx = TestContext::new();
    ctx.state
        .session()
        .sign_up("ava@example.com", "hunter2", "Ava Jones")
        .await
        .expect("signup should succeed on empty storage");

    let snapshot = ctx.storage.snapshot().await;

    let credentials: Value = serde_json::from_str(
        snapshot
            .get("credentials")
            .expect("signup writes the credentials key"),
    )
    .expect("the credential record is JSON");
    assert_eq!(
        credentials,
        json!({
            "email": "ava@example.com",
            "password": "hunter2",
            "name": "Ava Jones",
        })
    );

    let user: Value = serde_json::from_str(
        snapshot.get("user").expect("signup mirrors the session"),
    )
    .expect("the session mirror is JSON");
    assert_eq!(
        user,
        json!({
            "id": "1",
            "email": "ava@example.com",
            "name": "Ava Jones",
        })
    );
}

#[tokio::test]
async fn test_hand_written_store_contents_log_in() {
    // The store is fixture data; a hand-edited record is a valid account.
    let ctx = TestContext::new();
    ctx.storage
        .set(
            "credentials",
            r#"{"email":"noor@example.com","password":"s3cret","name":""}"#,
        )
        .await
        .expect("in-memory set cannot fail");

    let user = ctx
        .state
        .session()
        .log_in("noor@example.com", "s3cret")
        .await
        .expect("the hand-written record should authenticate");
    // Blank stored name falls back to the email's local part.
    assert_eq!(user.name, "noor");
}

// ============================================================================
// Damage Tolerance
// ============================================================================

#[tokio::test]
async fn test_corrupted_session_mirror_fails_open() {
    let ctx = TestContext::new();
    ctx.state
        .session()
        .sign_up("ava@example.com", "hunter2", "Ava Jones")
        .await
        .expect("signup should succeed on empty storage");

    ctx.storage
        .set("user", "{not json at all")
        .await
        .expect("in-memory set cannot fail");

    let relaunched = ctx.relaunch();
    assert_eq!(relaunched.state.session().restore_session().await, None);

    // The account itself is intact; only the restore was lost.
    relaunched
        .state
        .session()
        .log_in("ava@example.com", "hunter2")
        .await
        .expect("credentials should still authenticate");
}

#[tokio::test]
async fn test_corrupted_credentials_read_as_no_account() {
    let ctx = TestContext::new();
    ctx.storage
        .set("credentials", "not even close to json")
        .await
        .expect("in-memory set cannot fail");

    let err = ctx
        .state
        .session()
        .log_in("ava@example.com", "hunter2")
        .await
        .expect_err("a corrupt record cannot authenticate anyone");
    // Indistinguishable from a wrong password, by contract.
    assert_eq!(err.to_string(), "invalid credentials");
}

// ============================================================================
// On-Disk Store
// ============================================================================

#[tokio::test]
async fn test_file_backed_session_survives_a_process_restart() {
    let dir = tempfile::tempdir().expect("tempdir is available");
    let path = dir.path().join("cartwheel-store.json");
    let clock = ManualClock::default();

    {
        let state = AppState::with_backends(
            AppConfig::default(),
            Arc::new(FileStorage::new(path.clone())),
            Arc::new(clock.clone()),
        );
        state
            .session()
            .sign_up("ava@example.com", "hunter2", "Ava Jones")
            .await
            .expect("signup should succeed on an empty file");
    }

    // The file is inspectable plaintext, password included.
    let contents = std::fs::read_to_string(&path).expect("the store file exists");
    assert!(contents.contains("hunter2"));

    // A new process over the same file restores the session.
    let state = AppState::with_backends(
        AppConfig::default(),
        Arc::new(FileStorage::new(path)),
        Arc::new(clock),
    );
    let user = state
        .session()
        .restore_session()
        .await
        .expect("the on-disk session should restore");
    assert_eq!(user.email.as_str(), "ava@example.com");
}
