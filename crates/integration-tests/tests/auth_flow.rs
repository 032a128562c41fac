//! Whole-journey tests for signup, login, lockout, and session restore.
//!
//! Every test drives the public session surface the way the screens do:
//! signup and logout on the service, login through the gate. The manual
//! clock makes the simulated latency and the lockout window observable.

use std::sync::Arc;

use cartwheel_integration_tests::{TEST_EPOCH_MILLIS, TestContext};
use cartwheel_storefront::clock::Clock;
use cartwheel_storefront::session::SessionError;
use cartwheel_storefront::session::gate::{LoginGate, LoginOutcome};
use cartwheel_storefront::session::limiter::LOCKOUT_DURATION;

fn gate(ctx: &TestContext) -> LoginGate {
    LoginGate::new(Arc::clone(ctx.state.session()), ctx.state.clock())
}

async fn signed_up_context() -> TestContext {
    let ctx = TestContext::new();
    ctx.state
        .session()
        .sign_up("ava@example.com", "hunter2", "Ava Jones")
        .await
        .expect("signup should succeed on empty storage");
    ctx.state.session().log_out().await;
    ctx
}

async fn fail_times(gate: &mut LoginGate, times: u32) {
    for attempt in 1..=times {
        match gate.attempt("ava@example.com", "wrong-password").await {
            LoginOutcome::Denied { failures, .. } => assert_eq!(failures, attempt),
            other => panic!("attempt {attempt} should be denied, got {other:?}"),
        }
    }
}

// ============================================================================
// Signup and Login
// ============================================================================

#[tokio::test]
async fn test_signup_then_login_roundtrip() {
    let ctx = signed_up_context().await;

    let outcome = gate(&ctx).attempt("ava@example.com", "hunter2").await;
    let LoginOutcome::Success(user) = outcome else {
        panic!("expected a successful login, got {outcome:?}");
    };
    assert_eq!(user.email.as_str(), "ava@example.com");
    assert_eq!(user.name, "Ava Jones");
    assert!(ctx.state.session().current_user().await.is_some());
}

#[tokio::test]
async fn test_second_signup_with_same_email_is_refused() {
    let ctx = signed_up_context().await;

    let err = ctx
        .state
        .session()
        .sign_up("ava@example.com", "new-password", "Somebody Else")
        .await
        .expect_err("signup with the stored email should be refused");
    assert!(matches!(err, SessionError::EmailTaken));

    // The original password still works.
    let outcome = gate(&ctx).attempt("ava@example.com", "hunter2").await;
    assert!(matches!(outcome, LoginOutcome::Success(_)));
}

// ============================================================================
// Lockout
// ============================================================================

#[tokio::test]
async fn test_five_failures_lock_the_account() {
    let ctx = signed_up_context().await;
    let mut gate = gate(&ctx);

    fail_times(&mut gate, 4).await;

    let outcome = gate.attempt("ava@example.com", "wrong-password").await;
    let LoginOutcome::Denied {
        failures: 5,
        locked_out: Some(remaining),
    } = outcome
    else {
        panic!("fifth failure should engage the lockout, got {outcome:?}");
    };
    assert_eq!(remaining.as_duration(), LOCKOUT_DURATION);

    // Signup (500ms) plus five real login attempts (500ms each); the
    // clock accounts for every simulated round trip so far.
    assert_eq!(
        ctx.clock.now_utc().timestamp_millis(),
        TEST_EPOCH_MILLIS + 3_000
    );

    // The right password is now rejected up front, without touching the
    // store or spending latency.
    let before = ctx.clock.now_utc();
    let outcome = gate.attempt("ava@example.com", "hunter2").await;
    assert!(matches!(outcome, LoginOutcome::Locked { .. }));
    assert_eq!(ctx.clock.now_utc(), before);
}

#[tokio::test]
async fn test_lockout_expires_after_fifteen_minutes() {
    let ctx = signed_up_context().await;
    let mut gate = gate(&ctx);
    fail_times(&mut gate, 5).await;

    ctx.clock.advance(LOCKOUT_DURATION);

    let outcome = gate.attempt("ava@example.com", "hunter2").await;
    assert!(matches!(outcome, LoginOutcome::Success(_)));
}

#[tokio::test]
async fn test_lockout_does_not_survive_a_relaunch() {
    let ctx = signed_up_context().await;
    let mut gate_one = gate(&ctx);
    fail_times(&mut gate_one, 5).await;

    // The limiter lives with the screen; a fresh launch starts clean even
    // though no time passed.
    let relaunched = ctx.relaunch();
    let outcome = gate(&relaunched).attempt("ava@example.com", "hunter2").await;
    assert!(matches!(outcome, LoginOutcome::Success(_)));
}

// ============================================================================
// Session Restore
// ============================================================================

#[tokio::test]
async fn test_session_survives_a_relaunch() {
    let ctx = TestContext::new();
    ctx.state
        .session()
        .sign_up("ava@example.com", "hunter2", "Ava Jones")
        .await
        .expect("signup should succeed on empty storage");

    let relaunched = ctx.relaunch();
    assert!(relaunched.state.session().current_user().await.is_none());

    let user = relaunched
        .state
        .session()
        .restore_session()
        .await
        .expect("the persisted session should restore");
    assert_eq!(user.email.as_str(), "ava@example.com");
    assert_eq!(
        relaunched.state.session().current_user().await,
        Some(user)
    );
}

#[tokio::test]
async fn test_logout_ends_the_session_for_future_launches() {
    let ctx = TestContext::new();
    ctx.state
        .session()
        .sign_up("ava@example.com", "hunter2", "Ava Jones")
        .await
        .expect("signup should succeed on empty storage");

    let second = ctx.relaunch();
    second
        .state
        .session()
        .restore_session()
        .await
        .expect("the persisted session should restore");
    second.state.session().log_out().await;

    let third = ctx.relaunch();
    assert_eq!(third.state.session().restore_session().await, None);

    // Logging out kept the account: the credentials still work.
    let outcome = gate(&third).attempt("ava@example.com", "hunter2").await;
    assert!(matches!(outcome, LoginOutcome::Success(_)));
}
