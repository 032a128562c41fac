//! Account and session commands.
//!
//! # Usage
//!
//! ```bash
//! # Create the local account and sign in
//! cartwheel auth signup -e ava@example.com -p hunter2 -n "Ava Jones"
//!
//! # Log in as the stored account
//! cartwheel auth login -e ava@example.com -p hunter2
//!
//! # Show who is logged in
//! cartwheel auth status
//!
//! # Log out
//! cartwheel auth logout
//! ```
//!
//! Login runs through the attempt limiter, so hammering wrong passwords in a
//! loop inside one process engages the lockout exactly like the login screen.
//! The limiter state is in-memory only; a new invocation starts fresh.

use std::sync::Arc;

use thiserror::Error;

use cartwheel_storefront::session::gate::{LoginGate, LoginOutcome};
use cartwheel_storefront::session::limiter::MAX_FAILED_ATTEMPTS;
use cartwheel_storefront::session::{SessionError, SessionUser};
use cartwheel_storefront::state::AppState;

/// Errors that can occur during account commands.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credentials rejected by the store.
    #[error("invalid credentials ({failures} of {} attempts used)", MAX_FAILED_ATTEMPTS)]
    Denied {
        /// Consecutive failures this launch, including this one.
        failures: u32,
    },

    /// The attempt limiter is engaged.
    #[error("too many failed attempts, try again in {minutes} minute(s)")]
    Locked {
        /// Minutes left on the lockout, rounded up.
        minutes: u64,
    },

    /// Validation or storage failure from the session layer.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Create the local account and sign in as it.
pub async fn signup(
    state: &AppState,
    email: &str,
    password: &str,
    name: &str,
) -> Result<(), AuthError> {
    let user = state.session().sign_up(email, password, name).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Account created. Logged in as {}.", describe(&user));
    }
    Ok(())
}

/// Log in as the stored account, through the attempt limiter.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<(), AuthError> {
    let mut gate = LoginGate::new(Arc::clone(state.session()), state.clock());

    match gate.attempt(email, password).await {
        LoginOutcome::Success(user) => {
            #[allow(clippy::print_stdout)]
            {
                println!("Logged in as {}.", describe(&user));
            }
            Ok(())
        }
        LoginOutcome::Denied {
            locked_out: Some(remaining),
            ..
        }
        | LoginOutcome::Locked { remaining } => Err(AuthError::Locked {
            minutes: remaining.display_minutes(),
        }),
        LoginOutcome::Denied { failures, .. } => Err(AuthError::Denied { failures }),
        LoginOutcome::Error(error) => Err(error.into()),
    }
}

/// End the persisted session. Keeps the stored account.
pub async fn logout(state: &AppState) {
    if state.session().restore_session().await.is_none() {
        #[allow(clippy::print_stdout)]
        {
            println!("Nobody is logged in.");
        }
        return;
    }

    state.session().log_out().await;
    #[allow(clippy::print_stdout)]
    {
        println!("Logged out.");
    }
}

/// Show who is logged in, if anyone.
pub async fn status(state: &AppState) {
    let user = state.session().restore_session().await;

    #[allow(clippy::print_stdout)]
    {
        match user {
            Some(user) => println!("Logged in as {}.", describe(&user)),
            None => println!("Nobody is logged in."),
        }
    }
}

/// "Name <email>", or just the email for accounts without a name.
fn describe(user: &SessionUser) -> String {
    if user.name.is_empty() {
        user.email.to_string()
    } else {
        format!("{} <{}>", user.name, user.email)
    }
}
