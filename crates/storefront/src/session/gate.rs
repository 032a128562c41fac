//! Login flow coordination.
//!
//! What the login screen actually does: consult the limiter first, only then
//! the credential store, and feed the result back into the limiter. While
//! the lockout is in effect the store is never consulted, so a locked
//! attempt costs no simulated latency and no storage traffic.

use std::sync::Arc;

use tracing::{info, warn};

use super::limiter::{AttemptLimiter, LimiterStatus, LockoutRemaining, MAX_FAILED_ATTEMPTS};
use super::{SessionError, SessionService, SessionUser};
use crate::clock::Clock;

/// Outcome of one gated login attempt.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Authenticated. The failure count was reset.
    Success(SessionUser),
    /// Credentials rejected and the failure recorded. `locked_out` is set
    /// when this very attempt engaged the lockout.
    Denied {
        /// Consecutive failures including this one.
        failures: u32,
        /// Present when this attempt tripped the limit.
        locked_out: Option<LockoutRemaining>,
    },
    /// Rejected up front: the lockout is in effect and the store was never
    /// consulted.
    Locked {
        /// Time left before attempts are allowed again.
        remaining: LockoutRemaining,
    },
    /// The attempt failed for a reason that does not count against the
    /// caller: malformed email input or a storage fault.
    Error(SessionError),
}

/// Serializes login attempts for one login screen.
///
/// Owns the [`AttemptLimiter`] for the lifetime of the screen. Like the
/// limiter itself, the gate is transient; a fresh app launch starts with a
/// clean slate.
pub struct LoginGate {
    service: Arc<SessionService>,
    clock: Arc<dyn Clock>,
    limiter: AttemptLimiter,
}

impl LoginGate {
    /// Create a gate in front of `service`.
    #[must_use]
    pub fn new(service: Arc<SessionService>, clock: Arc<dyn Clock>) -> Self {
        Self {
            service,
            clock,
            limiter: AttemptLimiter::new(),
        }
    }

    /// Current limiter status. The login screen polls this about once a
    /// second while locked to drive its countdown label.
    pub fn status(&mut self) -> LimiterStatus {
        self.limiter.status(self.clock.now_utc())
    }

    /// Run one login attempt through the limiter.
    pub async fn attempt(&mut self, email: &str, password: &str) -> LoginOutcome {
        if let LimiterStatus::Locked { remaining } = self.limiter.status(self.clock.now_utc()) {
            info!(
                minutes = remaining.display_minutes(),
                "login rejected, lockout in effect"
            );
            return LoginOutcome::Locked { remaining };
        }

        match self.service.log_in(email, password).await {
            Ok(user) => {
                self.limiter.record_success();
                LoginOutcome::Success(user)
            }
            Err(SessionError::InvalidCredentials) => {
                match self.limiter.record_failure(self.clock.now_utc()) {
                    LimiterStatus::Locked { remaining } => {
                        warn!(
                            attempts = MAX_FAILED_ATTEMPTS,
                            "too many failed logins, lockout engaged"
                        );
                        LoginOutcome::Denied {
                            failures: MAX_FAILED_ATTEMPTS,
                            locked_out: Some(remaining),
                        }
                    }
                    LimiterStatus::Open { failures } => LoginOutcome::Denied {
                        failures,
                        locked_out: None,
                    },
                }
            }
            Err(other) => LoginOutcome::Error(other),
        }
    }
}
