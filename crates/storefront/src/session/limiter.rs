//! Consecutive-failure login throttling.
//!
//! Five wrong passwords in a row lock the login screen for fifteen minutes.
//! The counter lives only in memory, so restarting the app clears it: this
//! is UX friction against careless retries, not a security control, and the
//! stored credentials are plaintext anyway.
//!
//! [`AttemptLimiter`] is a pure state machine. Every method takes `now` from
//! the caller, which keeps it trivially testable and leaves clock ownership
//! with the login gate. The authoritative unlock check is the wall-clock
//! comparison in [`AttemptLimiter::status`]; the login screen re-runs it
//! about once a second while locked to feed its countdown.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Consecutive failed attempts before the lockout engages.
pub const MAX_FAILED_ATTEMPTS: u32 = 5;

/// How long the lockout lasts once engaged.
pub const LOCKOUT_DURATION: Duration = Duration::from_secs(15 * 60);

/// Time left in a lockout window, in display-friendly forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutRemaining(Duration);

impl LockoutRemaining {
    /// Exact remaining time.
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        self.0
    }

    /// Exact milliseconds, for a live countdown.
    #[must_use]
    pub fn as_millis(&self) -> u64 {
        u64::try_from(self.0.as_millis()).unwrap_or(u64::MAX)
    }

    /// Whole minutes, rounded up, for the "try again in N minutes" message.
    ///
    /// Any nonzero remainder counts as a full minute, so the message never
    /// promises an unlock that has not happened yet.
    #[must_use]
    pub fn display_minutes(&self) -> u64 {
        self.as_millis().div_ceil(60_000)
    }
}

/// Where the limiter stands at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimiterStatus {
    /// Attempts are allowed; `failures` consecutive failures so far.
    Open {
        /// Consecutive failures recorded since the last reset.
        failures: u32,
    },
    /// Attempts are rejected until `remaining` elapses.
    Locked {
        /// Time left before attempts are allowed again.
        remaining: LockoutRemaining,
    },
}

/// Tracks consecutive failed logins and enforces the timed lockout.
#[derive(Debug, Clone, Default)]
pub struct AttemptLimiter {
    failures: u32,
    blocked_until: Option<DateTime<Utc>>,
}

impl AttemptLimiter {
    /// A fresh limiter: zero failures, unlocked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status at `now`, applying lazy lockout expiry.
    ///
    /// The first call at or past the lockout deadline flips the limiter back
    /// to open and clears the failure count; there is no timer to cancel
    /// because there never was one.
    pub fn status(&mut self, now: DateTime<Utc>) -> LimiterStatus {
        if let Some(until) = self.blocked_until {
            if now < until {
                let remaining = (until - now).to_std().unwrap_or_default();
                return LimiterStatus::Locked {
                    remaining: LockoutRemaining(remaining),
                };
            }
            self.failures = 0;
            self.blocked_until = None;
        }
        LimiterStatus::Open {
            failures: self.failures,
        }
    }

    /// Record a failed attempt and return the resulting status.
    ///
    /// The attempt that reaches [`MAX_FAILED_ATTEMPTS`] engages the lockout
    /// immediately. A failure recorded while already locked changes nothing;
    /// in particular it does not extend the window.
    pub fn record_failure(&mut self, now: DateTime<Utc>) -> LimiterStatus {
        if let locked @ LimiterStatus::Locked { .. } = self.status(now) {
            return locked;
        }
        self.failures += 1;
        if self.failures >= MAX_FAILED_ATTEMPTS {
            self.blocked_until = Some(now + LOCKOUT_DURATION);
            return LimiterStatus::Locked {
                remaining: LockoutRemaining(LOCKOUT_DURATION),
            };
        }
        LimiterStatus::Open {
            failures: self.failures,
        }
    }

    /// Record a successful attempt: the count resets wherever it stood.
    pub fn record_success(&mut self) {
        self.failures = 0;
        self.blocked_until = None;
    }
}
