//! Session and credential management.
//!
//! The storefront simulates accounts entirely on-device. Signup writes a
//! single credential record to key-value storage, login compares against it,
//! and the authenticated identity is mirrored under its own key so the app
//! can restore the session at the next launch. A fixed artificial delay
//! stands in for the network round trip a real backend would cost.
//!
//! Exactly one account exists at a time: signing up with a new email
//! replaces the old record, and signing up with the stored email is refused.
//!
//! The credential record is persisted as plaintext JSON. That is the
//! documented contract of this demo (the store file is inspectable fixture
//! data), not an oversight; see `DESIGN.md`. In memory the password rides in
//! a [`SecretString`] so a stray `Debug` never prints it.
//!
//! Login throttling lives in [`limiter`]; [`gate`] wires the limiter in
//! front of the store the way the login screen does.

mod error;
pub mod gate;
pub mod limiter;

pub use error::SessionError;

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tokio::sync::{RwLock, watch};
use tracing::{info, instrument, warn};

use cartwheel_core::{Email, UserId};

use crate::clock::Clock;
use crate::storage::{Storage, StorageError};

/// Simulated network round trip for signup and login.
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(500);

/// Storage keys owned by the session store.
pub mod keys {
    /// Key for the single stored account (the credential record).
    pub const CREDENTIALS: &str = "credentials";

    /// Key for the persisted session mirror (password-free).
    pub const USER: &str = "user";
}

/// The single stored account.
///
/// Persists as `{"email": ..., "password": ..., "name": ...}` under
/// [`keys::CREDENTIALS`]. The name is stored exactly as entered at signup,
/// blanks included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Account email; login matches it byte-for-byte.
    pub email: Email,
    /// Plaintext password, redacted from `Debug` but not from the store.
    #[serde(
        serialize_with = "serialize_password",
        deserialize_with = "deserialize_password"
    )]
    pub password: SecretString,
    /// Display name as entered at signup (may be empty).
    pub name: String,
}

fn serialize_password<S: Serializer>(
    password: &SecretString,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.expose_secret())
}

fn deserialize_password<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

/// The authenticated identity exposed to the screens.
///
/// Never carries the password; this is also the shape mirrored under
/// [`keys::USER`] for session restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Always the local sentinel ID.
    pub id: UserId,
    /// Account email.
    pub email: Email,
    /// Resolved display name.
    pub name: String,
}

/// Owns the single local account and the in-memory session.
///
/// Construct one per app launch with injected storage and clock. The service
/// is the only writer of the two storage keys it owns; the login
/// [`gate::LoginGate`] sits in front of [`log_in`](Self::log_in) when
/// throttling is wanted.
pub struct SessionService {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
    current: RwLock<Option<SessionUser>>,
    loading: watch::Sender<bool>,
}

impl SessionService {
    /// Create a service over the given backends. No I/O happens here; call
    /// [`restore_session`](Self::restore_session) to rehydrate state.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            storage,
            clock,
            current: RwLock::new(None),
            loading,
        }
    }

    /// Whether an auth operation is in flight.
    ///
    /// Screens subscribe and disable their submit buttons while the value is
    /// `true`; it flips back to `false` when the operation resolves either
    /// way.
    #[must_use]
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// The authenticated user, if any.
    pub async fn current_user(&self) -> Option<SessionUser> {
        self.current.read().await.clone()
    }

    // =========================================================================
    // Account Lifecycle
    // =========================================================================

    /// Create the local account and sign in as it.
    ///
    /// Replaces any previously stored account with a different email. The
    /// name is taken verbatim; an empty name stays empty until login falls
    /// back to the email's local part.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidEmail` if the email fails structural
    /// validation, `SessionError::EmailTaken` if the stored account already
    /// uses this email, and `SessionError::Storage` if the credential record
    /// cannot be written.
    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<SessionUser, SessionError> {
        let _busy = self.busy();
        let email = Email::parse(email)?;
        self.clock.sleep(SIMULATED_LATENCY).await;

        if let Some(existing) = self.read_credentials().await {
            if existing.email == email {
                return Err(SessionError::EmailTaken);
            }
        }

        let record = CredentialRecord {
            email: email.clone(),
            password: SecretString::from(password.to_owned()),
            name: name.to_owned(),
        };
        self.write_credentials(&record).await?;

        let user = SessionUser {
            id: UserId::local(),
            email,
            name: name.to_owned(),
        };
        self.set_session(user.clone()).await;
        info!(email = %user.email, "account created");
        Ok(user)
    }

    /// Sign in against the stored account.
    ///
    /// Email and password must match the record exactly (case-sensitive). If
    /// the stored name is empty, the returned user's name falls back to the
    /// email's local part.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidEmail` for structurally invalid input
    /// and `SessionError::InvalidCredentials` when there is no stored
    /// account or the record does not match. An unreadable store also reads
    /// as `InvalidCredentials`.
    #[instrument(skip(self, password))]
    pub async fn log_in(&self, email: &str, password: &str) -> Result<SessionUser, SessionError> {
        let _busy = self.busy();
        let email = Email::parse(email)?;
        self.clock.sleep(SIMULATED_LATENCY).await;

        let Some(record) = self.read_credentials().await else {
            return Err(SessionError::InvalidCredentials);
        };
        if record.email != email || record.password.expose_secret() != password {
            return Err(SessionError::InvalidCredentials);
        }

        let name = if record.name.is_empty() {
            email.local_part().to_owned()
        } else {
            record.name.clone()
        };
        let user = SessionUser {
            id: UserId::local(),
            email,
            name,
        };
        self.set_session(user.clone()).await;
        info!(email = %user.email, "logged in");
        Ok(user)
    }

    /// Sign out.
    ///
    /// Clears the in-memory session and the persisted mirror. The credential
    /// record stays, so the account can log back in. Never fails: a storage
    /// error here is logged, and the next launch simply restores a session
    /// the user meant to end.
    #[instrument(skip(self))]
    pub async fn log_out(&self) {
        *self.current.write().await = None;
        if let Err(error) = self.storage.remove(keys::USER).await {
            warn!(%error, "failed to remove persisted session");
        }
        info!("logged out");
    }

    /// Rehydrate the persisted session at launch.
    ///
    /// Fails open: a missing key, an unreadable store, or a malformed blob
    /// all read as "nobody logged in". Startup must never be blocked on
    /// session state.
    #[instrument(skip(self))]
    pub async fn restore_session(&self) -> Option<SessionUser> {
        let raw = match self.storage.get(keys::USER).await {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, "failed to read persisted session");
                return None;
            }
        };
        match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) => {
                *self.current.write().await = Some(user.clone());
                info!(email = %user.email, "session restored");
                Some(user)
            }
            Err(error) => {
                warn!(%error, "persisted session is malformed, treating as logged out");
                None
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn busy(&self) -> BusyGuard<'_> {
        self.loading.send_replace(true);
        BusyGuard(&self.loading)
    }

    /// Read the stored account. Storage failures and malformed records read
    /// as "no account", with a log line; login then reports plain invalid
    /// credentials rather than leaking store internals.
    async fn read_credentials(&self) -> Option<CredentialRecord> {
        let raw = match self.storage.get(keys::CREDENTIALS).await {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, "failed to read stored credentials");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(%error, "stored credential record is malformed");
                None
            }
        }
    }

    async fn write_credentials(&self, record: &CredentialRecord) -> Result<(), SessionError> {
        let raw = serde_json::to_string(record).map_err(StorageError::Format)?;
        self.storage.set(keys::CREDENTIALS, &raw).await?;
        Ok(())
    }

    /// Install the in-memory session and persist the mirror. The two writes
    /// are not transactional: if the mirror write fails the user stays
    /// signed in for this launch and only restore-on-next-launch is lost.
    async fn set_session(&self, user: SessionUser) {
        match serde_json::to_string(&user) {
            Ok(raw) => {
                if let Err(error) = self.storage.set(keys::USER, &raw).await {
                    warn!(%error, "failed to persist session mirror");
                }
            }
            Err(error) => warn!(%error, "failed to serialize session mirror"),
        }
        *self.current.write().await = Some(user);
    }
}

/// Flips the loading flag back to `false` when the operation resolves,
/// including on early returns.
struct BusyGuard<'a>(&'a watch::Sender<bool>);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}
