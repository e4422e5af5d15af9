//! Session guard: the one place that decides whether a stored credential
//! is still good, and the only writer of the user state store.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, instrument, warn};

use crate::claims::{Claims, decode_token};
use crate::credential::Credential;
use crate::error::{SessionError, StoreError};
use crate::notify::{Navigator, Notice, Notifier};
use crate::routes::LOGIN_ROUTE;
use crate::state::{UserCommand, UserState, UserStateStore};
use crate::store::{CookieOptions, CredentialStore};

/// Alert copy for a missing credential.
pub const NOT_LOGGED_IN_MESSAGE: &str = "You are not logged in. Please log in.";
/// Alert copy for a present-but-expired credential.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in.";

/// Outcome of a single validation pass.
///
/// Produced fresh on every call; never cached, since the wall clock moves
/// between calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid(Claims),
    Expired,
    Absent,
}

fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Owns the credential store and the user state store, and mediates every
/// transition between them. Mutation is serialized by `&mut self`; there
/// is exactly one guard per process.
pub struct SessionGuard {
    store: CredentialStore,
    user_state: UserStateStore,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl SessionGuard {
    pub fn new(
        store: CredentialStore,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self { store, user_state: UserStateStore::new(), notifier, navigator }
    }

    pub fn user_state(&self) -> &UserState {
        self.user_state.state()
    }

    pub fn credential_store(&self) -> &CredentialStore {
        &self.store
    }

    /// Checks the stored credential against the current time.
    ///
    /// A token that fails to decode counts as expired: a malformed
    /// credential is never silently trusted.
    fn validate(&self) -> Validation {
        let Some(credential) = self.store.get() else {
            return Validation::Absent;
        };

        let token = credential.access_token.trim();
        if token.is_empty() {
            return Validation::Absent;
        }

        match decode_token(token) {
            Ok(claims) => {
                if now_millis() < claims.exp_millis() {
                    Validation::Valid(claims)
                } else {
                    debug!("credential past its expiry");
                    Validation::Expired
                }
            }
            Err(err) => {
                warn!(error = %err, "credential token failed to decode, treating as expired");
                Validation::Expired
            }
        }
    }

    /// Active validation, run when a protected route is entered.
    ///
    /// On success the user state adopts the claims and nothing else
    /// happens. On failure the credential is cleared, the state resets to
    /// anonymous, and the user is alerted and sent to the login route once
    /// they acknowledge the message.
    #[instrument(skip(self))]
    pub async fn authorize(&mut self) -> Validation {
        let validation = self.validate();
        match &validation {
            Validation::Valid(claims) => self.adopt(claims.clone()),
            Validation::Expired => self.deny(SESSION_EXPIRED_MESSAGE).await,
            Validation::Absent => self.deny(NOT_LOGGED_IN_MESSAGE).await,
        }
        validation
    }

    /// Passive validation, run once at process start to hydrate the user
    /// state from whatever credential survived.
    ///
    /// An absent credential resolves silently to anonymous; public pages
    /// must not nag. A credential that is present but expired gets the
    /// same alert and redirect as the active path.
    #[instrument(skip(self))]
    pub async fn hydrate(&mut self) -> Validation {
        let validation = self.validate();
        match &validation {
            Validation::Valid(claims) => self.adopt(claims.clone()),
            Validation::Expired => self.deny(SESSION_EXPIRED_MESSAGE).await,
            Validation::Absent => self.user_state.dispatch(UserCommand::ResetToAnonymous),
        }
        validation
    }

    /// Login bookkeeping: persists a freshly issued credential with the
    /// caller's scope options and adopts its claims.
    ///
    /// The token is decoded before anything is written, so storage and
    /// user state can never disagree about it.
    #[instrument(skip_all)]
    pub fn establish(
        &mut self,
        credential: Credential,
        options: &CookieOptions,
    ) -> Result<(), SessionError> {
        let claims = decode_token(&credential.access_token)?;
        self.store.set(&credential, options)?;
        self.adopt(claims);
        Ok(())
    }

    /// Explicit logout: clears storage and resets to anonymous.
    ///
    /// The state resets even when the storage write fails; the error is
    /// still returned so the caller can surface a warning.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Result<(), StoreError> {
        let result = self.store.remove();
        self.user_state.dispatch(UserCommand::ResetToAnonymous);
        result
    }

    fn adopt(&mut self, claims: Claims) {
        self.user_state.dispatch(UserCommand::Adopt(claims));
    }

    async fn deny(&mut self, message: &str) {
        if let Err(err) = self.store.remove() {
            warn!(error = %err, "failed to clear credential storage");
        }
        self.user_state.dispatch(UserCommand::ResetToAnonymous);
        // The user has to see the message before the route changes.
        self.notifier.alert(Notice::message(message)).await;
        self.navigator.push(LOGIN_ROUTE);
    }
}
