//! Credential persistence.
//!
//! One credential, one storage key, two backing locations: a durable
//! cookie jar and a volatile session store. Reads prefer the durable
//! entry; writes land in both so a cleared jar still leaves the
//! page-lifetime fallback usable.

mod cookie;
mod session;

pub use cookie::{CookieJar, CookieOptions};
pub use session::SessionStore;

use tracing::warn;

use crate::credential::Credential;
use crate::error::StoreError;

/// Storage key for the current credential in both locations.
pub const USER_INFO_KEY: &str = "userInfo";

/// Composed credential storage over the durable jar and the volatile
/// session store.
#[derive(Debug)]
pub struct CredentialStore {
    cookies: CookieJar,
    session: SessionStore,
}

impl CredentialStore {
    pub fn new(cookies: CookieJar) -> Self {
        Self { cookies, session: SessionStore::new() }
    }

    /// Reads the current credential: durable storage first, volatile as
    /// fallback. An entry that fails to parse is reported and treated as
    /// absent.
    pub fn get(&self) -> Option<Credential> {
        let raw = self
            .cookies
            .get(USER_INFO_KEY)
            .or_else(|| self.session.get(USER_INFO_KEY))?;

        match serde_json::from_str(raw) {
            Ok(credential) => Some(credential),
            Err(err) => {
                warn!(error = %err, "stored credential is not parseable, treating as absent");
                None
            }
        }
    }

    /// Writes the credential to durable storage with the caller-supplied
    /// scope options and mirrors it to volatile storage. Complete once
    /// this returns; readers never observe a half-written state.
    pub fn set(&mut self, credential: &Credential, options: &CookieOptions) -> Result<(), StoreError> {
        let raw = serde_json::to_string(credential)?;
        self.cookies.set(USER_INFO_KEY, &raw, options)?;
        self.session.set(USER_INFO_KEY, &raw);
        Ok(())
    }

    /// Clears the credential from both locations. Idempotent. The
    /// volatile entry goes away even when the durable backend errors;
    /// that error is still reported.
    pub fn remove(&mut self) -> Result<(), StoreError> {
        let durable = self.cookies.remove(USER_INFO_KEY);
        self.session.remove(USER_INFO_KEY);
        durable
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.get(USER_INFO_KEY).is_none() && self.session.get(USER_INFO_KEY).is_none()
    }
}
