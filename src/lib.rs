//! Client-side session guard for the board application.
//!
//! Consumes an already-issued bearer token, enforces client-side expiry,
//! and keeps a single user-state store in sync. Token issuance, signature
//! verification and the UI itself live elsewhere; this crate decides
//! *when* a session is good and *what* happens when it is not.
//!
//! # Overview
//!
//! - **Token decoding**: [`decode_token`] unpacks a compact token's
//!   payload without verifying its signature (trust-the-issuer).
//! - **Credential storage**: [`CredentialStore`] keeps the `userInfo`
//!   entry in a durable [`CookieJar`] mirrored by a volatile
//!   [`SessionStore`].
//! - **Session guard**: [`SessionGuard`] validates the stored credential
//!   against the wall clock and drives alert + redirect on failure.
//! - **Route guard**: [`RouteGuard`] runs the active check on protected
//!   routes and the passive hydration at load time.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use boardgate::{
//!     CookieJar, CredentialStore, ModalNotifier, Navigator, RouteGuard, RoutePolicy,
//!     SessionGuard,
//! };
//!
//! struct HostRouter;
//!
//! impl Navigator for HostRouter {
//!     fn push(&self, path: &str) {
//!         println!("navigate to {path}");
//!     }
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CredentialStore::new(CookieJar::open("cookies.json")?);
//! let notifier = Arc::new(ModalNotifier::new());
//! let session = SessionGuard::new(store, notifier.clone(), Arc::new(HostRouter));
//! let mut routes = RouteGuard::new(RoutePolicy::default(), session);
//!
//! routes.on_load().await;
//! let _ = routes.on_navigate("/board/board-list").await;
//! # Ok(())
//! # }
//! ```

mod claims;
mod config;
mod credential;
mod error;
mod guard;
mod notify;
mod routes;
mod state;
mod store;

pub use claims::{Claims, decode_token};
pub use config::{Environment, LOCAL_COOKIE_DOMAIN};
pub use credential::Credential;
pub use error::{DecodeError, SessionError, StoreError};
pub use guard::{
    NOT_LOGGED_IN_MESSAGE, SESSION_EXPIRED_MESSAGE, SessionGuard, Validation,
};
pub use notify::{Dismissed, ModalNotifier, Navigator, Notice, Notifier, PendingModal};
pub use routes::{BOARD_LIST_ROUTE, LOGIN_ROUTE, RouteGuard, RoutePolicy};
pub use state::{UserCommand, UserState, UserStateStore};
pub use store::{CookieJar, CookieOptions, CredentialStore, SessionStore, USER_INFO_KEY};
