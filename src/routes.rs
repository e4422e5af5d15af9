//! Route protection policy and the navigation hook that drives the
//! session guard.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::guard::{SessionGuard, Validation};

/// Destination for unauthenticated or expired sessions.
pub const LOGIN_ROUTE: &str = "/user/user-login";
/// The board listing, the one protected route in the default policy.
pub const BOARD_LIST_ROUTE: &str = "/board/board-list";

/// Static, read-only set of paths that require a valid credential.
///
/// Matching is exact-string: `/board/board-list/extra` is not protected
/// when only `/board/board-list` is configured.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    protected: HashSet<String>,
}

impl RoutePolicy {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { protected: paths.into_iter().map(Into::into).collect() }
    }

    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.contains(path)
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::new([BOARD_LIST_ROUTE])
    }
}

/// Watches navigation and asks the session guard to validate when a
/// protected destination is entered.
pub struct RouteGuard {
    policy: RoutePolicy,
    session: SessionGuard,
}

impl RouteGuard {
    pub fn new(policy: RoutePolicy, session: SessionGuard) -> Self {
        Self { policy, session }
    }

    pub fn session(&self) -> &SessionGuard {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionGuard {
        &mut self.session
    }

    /// Reacts to a navigation-target change. Protected destinations run
    /// the active validation; everything else passes through untouched.
    #[instrument(skip(self))]
    pub async fn on_navigate(&mut self, path: &str) -> Option<Validation> {
        if self.policy.is_protected(path) {
            Some(self.session.authorize().await)
        } else {
            debug!(path, "route is not protected, skipping validation");
            None
        }
    }

    /// Runs the passive load-time validation once, regardless of route,
    /// to hydrate the user state from any surviving credential.
    #[instrument(skip(self))]
    pub async fn on_load(&mut self) -> Validation {
        self.session.hydrate().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;
    use time::{Duration, OffsetDateTime};

    use super::*;
    use crate::credential::Credential;
    use crate::notify::{Dismissed, Navigator, Notice, Notifier};
    use crate::store::{CookieJar, CookieOptions, CredentialStore};

    #[derive(Default)]
    struct RecordingNotifier {
        alerts: Mutex<Vec<Notice>>,
    }

    #[async_trait::async_trait]
    impl Notifier for RecordingNotifier {
        async fn alert(&self, notice: Notice) {
            self.alerts.lock().unwrap().push(notice);
        }

        async fn confirm(&self, notice: Notice) -> Result<(), Dismissed> {
            self.alerts.lock().unwrap().push(notice);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        pushes: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn push(&self, path: &str) {
            self.pushes.lock().unwrap().push(path.to_owned());
        }
    }

    fn guard_with(credential: Option<Credential>) -> (RouteGuard, Arc<RecordingNotifier>) {
        let mut store = CredentialStore::new(CookieJar::in_memory());
        if let Some(credential) = credential {
            let options = CookieOptions::new("localhost", "/", Duration::hours(1));
            store.set(&credential, &options).unwrap();
        }
        let notifier = Arc::new(RecordingNotifier::default());
        let session =
            SessionGuard::new(store, notifier.clone(), Arc::new(RecordingNavigator::default()));
        (RouteGuard::new(RoutePolicy::default(), session), notifier)
    }

    fn future_token() -> String {
        let exp = OffsetDateTime::now_utc().unix_timestamp() + 3600;
        encode(
            &Header::default(),
            &json!({"sub": "user-7", "exp": exp}),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn matching_is_exact_not_prefix() {
        let policy = RoutePolicy::default();
        assert!(policy.is_protected("/board/board-list"));
        assert!(!policy.is_protected("/board/board-list/extra"));
        assert!(!policy.is_protected("/board"));
        assert!(!policy.is_protected("/user/user-login"));
    }

    #[test]
    fn custom_policy_paths() {
        let policy = RoutePolicy::new(["/member/memberlist"]);
        assert!(policy.is_protected("/member/memberlist"));
        assert!(!policy.is_protected(BOARD_LIST_ROUTE));
    }

    #[tokio::test]
    async fn navigation_to_protected_route_validates() {
        let (mut guard, _) = guard_with(Some(Credential::new(future_token())));

        let outcome = guard.on_navigate(BOARD_LIST_ROUTE).await;

        assert!(matches!(outcome, Some(Validation::Valid(_))));
        assert!(guard.session().user_state().is_authenticated());
    }

    #[tokio::test]
    async fn navigation_to_unprotected_route_is_a_no_op() {
        let (mut guard, notifier) = guard_with(None);

        let outcome = guard.on_navigate("/board/board-detail").await;

        assert!(outcome.is_none());
        assert!(notifier.alerts.lock().unwrap().is_empty());
        assert!(!guard.session().user_state().is_authenticated());
    }

    #[tokio::test]
    async fn load_hydrates_state_on_any_route() {
        let (mut guard, notifier) = guard_with(Some(Credential::new(future_token())));

        let validation = guard.on_load().await;

        assert!(matches!(validation, Validation::Valid(_)));
        assert!(guard.session().user_state().is_authenticated());
        assert!(notifier.alerts.lock().unwrap().is_empty());
    }
}
