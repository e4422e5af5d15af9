use std::env;

/// Cookie domain used in local development.
pub const LOCAL_COOKIE_DOMAIN: &str = "localhost";

/// Explicit host-environment input for the credential storage scope.
///
/// Replaces the implicit "am I on localhost?" URL sniffing of a browser
/// host: callers state up front whether they run locally and which domain
/// durable cookies are scoped to.
#[derive(Debug, Clone)]
pub struct Environment {
    pub is_local: bool,
    pub cookie_domain: String,
}

impl Environment {
    pub fn new(is_local: bool, cookie_domain: impl Into<String>) -> Self {
        Self { is_local, cookie_domain: cookie_domain.into() }
    }

    /// Local development environment with the `localhost` sentinel domain.
    pub fn local() -> Self {
        Self::new(true, LOCAL_COOKIE_DOMAIN)
    }

    /// Reads `COOKIE_DOMAIN`; when unset or empty, falls back to local
    /// development.
    pub fn from_env() -> Self {
        match env::var("COOKIE_DOMAIN") {
            Ok(domain) if !domain.is_empty() => Self::new(false, domain),
            _ => Self::local(),
        }
    }

    /// Domain to scope durable cookie writes to.
    pub fn cookie_domain(&self) -> &str {
        if self.is_local { LOCAL_COOKIE_DOMAIN } else { &self.cookie_domain }
    }
}
