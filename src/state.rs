//! User state container.
//!
//! Starts anonymous; becomes authenticated only through a successful
//! validation. The session guard is the single writer; everything else
//! reads.

use tracing::debug;

use crate::claims::Claims;

/// Snapshot of the current identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    claims: Option<Claims>,
}

impl UserState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.claims.is_some()
    }

    /// Claims of the authenticated user, `None` while anonymous.
    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }
}

/// Commands accepted by [`UserStateStore::dispatch`].
#[derive(Debug, Clone)]
pub enum UserCommand {
    Adopt(Claims),
    ResetToAnonymous,
}

/// Single-writer state container; mutations apply synchronously and are
/// visible on the next read.
#[derive(Debug, Default)]
pub struct UserStateStore {
    state: UserState,
}

impl UserStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UserState {
        &self.state
    }

    pub fn dispatch(&mut self, command: UserCommand) {
        match command {
            UserCommand::Adopt(claims) => {
                debug!(sub = claims.sub.as_deref(), "adopting authenticated user");
                self.state.claims = Some(claims);
            }
            UserCommand::ResetToAnonymous => {
                debug!("resetting user state to anonymous");
                self.state.claims = None;
            }
        }
    }
}
