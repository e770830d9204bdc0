//! Login state, passed around explicitly instead of living in a global.

use crate::error::{RsvpError, RsvpResult};
use crate::store::Store;
use crate::user::SessionUser;
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated(SessionUser),
}

pub struct Session {
    store: Store,
    state: AuthState,
}

impl Session {
    /// Pick up a previously persisted login.
    ///
    /// The stored record is trusted as-is: it is not checked against the
    /// user collection, so a session outlives changes to that collection.
    pub fn restore(store: Store) -> Self {
        let state = match store.session_user() {
            Some(user) => {
                tracing::debug!(user_id = %user.id, "Restored session");
                AuthState::Authenticated(user)
            }
            None => AuthState::Unauthenticated,
        };

        Session { store, state }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            AuthState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn require_user(&self) -> RsvpResult<&SessionUser> {
        self.current_user().ok_or(RsvpError::NotAuthenticated)
    }

    pub fn login(&mut self, email: &str, password: &str) -> RsvpResult<&SessionUser> {
        let user = self
            .store
            .find_user(email, password)
            .ok_or(RsvpError::InvalidCredentials)?;

        tracing::info!(user_id = %user.id, "Logged in");
        self.authenticate(user.without_password())
    }

    /// Create an account and log into it. Existing accounts with the same
    /// email are not checked for.
    pub fn signup(&mut self, email: &str, password: &str) -> RsvpResult<&SessionUser> {
        validate::credentials(email, password)?;

        let user = self.store.create_user(email, password)?;
        self.authenticate(user.without_password())
    }

    pub fn logout(&mut self) -> RsvpResult<()> {
        self.store.clear_session_user()?;
        self.state = AuthState::Unauthenticated;
        Ok(())
    }

    fn authenticate(&mut self, user: SessionUser) -> RsvpResult<&SessionUser> {
        self.store.save_session_user(&user)?;
        self.state = AuthState::Authenticated(user);

        let AuthState::Authenticated(user) = &self.state else {
            unreachable!("state was just set to Authenticated");
        };
        Ok(user)
    }
}
