//! Navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs before every navigation. Waits for the auth store to finish its
//! start-up probe, then decides from the session alone whether the target is
//! reachable. Permission denials redirect home without a message.

use std::sync::Arc;

use super::routes::{Location, RouteMeta};
use crate::auth::{AuthStore, Session};

/// Where a navigation attempt stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Unchecked,
    AwaitingInit,
    Allowed,
    /// Send the user to sign-in, remembering where they were going.
    RedirectToSignIn { redirect: String },
    RedirectHome,
}

impl GuardState {
    /// Location to follow, for redirecting states.
    #[must_use]
    pub fn redirect(&self) -> Option<Location> {
        match self {
            Self::RedirectToSignIn { redirect } => Some(Location::sign_in_redirect(redirect)),
            Self::RedirectHome => Some(Location::home()),
            Self::Unchecked | Self::AwaitingInit | Self::Allowed => None,
        }
    }
}

/// Decide a navigation to `route` for an initialized `session`.
/// `requested` is the full target kept in the sign-in redirect.
#[must_use]
pub fn evaluate(route: &RouteMeta, requested: &str, session: &Session) -> GuardState {
    if route.requires_auth && !session.is_authenticated {
        return GuardState::RedirectToSignIn { redirect: requested.to_owned() };
    }
    if route.is_sign_in() && session.is_authenticated {
        return GuardState::RedirectHome;
    }
    if let Some(required) = route.required_permission() {
        if !session.has_permission(required) {
            return GuardState::RedirectHome;
        }
    }
    GuardState::Allowed
}

pub struct RouteGuard {
    store: Arc<AuthStore>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(store: Arc<AuthStore>) -> Self {
        Self { store }
    }

    /// Run the guard for a navigation to `to`.
    pub async fn before_each(&self, to: &Location) -> GuardState {
        if !self.store.is_initialized() {
            tracing::debug!(path = %to.path, state = ?GuardState::AwaitingInit, "waiting for auth initialization");
            self.store.wait_for_init().await;
        }

        let state = evaluate(to.route(), &to.to_string(), &self.store.session());
        tracing::debug!(path = %to.path, ?state, "route guard");
        state
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
