//! Client routing: route table, guard, and permission gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`Router`] holds the current location and runs [`guard::RouteGuard`] on
//! every `push`, following redirects until a target is allowed. The auth
//! failure path uses the [`Navigator`] seam to force the sign-in page
//! without going through the guard.

pub mod access;
pub mod guard;
pub mod permissions;
pub mod routes;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use access::{Access, PermissionSource};
pub use guard::{GuardState, RouteGuard};
pub use permissions::PermissionId;
pub use routes::{Location, RouteMeta};

use crate::auth::AuthStore;

/// Guard redirects followed by one `push` before giving up.
pub const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("redirect loop navigating to {path}")]
    RedirectLoop { path: String },
}

/// Unconditional location change that skips the guard.
pub trait Navigator: Send + Sync {
    fn hard_redirect(&self, location: &str);
}

pub struct Router {
    guard: RouteGuard,
    location: Mutex<Location>,
    last_state: Mutex<GuardState>,
}

impl Router {
    #[must_use]
    pub fn new(store: Arc<AuthStore>) -> Self {
        Self {
            guard: RouteGuard::new(store),
            location: Mutex::new(Location::home()),
            last_state: Mutex::new(GuardState::Unchecked),
        }
    }

    /// Current location.
    #[must_use]
    pub fn location(&self) -> Location {
        lock(&self.location).clone()
    }

    /// Guard outcome of the most recent navigation step.
    #[must_use]
    pub fn last_state(&self) -> GuardState {
        lock(&self.last_state).clone()
    }

    /// Navigate to `target`, following guard redirects.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::RedirectLoop`] when no allowed location is
    /// reached within [`MAX_REDIRECTS`] hops.
    pub async fn push(&self, target: &str) -> Result<Location, NavigationError> {
        let mut next = Location::parse(target);
        for _ in 0..=MAX_REDIRECTS {
            let state = self.guard.before_each(&next).await;
            *lock(&self.last_state) = state.clone();
            match state.redirect() {
                Some(redirect) => {
                    tracing::debug!(from = %next, to = %redirect, "navigation redirected");
                    next = redirect;
                }
                None => {
                    *lock(&self.location) = next.clone();
                    return Ok(next);
                }
            }
        }
        tracing::error!(path = target, "navigation redirect loop");
        Err(NavigationError::RedirectLoop { path: target.to_owned() })
    }
}

impl Navigator for Router {
    fn hard_redirect(&self, location: &str) {
        tracing::info!(location, "hard redirect");
        *lock(&self.location) = Location::parse(location);
        *lock(&self.last_state) = GuardState::Unchecked;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
