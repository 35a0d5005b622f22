//! Terminal auth-failure notification.
//!
//! DESIGN
//! ======
//! Exactly one subscriber at a time: [`AuthFailureHook::subscribe`] replaces
//! whatever was there before. With no subscriber the hook falls back to a
//! hard redirect to the sign-in page through the fallback navigator.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::router::Navigator;
use crate::router::routes::SIGN_IN_PATH;

/// Reacts to a terminal auth failure (refresh rejected, session gone).
pub trait AuthFailureSubscriber: Send + Sync {
    fn on_auth_failure(&self);
}

impl<F> AuthFailureSubscriber for F
where
    F: Fn() + Send + Sync,
{
    fn on_auth_failure(&self) {
        self();
    }
}

/// Single-subscriber slot notified by the refresh pipeline.
#[derive(Default)]
pub struct AuthFailureHook {
    subscriber: Mutex<Option<Arc<dyn AuthFailureSubscriber>>>,
    fallback: Mutex<Option<Weak<dyn Navigator>>>,
}

impl AuthFailureHook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `subscriber`, returning the one it replaced.
    pub fn subscribe(&self, subscriber: Arc<dyn AuthFailureSubscriber>) -> Option<Arc<dyn AuthFailureSubscriber>> {
        self.subscriber
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(subscriber)
    }

    /// Remove the current subscriber, if any.
    pub fn unsubscribe(&self) -> Option<Arc<dyn AuthFailureSubscriber>> {
        self.subscriber
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    #[must_use]
    pub fn has_subscriber(&self) -> bool {
        self.subscriber
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Navigator used for the hard redirect when nobody is subscribed.
    pub fn set_fallback(&self, navigator: Weak<dyn Navigator>) {
        *self.fallback.lock().unwrap_or_else(PoisonError::into_inner) = Some(navigator);
    }

    /// Deliver one auth-failure notification.
    pub fn notify(&self) {
        // Clone out of the lock: the subscriber may touch state that calls back in here.
        let subscriber = self
            .subscriber
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(subscriber) = subscriber {
            subscriber.on_auth_failure();
            return;
        }

        tracing::warn!("auth failure handler not registered; redirecting to sign-in page");
        let navigator = self
            .fallback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(Weak::upgrade);
        match navigator {
            Some(navigator) => navigator.hard_redirect(SIGN_IN_PATH),
            None => tracing::warn!("no navigator available for sign-in redirect"),
        }
    }
}
