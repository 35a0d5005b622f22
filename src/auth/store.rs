//! Auth state store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the [`Session`] for the running client. The route guard reads it
//! before each navigation, `Access` reads it for write-control visibility,
//! and the application's auth-failure subscriber clears it when the session
//! is lost for good.
//!
//! DESIGN
//! ======
//! `initialize` is single-flight through a `tokio::sync::OnceCell`: every
//! caller, concurrent or late, observes the outcome of one "who am I" call.
//! The session itself sits behind a plain mutex that is never held across
//! an await.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::IgnoredAny;
use tokio::sync::OnceCell;

use super::session::Session;
use crate::net::endpoints::{AUTH_ME, AUTH_REFRESH, AUTH_SIGN_IN, AUTH_SIGN_OUT};
use crate::net::{ApiError, ApiRequest, HttpClient, MeResponse, SignInRequest};
use crate::router::permissions::PermissionId;

pub struct AuthStore {
    client: Arc<HttpClient>,
    session: Mutex<Session>,
    init: OnceCell<()>,
    init_started: AtomicBool,
}

impl AuthStore {
    #[must_use]
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            session: Mutex::new(Session::signed_out()),
            init: OnceCell::new(),
            init_started: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn client(&self) -> &Arc<HttpClient> {
        &self.client
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Resolve the session from existing cookies. Idempotent: concurrent and
    /// repeated calls share a single "who am I" request. Any failure,
    /// including a 401, leaves the signed-out baseline.
    pub async fn initialize(&self) {
        self.init_started.store(true, Ordering::SeqCst);
        self.init
            .get_or_init(|| async {
                let probe = ApiRequest::get(AUTH_ME).as_startup_probe();
                match self.client.execute(probe).await.and_then(|r| r.decode::<MeResponse>()) {
                    Ok(me) => {
                        tracing::info!(user_id = me.id, "session restored");
                        *self.lock() = Session::from_me(me);
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "no active session at start-up");
                        *self.lock() = Session::signed_out();
                    }
                }
            })
            .await;
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.init.initialized()
    }

    /// Wait for an in-flight `initialize` to settle. Returns immediately when
    /// already initialized or when initialization was never started.
    pub async fn wait_for_init(&self) {
        if self.is_initialized() || !self.init_started.load(Ordering::SeqCst) {
            return;
        }
        self.initialize().await;
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    /// Sign in, then load the user's identity and permissions. On failure the
    /// current session is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the sign-in or "who am I" error.
    pub async fn sign_in(&self, credentials: &SignInRequest) -> Result<(), ApiError> {
        self.client.post::<IgnoredAny, _>(AUTH_SIGN_IN, credentials).await?;
        let me: MeResponse = self.client.get(AUTH_ME).await?;
        tracing::info!(user_id = me.id, "signed in");
        *self.lock() = Session::from_me(me);
        Ok(())
    }

    /// Sign out. The session is cleared whether or not the call succeeds.
    ///
    /// # Errors
    ///
    /// Returns the sign-out call's error after clearing the session.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let result = self.client.post::<IgnoredAny, _>(AUTH_SIGN_OUT, &serde_json::json!({})).await;
        self.clear();
        match &result {
            Ok(_) => tracing::info!("signed out"),
            Err(err) => tracing::warn!(error = %err, "sign-out call failed; session cleared locally"),
        }
        result.map(|_| ())
    }

    /// Ask the server for a new access token.
    ///
    /// # Errors
    ///
    /// On failure the session is cleared and the refresh error returned.
    pub async fn refresh_token(&self) -> Result<(), ApiError> {
        match self.client.post::<IgnoredAny, _>(AUTH_REFRESH, &serde_json::json!({})).await {
            Ok(_) => Ok(()),
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }

    // =========================================================================
    // STATE
    // =========================================================================

    #[must_use]
    pub fn has_permission(&self, id: PermissionId) -> bool {
        self.lock().has_permission(id)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.lock().clone()
    }

    /// Overwrite identity fields from an external source.
    pub fn set_user_info(&self, user_id: i64, email: impl Into<String>, permissions: impl IntoIterator<Item = PermissionId>) {
        let mut session = self.lock();
        session.user_id = Some(user_id);
        session.email = Some(email.into());
        session.permissions = permissions.into_iter().collect();
    }

    /// Reset to the signed-out baseline.
    pub fn clear(&self) {
        *self.lock() = Session::signed_out();
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
