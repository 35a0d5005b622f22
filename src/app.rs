//! Application wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`AdminApp`] owns one of everything: transport, HTTP client, auth store,
//! router, and services. It installs the auth-failure subscriber that turns
//! a lost session into a sign-in redirect. Closures hold `Weak` handles so
//! the client does not keep the store or router alive through its hook.

use std::sync::{Arc, Weak};

use crate::auth::AuthStore;
use crate::config::ClientConfig;
use crate::i18n::Locale;
use crate::net::{ApiError, HttpClient, ReqwestTransport, SignInRequest, Transport};
use crate::router::routes::{HOME_PATH, REDIRECT_PARAM, SIGN_IN_PATH};
use crate::router::{Access, Location, NavigationError, Navigator, Router};
use crate::services::Services;
use crate::ui::{MenuItem, visible_menu};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

pub struct AdminApp {
    config: ClientConfig,
    client: Arc<HttpClient>,
    store: Arc<AuthStore>,
    router: Arc<Router>,
    services: Services,
}

impl AdminApp {
    /// Build the app over a real HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be built from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Build the app over any transport.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let client = Arc::new(HttpClient::new(transport));
        let store = Arc::new(AuthStore::new(Arc::clone(&client)));
        let router = Arc::new(Router::new(Arc::clone(&store)));
        let services = Services::new(Arc::clone(&client));

        let app = Self { config, client, store, router, services };
        app.install_auth_failure_handler();
        app
    }

    fn install_auth_failure_handler(&self) {
        let store = Arc::downgrade(&self.store);
        let router = Arc::downgrade(&self.router);
        self.client.auth_failure().subscribe(Arc::new(move || {
            if let Some(store) = store.upgrade() {
                store.clear();
            }
            let Some(router) = router.upgrade() else {
                return;
            };
            let current = router.location();
            if current.path != SIGN_IN_PATH {
                tracing::info!(from = %current.path, "session lost; redirecting to sign-in");
                router.hard_redirect(&Location::sign_in_redirect(&current.path).to_string());
            }
        }));

        let navigator: Weak<Router> = Arc::downgrade(&self.router);
        let navigator: Weak<dyn Navigator> = navigator;
        self.client.auth_failure().set_fallback(navigator);
    }

    // =========================================================================
    // FLOWS
    // =========================================================================

    /// Resolve the session from cookies, then navigate to `initial_path`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Navigation`] if the guard loops.
    pub async fn start(&self, initial_path: &str) -> Result<Location, AppError> {
        self.store.initialize().await;
        Ok(self.router.push(initial_path).await?)
    }

    /// Sign in, then continue to the `redirect` target of the current
    /// location, or home.
    ///
    /// # Errors
    ///
    /// Returns the sign-in error; the location is unchanged in that case.
    pub async fn sign_in_and_return(&self, credentials: &SignInRequest) -> Result<Location, AppError> {
        self.store.sign_in(credentials).await?;
        let location = self.router.location();
        let target = location
            .param(REDIRECT_PARAM)
            .filter(|t| is_local_path(t))
            .unwrap_or(HOME_PATH);
        Ok(self.router.push(target).await?)
    }

    /// Sign out and go to the sign-in page.
    ///
    /// # Errors
    ///
    /// Returns the sign-out call's error after navigating; the local session
    /// is cleared either way.
    pub async fn sign_out(&self) -> Result<Location, AppError> {
        let result = self.store.sign_out().await;
        let location = self.router.push(SIGN_IN_PATH).await?;
        result?;
        Ok(location)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.config.locale
    }

    #[must_use]
    pub fn client(&self) -> &Arc<HttpClient> {
        &self.client
    }

    #[must_use]
    pub fn store(&self) -> &Arc<AuthStore> {
        &self.store
    }

    #[must_use]
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    #[must_use]
    pub fn services(&self) -> &Services {
        &self.services
    }

    #[must_use]
    pub fn access(&self) -> Access<'_> {
        Access::new(self.store.as_ref())
    }

    /// Permission view scoped to `route`, for write-control visibility.
    #[must_use]
    pub fn access_for<'a>(&'a self, route: &'a str) -> Access<'a> {
        Access::for_route(self.store.as_ref(), route)
    }

    /// Main menu filtered by the current session.
    #[must_use]
    pub fn menu(&self) -> Vec<MenuItem> {
        visible_menu(&self.access())
    }
}

/// Same-origin path: starts with `/` but not `//`.
fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//")
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
