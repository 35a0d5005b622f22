//! Authenticated HTTP client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every API call in the crate goes through [`HttpClient`]. It wraps a
//! [`Transport`] and makes session expiry invisible to callers: a 401 on an
//! ordinary endpoint triggers one cookie refresh, then the request is
//! reissued. Concurrent failures during a refresh queue behind it instead of
//! starting their own.
//!
//! ERROR PATH
//! ==========
//! 1. Not a 401, or already retried: normalized error, no retry.
//! 2. Sign-in, refresh, or the start-up "who am I" probe: credential
//!    failure. Only the refresh endpoint notifies the failure hook.
//! 3. Refresh in flight: queue, then replay or fail with the refresh error.
//! 4. Otherwise lead the refresh. Success replays the queue and then this
//!    request; failure rejects the queue and notifies the hook once.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::endpoints::{self, EndpointKind};
use super::failure::AuthFailureHook;
use super::refresh::{Entry, RefreshGate};
use super::transport::{ApiRequest, ApiResponse, Transport};
use super::types::ApiError;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub struct HttpClient {
    transport: Arc<dyn Transport>,
    refresh: RefreshGate,
    hook: AuthFailureHook,
}

impl HttpClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport, refresh: RefreshGate::new(), hook: AuthFailureHook::new() }
    }

    /// The auth-failure hook notified on terminal refresh failure.
    #[must_use]
    pub fn auth_failure(&self) -> &AuthFailureHook {
        &self.hook
    }

    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_refreshing()
    }

    // =========================================================================
    // TYPED HELPERS
    // =========================================================================

    /// `GET path` and decode the body.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(ApiRequest::get(path)).await?.decode()
    }

    /// `POST path` with a JSON body and decode the response.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = to_json(body)?;
        self.execute(ApiRequest::post(path, body)).await?.decode()
    }

    /// `PATCH path` with a JSON body and decode the response.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = to_json(body)?;
        self.execute(ApiRequest::patch(path, body)).await?.decode()
    }

    /// `DELETE path` and decode the response.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(ApiRequest::delete(path)).await?.decode()
    }

    // =========================================================================
    // PIPELINE
    // =========================================================================

    /// Send `request` through the refresh pipeline.
    ///
    /// # Errors
    ///
    /// Transport errors are returned as-is. Non-success statuses become
    /// [`ApiError::Status`] unless a refresh recovers them.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, method = request.method.as_str(), path = %request.path, retried = request.retried, "api request");

        let response = self.transport.send(&request).await?;
        if response.is_success() {
            return Ok(response);
        }
        self.recover(request, response).await
    }

    async fn recover(&self, mut request: ApiRequest, response: ApiResponse) -> Result<ApiResponse, ApiError> {
        let error = response.to_error();
        if response.status != 401 || request.retried {
            tracing::error!(method = request.method.as_str(), path = %request.path, status = response.status, message = %error, "API error");
            return Err(error);
        }

        match endpoints::classify(&request.path) {
            EndpointKind::SignIn => return Err(error),
            EndpointKind::Refresh => {
                self.hook.notify();
                return Err(error);
            }
            EndpointKind::Me if request.startup_probe => return Err(error),
            EndpointKind::SignOut | EndpointKind::Me | EndpointKind::Resource => {}
        }

        let lease = match self.refresh.enter() {
            Entry::Leader(lease) => lease,
            Entry::Queued(rx) => {
                tracing::debug!(path = %request.path, "queued behind in-flight refresh");
                rx.await.unwrap_or(Err(ApiError::RefreshAbandoned))?;
                request.retried = true;
                return self.replay(request).await;
            }
        };

        request.retried = true;
        match self.send_refresh().await {
            Ok(()) => {
                lease.settle(&Ok(()));
                // Woken waiters send their replays before this request goes again.
                tokio::task::yield_now().await;
                self.replay(request).await
            }
            Err(err) => {
                lease.settle(&Err(err.clone()));
                self.hook.notify();
                Err(err)
            }
        }
    }

    /// Reissue a request through the full pipeline.
    fn replay(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiResponse, ApiError>> {
        Box::pin(self.execute(request))
    }

    /// The refresh call itself bypasses the pipeline so its own 401 cannot
    /// recurse or notify the hook a second time.
    async fn send_refresh(&self) -> Result<(), ApiError> {
        let request = ApiRequest::post(endpoints::AUTH_REFRESH, serde_json::json!({}));
        let response = self.transport.send(&request).await?;
        if response.is_success() {
            tracing::info!("access token refreshed");
            Ok(())
        } else {
            let err = response.to_error();
            tracing::warn!(status = response.status, message = %err, "token refresh failed");
            Err(err)
        }
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
