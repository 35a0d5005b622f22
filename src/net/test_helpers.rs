//! Scripted transport for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::endpoints;
use super::transport::{ApiRequest, ApiResponse, Method, Transport};
use super::types::ApiError;

type Handler = Box<dyn Fn(&ApiRequest) -> Result<ApiResponse, ApiError> + Send + Sync>;

/// Transport that answers from a closure and records every call.
pub struct MockTransport {
    handler: Handler,
    calls: Mutex<Vec<(Method, String)>>,
    /// Paths of requests sent with the retried flag, in send order.
    retried: Mutex<Vec<String>>,
    delay: Duration,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest) -> Result<ApiResponse, ApiError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
            retried: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    /// Sleep before answering auth calls, so concurrent requests pile up
    /// behind an in-flight refresh or initialize.
    pub fn with_auth_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Answer from the handler without recording the call.
    pub fn respond(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        (self.handler)(request)
    }

    pub fn calls(&self) -> Vec<(Method, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn retried_paths(&self) -> Vec<String> {
        self.retried.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, p)| p == path)
            .count()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.method, request.path.clone()));
        if request.is_retried() {
            self.retried.lock().unwrap().push(request.path.clone());
        }
        if !self.delay.is_zero() && request.path.starts_with("/v1/auth/") {
            tokio::time::sleep(self.delay).await;
        }
        (self.handler)(request)
    }
}

pub fn ok_json(body: serde_json::Value) -> Result<ApiResponse, ApiError> {
    Ok(ApiResponse::json(200, &body))
}

pub fn no_content() -> Result<ApiResponse, ApiError> {
    Ok(ApiResponse::empty(204))
}

pub fn status(code: u16, message: &str) -> Result<ApiResponse, ApiError> {
    Ok(ApiResponse::json(code, &serde_json::json!({ "message": message })))
}

pub fn users_page() -> serde_json::Value {
    serde_json::json!({
        "data": [{ "id": 1, "email": "a@b.com" }],
        "meta": { "total": 1, "limit": 10, "offset": 0 }
    })
}

/// A small cookie-session backend: resource calls succeed only while the
/// access token is valid; refresh revalidates it unless `refresh_ok` is off.
pub struct FakeBackend {
    pub token_valid: Arc<AtomicBool>,
    pub refresh_ok: Arc<AtomicBool>,
}

impl FakeBackend {
    pub fn new(token_valid: bool, refresh_ok: bool) -> Self {
        Self {
            token_valid: Arc::new(AtomicBool::new(token_valid)),
            refresh_ok: Arc::new(AtomicBool::new(refresh_ok)),
        }
    }

    pub fn transport(&self) -> MockTransport {
        let token_valid = Arc::clone(&self.token_valid);
        let refresh_ok = Arc::clone(&self.refresh_ok);
        MockTransport::new(move |req| {
            let path = req.path.split('?').next().unwrap_or_default();
            match path {
                endpoints::AUTH_SIGN_IN => {
                    token_valid.store(true, Ordering::SeqCst);
                    no_content()
                }
                endpoints::AUTH_SIGN_OUT => {
                    token_valid.store(false, Ordering::SeqCst);
                    no_content()
                }
                endpoints::AUTH_REFRESH => {
                    if refresh_ok.load(Ordering::SeqCst) {
                        token_valid.store(true, Ordering::SeqCst);
                        no_content()
                    } else {
                        status(401, "refresh token expired")
                    }
                }
                _ if !token_valid.load(Ordering::SeqCst) => status(401, "access token expired"),
                endpoints::AUTH_ME => ok_json(serde_json::json!({ "id": 1, "email": "a@b.com", "permissions": [1, 2] })),
                endpoints::GEN_USERS => ok_json(users_page()),
                _ => status(404, "not found"),
            }
        })
    }
}
