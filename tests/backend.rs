//! End-to-end session tests against a local axum backend.
//!
//! The backend speaks the cookie protocol the admin API uses: sign-in and
//! refresh answer with `Set-Cookie`, every other call checks the `Cookie`
//! header. Tests drive the real `reqwest` transport through [`AdminApp`].

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::State;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::routing::{get, post};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;

use backoffice::app::AdminApp;
use backoffice::auth::token::{AccessTokenPayload, cookie_value, decode_jwt};
use backoffice::config::ClientConfig;
use backoffice::net::{QueryBuilder, ReqwestTransport, SignInRequest, Transport};
use backoffice::router::permissions::{PERMISSION_READ, ROLE_READ, USER_READ};

const PASSWORD: &str = "s3cret";
const REFRESH_TOKEN: &str = "refresh-1";

// =============================================================================
// MOCK BACKEND
// =============================================================================

#[derive(Default)]
struct Backend {
    /// Access token the server currently accepts.
    access: Mutex<Option<String>>,
    issued: AtomicUsize,
    refresh_calls: AtomicUsize,
    refresh_disabled: AtomicBool,
}

impl Backend {
    fn issue_access(&self) -> String {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            json!({ "userId": 7, "permissions": [1, 3], "iat": n, "exp": 4_102_444_800_u64 }).to_string(),
        );
        let token = format!("{header}.{payload}.sig{n}");
        *self.access.lock().unwrap() = Some(token.clone());
        token
    }

    /// Server-side expiry: the client's cookie stops being accepted.
    fn expire_access(&self) {
        *self.access.lock().unwrap() = Some("rotated".into());
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let current = self.access.lock().unwrap().clone();
        cookie(headers, "access_token").is_some_and(|sent| current.as_deref() == Some(sent.as_str()))
    }
}

fn cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?.to_str().ok()?;
    cookie_value(header, name).map(str::to_owned)
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": message }))).into_response()
}

async fn sign_in(State(backend): State<Arc<Backend>>, Json(body): Json<SignInRequest>) -> Response {
    if body.password != PASSWORD {
        return unauthorized("invalid email or password");
    }
    let access = backend.issue_access();
    (
        AppendHeaders([
            (SET_COOKIE, format!("access_token={access}; Path=/; HttpOnly")),
            (SET_COOKIE, format!("refresh_token={REFRESH_TOKEN}; Path=/; HttpOnly")),
        ]),
        Json(json!({})),
    )
        .into_response()
}

async fn refresh(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    backend.refresh_calls.fetch_add(1, Ordering::SeqCst);
    let valid = cookie(&headers, "refresh_token").as_deref() == Some(REFRESH_TOKEN);
    if !valid || backend.refresh_disabled.load(Ordering::SeqCst) {
        return unauthorized("refresh token expired");
    }
    let access = backend.issue_access();
    (AppendHeaders([(SET_COOKIE, format!("access_token={access}; Path=/; HttpOnly"))]), Json(json!({})))
        .into_response()
}

async fn sign_out(State(backend): State<Arc<Backend>>) -> Response {
    *backend.access.lock().unwrap() = None;
    (
        StatusCode::NO_CONTENT,
        AppendHeaders([
            (SET_COOKIE, "access_token=; Path=/; Max-Age=0".to_owned()),
            (SET_COOKIE, "refresh_token=; Path=/; Max-Age=0".to_owned()),
        ]),
    )
        .into_response()
}

async fn me(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    if !backend.authorized(&headers) {
        return unauthorized("access token expired");
    }
    Json(json!({ "id": 7, "email": "admin@example.com", "permissions": [1, 3] })).into_response()
}

async fn users(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    if !backend.authorized(&headers) {
        return unauthorized("access token expired");
    }
    Json(json!({
        "data": [{ "id": 7, "email": "admin@example.com" }],
        "meta": { "total": 1, "limit": 10, "offset": 0 }
    }))
    .into_response()
}

async fn spawn_backend() -> (String, Arc<Backend>) {
    let backend = Arc::new(Backend::default());
    let app = axum::Router::new()
        .route("/v1/auth/sign-in", post(sign_in))
        .route("/v1/auth/refresh", post(refresh))
        .route("/v1/auth/sign-out", post(sign_out))
        .route("/v1/auth/me", get(me))
        .route("/gen/v1/users", get(users))
        .with_state(Arc::clone(&backend));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), backend)
}

async fn app_for(base_url: &str) -> (AdminApp, Arc<ReqwestTransport>) {
    let config = ClientConfig::new(base_url);
    let transport = Arc::new(ReqwestTransport::new(&config).unwrap());
    let app = AdminApp::with_transport(config, Arc::clone(&transport) as Arc<dyn Transport>);
    (app, transport)
}

// =============================================================================
// TESTS
// =============================================================================

#[tokio::test]
async fn sign_in_sets_cookies_and_loads_permissions() {
    let (base, _backend) = spawn_backend().await;
    let (app, transport) = app_for(&base).await;

    let loc = app.start("/users").await.unwrap();
    assert_eq!(loc.to_string(), "/sign-in?redirect=/users");

    let loc = app
        .sign_in_and_return(&SignInRequest::new("admin@example.com", PASSWORD))
        .await
        .unwrap();
    assert_eq!(loc.path, "/users");
    assert!(app.store().has_permission(USER_READ));
    assert!(app.store().has_permission(PERMISSION_READ));
    assert!(!app.store().has_permission(ROLE_READ));

    let access = transport.cookie("access_token").unwrap();
    let payload: AccessTokenPayload = decode_jwt(&access).unwrap();
    assert_eq!(payload.user_id, 7);
}

#[tokio::test]
async fn wrong_password_surfaces_server_message() {
    let (base, backend) = spawn_backend().await;
    let (app, _transport) = app_for(&base).await;
    app.start("/").await.unwrap();

    let err = app
        .sign_in_and_return(&SignInRequest::new("admin@example.com", "nope"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid email or password");
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn expired_access_token_refreshes_once_and_retries() {
    let (base, backend) = spawn_backend().await;
    let (app, transport) = app_for(&base).await;
    app.start("/sign-in").await.unwrap();
    app.sign_in_and_return(&SignInRequest::new("admin@example.com", PASSWORD))
        .await
        .unwrap();
    let before = transport.cookie("access_token").unwrap();

    backend.expire_access();
    let users = app.services().users();
    let all = QueryBuilder::new();
    let search = QueryBuilder::new().with_search("admin");
    let paged = QueryBuilder::new().with_pagination(1, 10);
    let (a, b, c) = tokio::join!(users.list(&all), users.list(&search), users.list(&paged));
    for page in [a, b, c] {
        assert_eq!(page.unwrap().meta.total, 1);
    }

    // A 401 that lands after the refresh settled may start its own; the
    // exact single-flight count is pinned by the scripted-transport tests.
    let refreshes = backend.refresh_calls.load(Ordering::SeqCst);
    assert!((1..=3).contains(&refreshes), "refreshes: {refreshes}");
    assert_ne!(transport.cookie("access_token").unwrap(), before);
    assert!(app.store().is_authenticated());
}

#[tokio::test]
async fn failed_refresh_signs_out_and_redirects() {
    let (base, backend) = spawn_backend().await;
    let (app, _transport) = app_for(&base).await;
    app.start("/sign-in?redirect=/users").await.unwrap();
    app.sign_in_and_return(&SignInRequest::new("admin@example.com", PASSWORD))
        .await
        .unwrap();
    assert_eq!(app.router().location().path, "/users");

    backend.expire_access();
    backend.refresh_disabled.store(true, Ordering::SeqCst);
    let err = app.services().users().list(&QueryBuilder::new()).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(!app.store().is_authenticated());
    assert_eq!(app.router().location().to_string(), "/sign-in?redirect=/users");
}

#[tokio::test]
async fn explicit_refresh_rotates_access_cookie() {
    let (base, backend) = spawn_backend().await;
    let (app, transport) = app_for(&base).await;
    app.start("/sign-in").await.unwrap();
    app.sign_in_and_return(&SignInRequest::new("admin@example.com", PASSWORD))
        .await
        .unwrap();
    let before = transport.cookie("access_token").unwrap();

    app.store().refresh_token().await.unwrap();
    assert_ne!(transport.cookie("access_token").unwrap(), before);
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    assert!(app.store().is_authenticated());

    backend.refresh_disabled.store(true, Ordering::SeqCst);
    assert!(app.store().refresh_token().await.is_err());
    assert!(!app.store().is_authenticated());
}

#[tokio::test]
async fn sign_out_clears_cookies() {
    let (base, _backend) = spawn_backend().await;
    let (app, transport) = app_for(&base).await;
    app.start("/sign-in").await.unwrap();
    app.sign_in_and_return(&SignInRequest::new("admin@example.com", PASSWORD))
        .await
        .unwrap();

    let loc = app.sign_out().await.unwrap();
    assert_eq!(loc.path, "/sign-in");
    assert!(transport.cookie("access_token").is_none());
    assert!(!app.store().is_authenticated());
}
