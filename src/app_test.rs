use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::*;
use crate::net::endpoints::{AUTH_ME, AUTH_REFRESH, GEN_USERS};
use crate::net::test_helpers::{FakeBackend, MockTransport, ok_json, status};
use crate::net::{Page, QueryBuilder};
use crate::router::permissions::USER_READ;

fn app_over(transport: &Arc<MockTransport>) -> AdminApp {
    AdminApp::with_transport(ClientConfig::new("http://api.test"), Arc::clone(transport) as Arc<dyn Transport>)
}

// =============================================================================
// SIGN-IN FLOW
// =============================================================================

#[tokio::test]
async fn signed_out_start_redirects_then_sign_in_returns() {
    let backend = FakeBackend::new(false, false);
    let transport = Arc::new(backend.transport());
    let app = app_over(&transport);

    let loc = app.start("/users").await.unwrap();
    assert_eq!(loc.to_string(), "/sign-in?redirect=/users");
    assert_eq!(transport.count(AUTH_REFRESH), 0);

    let loc = app.sign_in_and_return(&SignInRequest::new("a@b.com", "x")).await.unwrap();
    assert_eq!(loc.path, "/users");
    assert!(app.store().has_permission(USER_READ));
}

#[tokio::test]
async fn sign_in_without_redirect_goes_home() {
    let backend = FakeBackend::new(false, true);
    let transport = Arc::new(backend.transport());
    let app = app_over(&transport);

    app.start("/sign-in").await.unwrap();
    let loc = app.sign_in_and_return(&SignInRequest::new("a@b.com", "x")).await.unwrap();
    assert_eq!(loc, Location::home());
}

#[tokio::test]
async fn foreign_redirect_target_is_ignored() {
    let backend = FakeBackend::new(false, true);
    let transport = Arc::new(backend.transport());
    let app = app_over(&transport);

    app.start("/sign-in?redirect=//evil.test/x").await.unwrap();
    let loc = app.sign_in_and_return(&SignInRequest::new("a@b.com", "x")).await.unwrap();
    assert_eq!(loc, Location::home());
}

#[tokio::test]
async fn wrong_password_stays_on_sign_in() {
    let transport = Arc::new(MockTransport::new(|req| {
        if req.path == AUTH_ME { status(401, "unauthorized") } else { status(401, "invalid email or password") }
    }));
    let app = app_over(&transport);
    app.start("/roles").await.unwrap();

    let err = app.sign_in_and_return(&SignInRequest::new("a@b.com", "bad")).await.unwrap_err();
    assert_eq!(err.to_string(), "invalid email or password");
    assert_eq!(app.router().location().to_string(), "/sign-in?redirect=/roles");
    assert_eq!(transport.count(AUTH_REFRESH), 0);
}

#[tokio::test]
async fn sign_out_lands_on_sign_in() {
    let backend = FakeBackend::new(true, true);
    let transport = Arc::new(backend.transport());
    let app = app_over(&transport);
    app.start("/users").await.unwrap();

    let loc = app.sign_out().await.unwrap();
    assert_eq!(loc.path, SIGN_IN_PATH);
    assert!(!app.store().is_authenticated());
}

// =============================================================================
// SESSION LOSS
// =============================================================================

#[tokio::test]
async fn refresh_failure_clears_session_and_redirects_once() {
    let backend = FakeBackend::new(true, false);
    let transport = Arc::new(backend.transport().with_auth_delay(Duration::from_millis(30)));
    let app = Arc::new(app_over(&transport));
    app.start("/users").await.unwrap();
    assert!(app.store().is_authenticated());

    // Wrap the installed subscriber to count deliveries.
    let fired = Arc::new(AtomicUsize::new(0));
    let previous = app.client().auth_failure().unsubscribe().unwrap();
    let f = Arc::clone(&fired);
    app.client().auth_failure().subscribe(Arc::new(move || {
        f.fetch_add(1, Ordering::SeqCst);
        previous.on_auth_failure();
    }));

    backend.token_valid.store(false, Ordering::SeqCst);
    let mut set = tokio::task::JoinSet::new();
    for _ in 0..5 {
        let app = Arc::clone(&app);
        set.spawn(async move { app.services().users().list(&QueryBuilder::new()).await });
    }
    while let Some(result) = set.join_next().await {
        assert_eq!(result.unwrap().unwrap_err().to_string(), "refresh token expired");
    }

    assert_eq!(transport.count(AUTH_REFRESH), 1);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(!app.store().is_authenticated());
    assert_eq!(app.router().location().to_string(), "/sign-in?redirect=/users");
}

#[tokio::test]
async fn expired_token_is_invisible_to_views() {
    let backend = FakeBackend::new(true, true);
    let transport = Arc::new(backend.transport());
    let app = app_over(&transport);
    app.start("/users").await.unwrap();

    backend.token_valid.store(false, Ordering::SeqCst);
    let page = app.services().users().list(&QueryBuilder::new()).await.unwrap();
    assert_eq!(page.meta.total, 1);
    assert_eq!(transport.count(AUTH_REFRESH), 1);
    assert_eq!(app.router().location().path, "/users");
}

#[tokio::test]
async fn auth_failure_on_sign_in_page_does_not_redirect() {
    let transport = Arc::new(MockTransport::new(|_| status(401, "refresh token expired")));
    let app = app_over(&transport);
    app.router().hard_redirect("/sign-in?redirect=/branches");

    app.client().auth_failure().notify();
    assert_eq!(app.router().location().to_string(), "/sign-in?redirect=/branches");
}

#[tokio::test]
async fn fallback_redirect_without_subscriber() {
    let transport = Arc::new(MockTransport::new(|_| ok_json(serde_json::json!({}))));
    let app = app_over(&transport);
    app.router().hard_redirect("/companies");

    app.client().auth_failure().unsubscribe();
    app.client().auth_failure().notify();
    assert_eq!(app.router().location().path, SIGN_IN_PATH);
}

// =============================================================================
// ACCESS
// =============================================================================

#[tokio::test]
async fn menu_and_write_access_follow_permissions() {
    let transport = Arc::new(MockTransport::new(|req| {
        if req.path == AUTH_ME {
            ok_json(serde_json::json!({ "id": 2, "email": "r@b.com", "permissions": [1] }))
        } else {
            ok_json(serde_json::json!({ "data": [], "meta": { "total": 0, "limit": 10, "offset": 0 } }))
        }
    }));
    let app = app_over(&transport);
    app.start("/").await.unwrap();

    assert!(app.access_for("/users").can_read());
    assert!(!app.access_for("/users").can_write());
    let menu: Vec<_> = app.menu().iter().filter_map(|m| m.route).collect();
    assert!(menu.contains(&"/users"));

    let page: Page<serde_json::Value> = app.client().get(GEN_USERS).await.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(app.locale(), Locale::EnUs);
}
