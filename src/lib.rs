//! Headless back-office admin client: cookie-session API access with
//! transparent token refresh, an auth store, and an RBAC route guard.

pub mod app;
pub mod auth;
pub mod config;
pub mod i18n;
pub mod models;
pub mod net;
pub mod router;
pub mod services;
pub mod ui;
