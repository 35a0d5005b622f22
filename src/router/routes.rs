//! Route table and navigation locations.

use std::fmt;

use url::form_urlencoded;

use super::permissions::{self, PermissionId};

pub const HOME_PATH: &str = "/";
pub const SIGN_IN_PATH: &str = "/sign-in";
pub const REDIRECT_PARAM: &str = "redirect";

/// Static metadata for one client route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMeta {
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
}

impl RouteMeta {
    const fn private(path: &'static str, name: &'static str) -> Self {
        Self { path, name, requires_auth: true }
    }

    /// Read permission needed to enter this route, if any.
    #[must_use]
    pub fn required_permission(&self) -> Option<PermissionId> {
        permissions::read_permission(self.path)
    }

    #[must_use]
    pub fn is_sign_in(&self) -> bool {
        self.path == SIGN_IN_PATH
    }
}

pub const ROUTES: &[RouteMeta] = &[
    RouteMeta::private(HOME_PATH, "home"),
    RouteMeta { path: SIGN_IN_PATH, name: "sign-in", requires_auth: false },
    RouteMeta::private("/superset", "superset"),
    RouteMeta::private("/users", "users"),
    RouteMeta::private("/roles", "roles"),
    RouteMeta::private("/permissions", "permissions"),
    RouteMeta::private("/branches", "branches"),
    RouteMeta::private("/companies", "companies"),
    RouteMeta::private("/departments", "departments"),
    RouteMeta::private("/divisions", "divisions"),
    RouteMeta::private("/sales-organizations", "sales-organizations"),
    RouteMeta::private("/customers", "customers"),
    RouteMeta::private("/unit-of-measurements", "unit-of-measurements"),
    RouteMeta::private("/uom-conversions", "uom-conversions"),
    RouteMeta::private("/product-base-uoms", "product-base-uoms"),
];

/// Catch-all for unknown paths. Reachable by anyone.
pub const NOT_FOUND: RouteMeta = RouteMeta { path: "/:not-found", name: "not-found", requires_auth: false };

/// Match a path (no query) against the route table.
#[must_use]
pub fn resolve(path: &str) -> &'static RouteMeta {
    let trimmed = path.trim_end_matches('/');
    let path = if trimmed.is_empty() { HOME_PATH } else { trimmed };
    ROUTES.iter().find(|r| r.path == path).unwrap_or(&NOT_FOUND)
}

// =============================================================================
// LOCATION
// =============================================================================

/// A navigation target: path plus ordered query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Location {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), query: Vec::new() }
    }

    /// Parse `path?query`. An empty path becomes `/`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));
        let path = if path.is_empty() { HOME_PATH } else { path };
        let query = form_urlencoded::parse(query.as_bytes()).into_owned().collect();
        Self { path: path.to_owned(), query }
    }

    /// Sign-in location that returns to `target` afterwards.
    #[must_use]
    pub fn sign_in_redirect(target: &str) -> Self {
        Self::new(SIGN_IN_PATH).with_param(REDIRECT_PARAM, target)
    }

    #[must_use]
    pub fn home() -> Self {
        Self::new(HOME_PATH)
    }

    #[must_use]
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_owned(), value.to_owned()));
        self
    }

    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn route(&self) -> &'static RouteMeta {
        resolve(&self.path)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{}={}", encode(key), encode(value))?;
        }
        Ok(())
    }
}

/// Form-encode a query component, leaving `/` readable so redirect targets
/// print as `?redirect=/users`.
fn encode(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace("%2F", "/")
}
