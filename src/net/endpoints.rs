//! API endpoint paths, relative to the configured base URL.

pub const AUTH_SIGN_IN: &str = "/v1/auth/sign-in";
pub const AUTH_SIGN_OUT: &str = "/v1/auth/sign-out";
pub const AUTH_REFRESH: &str = "/v1/auth/refresh";
pub const AUTH_ME: &str = "/v1/auth/me";

pub const USERS_V1: &str = "/v1/users";

pub const GEN_USERS: &str = "/gen/v1/users";
pub const GEN_ROLES: &str = "/gen/v1/roles";
pub const GEN_PERMISSIONS: &str = "/gen/v1/permissions";
pub const GEN_ROLE_PERMISSIONS: &str = "/gen/v1/role-permissions";
pub const GEN_USER_ROLES: &str = "/gen/v1/user-roles";
pub const GEN_USER_BRANCHES: &str = "/gen/v1/user-branches";
pub const GEN_BRANCHES: &str = "/gen/v1/branches";
pub const GEN_COMPANIES: &str = "/gen/v1/companies";
pub const GEN_DEPARTMENTS: &str = "/gen/v1/departments";
pub const GEN_DIVISIONS: &str = "/gen/v1/divisions";
pub const GEN_SALES_ORGANIZATIONS: &str = "/gen/v1/sales-organizations";
pub const GEN_CUSTOMERS: &str = "/gen/v1/customers";
pub const GEN_CURRENCIES: &str = "/gen/v1/currencies";
pub const GEN_COUNTRIES: &str = "/gen/v1/countries";
pub const GEN_UNIT_OF_MEASUREMENTS: &str = "/gen/v1/unit-of-measurements";
pub const GEN_UOM_CONVERSION_HEADERS: &str = "/gen/v1/uom-conversion-headers";
pub const GEN_UOM_CONVERSION_DETAILS: &str = "/gen/v1/uom-conversion-details";
pub const GEN_PRODUCT_BASE_UOMS: &str = "/gen/v1/product-base-uoms";

/// How the refresh pipeline treats a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    SignIn,
    SignOut,
    Refresh,
    Me,
    Resource,
}

/// Classify a request path. Query strings are ignored.
#[must_use]
pub fn classify(path: &str) -> EndpointKind {
    let path = path.split_once('?').map_or(path, |(p, _)| p);
    let path = path.trim_end_matches('/');
    if path.ends_with(AUTH_SIGN_IN) {
        EndpointKind::SignIn
    } else if path.ends_with(AUTH_SIGN_OUT) {
        EndpointKind::SignOut
    } else if path.ends_with(AUTH_REFRESH) {
        EndpointKind::Refresh
    } else if path.ends_with(AUTH_ME) {
        EndpointKind::Me
    } else {
        EndpointKind::Resource
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_auth_endpoints() {
        assert_eq!(classify(AUTH_SIGN_IN), EndpointKind::SignIn);
        assert_eq!(classify(AUTH_SIGN_OUT), EndpointKind::SignOut);
        assert_eq!(classify(AUTH_REFRESH), EndpointKind::Refresh);
        assert_eq!(classify(AUTH_ME), EndpointKind::Me);
    }

    #[test]
    fn classify_ignores_query_and_trailing_slash() {
        assert_eq!(classify("/v1/auth/me?x=1"), EndpointKind::Me);
        assert_eq!(classify("/v1/auth/refresh/"), EndpointKind::Refresh);
    }

    #[test]
    fn classify_resources() {
        assert_eq!(classify(GEN_USERS), EndpointKind::Resource);
        assert_eq!(classify("/gen/v1/users?page=1&limit=10"), EndpointKind::Resource);
        assert_eq!(classify("/v1/users/3/branches"), EndpointKind::Resource);
    }
}
