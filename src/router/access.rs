//! Synchronous permission checks for UI visibility.
//!
//! Uses the same `PermissionId` decision as the route guard, so a control is
//! shown exactly when the matching route or action would be allowed.

use super::permissions::{self, PermissionId};
use crate::auth::{AuthStore, Session};

/// Anything that can answer "does the current user hold this permission".
pub trait PermissionSource: Send + Sync {
    fn has_permission(&self, id: PermissionId) -> bool;
}

impl PermissionSource for AuthStore {
    fn has_permission(&self, id: PermissionId) -> bool {
        AuthStore::has_permission(self, id)
    }
}

impl PermissionSource for Session {
    fn has_permission(&self, id: PermissionId) -> bool {
        Session::has_permission(self, id)
    }
}

/// Permission view scoped to an optional route.
#[derive(Clone, Copy)]
pub struct Access<'a> {
    source: &'a dyn PermissionSource,
    route: Option<&'a str>,
}

impl<'a> Access<'a> {
    #[must_use]
    pub fn new(source: &'a dyn PermissionSource) -> Self {
        Self { source, route: None }
    }

    #[must_use]
    pub fn for_route(source: &'a dyn PermissionSource, route: &'a str) -> Self {
        Self { source, route: Some(route) }
    }

    #[must_use]
    pub fn has_permission(&self, id: PermissionId) -> bool {
        self.source.has_permission(id)
    }

    /// May the user view the scoped route? Unscoped or unmapped: yes.
    #[must_use]
    pub fn can_read(&self) -> bool {
        self.route.is_none_or(|route| self.can_access_route(route))
    }

    /// May the user create, edit or delete on the scoped route?
    #[must_use]
    pub fn can_write(&self) -> bool {
        self.route
            .and_then(permissions::write_permission)
            .is_none_or(|id| self.has_permission(id))
    }

    #[must_use]
    pub fn can_access_route(&self, path: &str) -> bool {
        permissions::read_permission(path).is_none_or(|id| self.has_permission(id))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::router::permissions::{ROLE_READ, USER_READ, USER_WRITE};

    fn session(ids: &[PermissionId]) -> Session {
        Session {
            is_authenticated: true,
            user_id: Some(1),
            email: Some("a@b.com".into()),
            permissions: ids.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn read_only_user_cannot_write() {
        let s = session(&[USER_READ]);
        let access = Access::for_route(&s, "/users");
        assert!(access.can_read());
        assert!(!access.can_write());
    }

    #[test]
    fn unmapped_route_is_open() {
        let s = session(&[]);
        let access = Access::for_route(&s, "/customers");
        assert!(access.can_read());
        assert!(access.can_write());
        assert!(Access::new(&s).can_read());
        assert!(Access::new(&s).can_write());
    }

    #[test]
    fn can_access_route_uses_read_map() {
        let s = session(&[ROLE_READ, USER_WRITE]);
        let access = Access::new(&s);
        assert!(access.can_access_route("/roles"));
        assert!(!access.can_access_route("/users"));
        assert!(access.can_access_route("/superset"));
    }

    #[test]
    fn signed_out_session_holds_nothing() {
        let s = Session::signed_out();
        assert!(!Access::new(&s).has_permission(USER_READ));
        assert!(!Access::for_route(&s, "/users").can_read());
    }
}
