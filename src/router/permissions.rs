//! Permission identifiers and the route → permission maps.
//!
//! IDs must match the backend's permission table. The client only consumes
//! the flat set resolved from the user's roles.

use serde::{Deserialize, Serialize};

/// Backend permission identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(pub u32);

pub const USER_READ: PermissionId = PermissionId(1);
pub const USER_WRITE: PermissionId = PermissionId(2);
pub const PERMISSION_READ: PermissionId = PermissionId(3);
pub const ROLE_READ: PermissionId = PermissionId(4);
pub const ROLE_WRITE: PermissionId = PermissionId(5);
pub const BRANCH_READ: PermissionId = PermissionId(6);
pub const BRANCH_WRITE: PermissionId = PermissionId(7);
pub const COMPANY_READ: PermissionId = PermissionId(8);
pub const COMPANY_WRITE: PermissionId = PermissionId(9);
pub const DEPARTMENT_READ: PermissionId = PermissionId(10);
pub const DEPARTMENT_WRITE: PermissionId = PermissionId(11);
pub const DIVISION_READ: PermissionId = PermissionId(12);
pub const DIVISION_WRITE: PermissionId = PermissionId(13);

/// Permission required to view a route.
const ROUTE_READ: &[(&str, PermissionId)] = &[
    ("/users", USER_READ),
    ("/roles", ROLE_READ),
    ("/permissions", PERMISSION_READ),
    ("/branches", BRANCH_READ),
    ("/companies", COMPANY_READ),
    ("/departments", DEPARTMENT_READ),
    ("/divisions", DIVISION_READ),
];

/// Permission required to create, edit or delete on a route.
const ROUTE_WRITE: &[(&str, PermissionId)] = &[
    ("/users", USER_WRITE),
    ("/roles", ROLE_WRITE),
    ("/branches", BRANCH_WRITE),
    ("/companies", COMPANY_WRITE),
    ("/departments", DEPARTMENT_WRITE),
    ("/divisions", DIVISION_WRITE),
];

#[must_use]
pub fn read_permission(path: &str) -> Option<PermissionId> {
    lookup(ROUTE_READ, path)
}

#[must_use]
pub fn write_permission(path: &str) -> Option<PermissionId> {
    lookup(ROUTE_WRITE, path)
}

fn lookup(map: &[(&str, PermissionId)], path: &str) -> Option<PermissionId> {
    map.iter().find(|(route, _)| *route == path).map(|(_, id)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_map_covers_managed_routes() {
        assert_eq!(read_permission("/users"), Some(USER_READ));
        assert_eq!(read_permission("/permissions"), Some(PERMISSION_READ));
        assert_eq!(read_permission("/divisions"), Some(DIVISION_READ));
        assert_eq!(read_permission("/"), None);
        assert_eq!(read_permission("/customers"), None);
    }

    #[test]
    fn permissions_route_has_no_write_permission() {
        assert_eq!(write_permission("/permissions"), None);
        assert_eq!(write_permission("/roles"), Some(ROLE_WRITE));
    }

    #[test]
    fn permission_id_is_a_bare_number_on_the_wire() {
        assert_eq!(serde_json::to_string(&USER_WRITE).unwrap(), "2");
        let ids: Vec<PermissionId> = serde_json::from_str("[1,13]").unwrap();
        assert_eq!(ids, vec![USER_READ, DIVISION_WRITE]);
    }
}
