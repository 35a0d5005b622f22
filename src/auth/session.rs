//! Authenticated identity snapshot.

use std::collections::BTreeSet;

use crate::net::types::MeResponse;
use crate::router::permissions::PermissionId;

/// Who is signed in and what they may do.
///
/// The default value is the signed-out baseline. An authenticated session
/// always carries a user id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub is_authenticated: bool,
    pub user_id: Option<i64>,
    pub email: Option<String>,
    pub permissions: BTreeSet<PermissionId>,
}

impl Session {
    /// The signed-out baseline.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_me(me: MeResponse) -> Self {
        Self {
            is_authenticated: true,
            user_id: Some(me.id),
            email: Some(me.email),
            permissions: me.permissions.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn has_permission(&self, id: PermissionId) -> bool {
        self.permissions.contains(&id)
    }
}
