//! Users and the join resources that hang off them.
//!
//! Users are listed and deleted through the generic endpoint but created and
//! updated through `/v1/users`, which hashes passwords server-side.

use std::sync::Arc;

use serde::de::IgnoredAny;

use super::resource::Resource;
use crate::models::role::{CreateRolePermissionDto, CreateUserRoleDto};
use crate::models::user::{AssignBranchesDto, CreateUserDto, UpdateUserDto};
use crate::models::{RolePermission, User, UserRole};
use crate::net::endpoints::{GEN_ROLE_PERMISSIONS, GEN_USER_BRANCHES, GEN_USER_ROLES, GEN_USERS, USERS_V1};
use crate::net::{ApiError, HttpClient, Page, QueryBuilder};

#[derive(Clone)]
pub struct UsersService {
    client: Arc<HttpClient>,
    generic: Resource<User>,
}

impl UsersService {
    #[must_use]
    pub fn new(client: Arc<HttpClient>) -> Self {
        let generic = Resource::new(Arc::clone(&client), GEN_USERS);
        Self { client, generic }
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn list(&self, query: &QueryBuilder) -> Result<Page<User>, ApiError> {
        self.generic.list(query).await
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn get(&self, id: i64) -> Result<User, ApiError> {
        self.generic.get(id).await
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn create(&self, dto: &CreateUserDto) -> Result<User, ApiError> {
        self.client.post(USERS_V1, dto).await
    }

    /// Update email and/or password. Empty values are not sent.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn update(&self, id: i64, dto: UpdateUserDto) -> Result<(), ApiError> {
        let body = dto.without_empty();
        self.client.patch::<IgnoredAny, _>(&format!("{USERS_V1}/{id}"), &body).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.generic.delete(id).await
    }

    /// Assign a branch, or every branch of a sales organization, to a user.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn assign_branches(&self, user_id: i64, dto: &AssignBranchesDto) -> Result<(), ApiError> {
        self.client
            .post::<IgnoredAny, _>(&format!("{USERS_V1}/{user_id}/branches"), dto)
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn remove_branch_from_user(&self, user_branch_id: i64) -> Result<(), ApiError> {
        self.client
            .delete::<IgnoredAny>(&format!("{GEN_USER_BRANCHES}/{user_branch_id}"))
            .await?;
        Ok(())
    }
}

/// Role ↔ permission grants.
#[derive(Clone)]
pub struct RolePermissionsService {
    inner: Resource<RolePermission, CreateRolePermissionDto>,
}

impl RolePermissionsService {
    #[must_use]
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { inner: Resource::new(client, GEN_ROLE_PERMISSIONS) }
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn list(&self, query: &QueryBuilder) -> Result<Page<RolePermission>, ApiError> {
        self.inner.list(query).await
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn add_permission_to_role(&self, dto: &CreateRolePermissionDto) -> Result<RolePermission, ApiError> {
        self.inner.create(dto).await
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn remove_permission_from_role(&self, role_permission_id: i64) -> Result<(), ApiError> {
        self.inner.delete(role_permission_id).await
    }
}

/// User ↔ role assignments.
#[derive(Clone)]
pub struct UserRolesService {
    inner: Resource<UserRole, CreateUserRoleDto>,
}

impl UserRolesService {
    #[must_use]
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { inner: Resource::new(client, GEN_USER_ROLES) }
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn list(&self, query: &QueryBuilder) -> Result<Page<UserRole>, ApiError> {
        self.inner.list(query).await
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn add_role_to_user(&self, dto: &CreateUserRoleDto) -> Result<UserRole, ApiError> {
        self.inner.create(dto).await
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn remove_role_from_user(&self, user_role_id: i64) -> Result<(), ApiError> {
        self.inner.delete(user_role_id).await
    }
}
