//! Typed resource services over the authenticated client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views never build URLs themselves. They take a handle from [`Services`]
//! and call `list`/`get`/`create`/`update`/`delete`; session expiry during
//! any of these is absorbed by the client's refresh pipeline.

pub mod resource;
pub mod users;

use std::sync::Arc;

pub use resource::Resource;
pub use users::{RolePermissionsService, UserRolesService, UsersService};

use crate::models::customer::{CreateCurrencyDto, CreateCustomerDto, UpdateCurrencyDto, UpdateCustomerDto};
use crate::models::org::{CreateBranchDto, CreateCompanyDto, CreateOrgUnitDto, UpdateBranchDto, UpdateCompanyDto, UpdateOrgUnitDto};
use crate::models::role::{CreateRoleDto, UpdateRoleDto};
use crate::models::uom::{
    CreateProductBaseUomDto, CreateUnitOfMeasurementDto, CreateUomConversionDetailDto, CreateUomConversionHeaderDto,
    UpdateProductBaseUomDto, UpdateUnitOfMeasurementDto, UpdateUomConversionDetailDto, UpdateUomConversionHeaderDto,
};
use crate::models::{
    Branch, Company, Country, Currency, Customer, Department, Division, Permission, ProductBaseUom, Role,
    SalesOrganization, UnitOfMeasurement, UomConversionDetail, UomConversionHeader,
};
use crate::net::HttpClient;
use crate::net::endpoints as ep;

/// Untyped resource used by tooling that only moves JSON around.
pub type RawResource = Resource<serde_json::Value>;

/// Resource names accepted by [`Services::raw`], with their endpoints.
pub const RESOURCE_NAMES: &[(&str, &str)] = &[
    ("users", ep::GEN_USERS),
    ("roles", ep::GEN_ROLES),
    ("permissions", ep::GEN_PERMISSIONS),
    ("role-permissions", ep::GEN_ROLE_PERMISSIONS),
    ("user-roles", ep::GEN_USER_ROLES),
    ("user-branches", ep::GEN_USER_BRANCHES),
    ("branches", ep::GEN_BRANCHES),
    ("companies", ep::GEN_COMPANIES),
    ("departments", ep::GEN_DEPARTMENTS),
    ("divisions", ep::GEN_DIVISIONS),
    ("sales-organizations", ep::GEN_SALES_ORGANIZATIONS),
    ("customers", ep::GEN_CUSTOMERS),
    ("currencies", ep::GEN_CURRENCIES),
    ("countries", ep::GEN_COUNTRIES),
    ("unit-of-measurements", ep::GEN_UNIT_OF_MEASUREMENTS),
    ("uom-conversion-headers", ep::GEN_UOM_CONVERSION_HEADERS),
    ("uom-conversion-details", ep::GEN_UOM_CONVERSION_DETAILS),
    ("product-base-uoms", ep::GEN_PRODUCT_BASE_UOMS),
];

#[derive(Clone)]
pub struct Services {
    client: Arc<HttpClient>,
}

impl Services {
    #[must_use]
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    fn resource<T, C, U>(&self, endpoint: &'static str) -> Resource<T, C, U>
    where
        T: serde::de::DeserializeOwned,
        C: serde::Serialize + Sync,
        U: serde::Serialize + Sync,
    {
        Resource::new(Arc::clone(&self.client), endpoint)
    }

    /// JSON handle for a resource by its short name (`"users"`, `"branches"`).
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<RawResource> {
        RESOURCE_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, endpoint)| self.resource(*endpoint))
    }

    // =========================================================================
    // ACCESS CONTROL
    // =========================================================================

    #[must_use]
    pub fn users(&self) -> UsersService {
        UsersService::new(Arc::clone(&self.client))
    }

    #[must_use]
    pub fn roles(&self) -> Resource<Role, CreateRoleDto, UpdateRoleDto> {
        self.resource(ep::GEN_ROLES)
    }

    /// Permissions are read-only.
    #[must_use]
    pub fn permissions(&self) -> Resource<Permission> {
        self.resource(ep::GEN_PERMISSIONS)
    }

    #[must_use]
    pub fn role_permissions(&self) -> RolePermissionsService {
        RolePermissionsService::new(Arc::clone(&self.client))
    }

    #[must_use]
    pub fn user_roles(&self) -> UserRolesService {
        UserRolesService::new(Arc::clone(&self.client))
    }

    // =========================================================================
    // ORGANIZATION
    // =========================================================================

    #[must_use]
    pub fn branches(&self) -> Resource<Branch, CreateBranchDto, UpdateBranchDto> {
        self.resource(ep::GEN_BRANCHES)
    }

    #[must_use]
    pub fn companies(&self) -> Resource<Company, CreateCompanyDto, UpdateCompanyDto> {
        self.resource(ep::GEN_COMPANIES)
    }

    #[must_use]
    pub fn departments(&self) -> Resource<Department, CreateOrgUnitDto, UpdateOrgUnitDto> {
        self.resource(ep::GEN_DEPARTMENTS)
    }

    #[must_use]
    pub fn divisions(&self) -> Resource<Division, CreateOrgUnitDto, UpdateOrgUnitDto> {
        self.resource(ep::GEN_DIVISIONS)
    }

    #[must_use]
    pub fn sales_organizations(&self) -> Resource<SalesOrganization, CreateOrgUnitDto, UpdateOrgUnitDto> {
        self.resource(ep::GEN_SALES_ORGANIZATIONS)
    }

    // =========================================================================
    // CUSTOMERS
    // =========================================================================

    #[must_use]
    pub fn customers(&self) -> Resource<Customer, CreateCustomerDto, UpdateCustomerDto> {
        self.resource(ep::GEN_CUSTOMERS)
    }

    #[must_use]
    pub fn currencies(&self) -> Resource<Currency, CreateCurrencyDto, UpdateCurrencyDto> {
        self.resource(ep::GEN_CURRENCIES)
    }

    #[must_use]
    pub fn countries(&self) -> Resource<Country> {
        self.resource(ep::GEN_COUNTRIES)
    }

    // =========================================================================
    // UNITS OF MEASUREMENT
    // =========================================================================

    #[must_use]
    pub fn unit_of_measurements(&self) -> Resource<UnitOfMeasurement, CreateUnitOfMeasurementDto, UpdateUnitOfMeasurementDto> {
        self.resource(ep::GEN_UNIT_OF_MEASUREMENTS)
    }

    #[must_use]
    pub fn uom_conversion_headers(
        &self,
    ) -> Resource<UomConversionHeader, CreateUomConversionHeaderDto, UpdateUomConversionHeaderDto> {
        self.resource(ep::GEN_UOM_CONVERSION_HEADERS)
    }

    #[must_use]
    pub fn uom_conversion_details(
        &self,
    ) -> Resource<UomConversionDetail, CreateUomConversionDetailDto, UpdateUomConversionDetailDto> {
        self.resource(ep::GEN_UOM_CONVERSION_DETAILS)
    }

    #[must_use]
    pub fn product_base_uoms(&self) -> Resource<ProductBaseUom, CreateProductBaseUomDto, UpdateProductBaseUomDto> {
        self.resource(ep::GEN_PRODUCT_BASE_UOMS)
    }
}

#[cfg(test)]
#[path = "services_test.rs"]
mod tests;
