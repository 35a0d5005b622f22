//! Entity DTOs for the back-office resources.
//!
//! DESIGN
//! ======
//! Field names are camelCase on the wire. Audit fields and embedded
//! relations are optional on read because list and detail endpoints do not
//! always populate them. Update DTOs skip absent fields so a PATCH only
//! touches what the caller set.

pub mod customer;
pub mod org;
pub mod role;
pub mod uom;
pub mod user;

use serde::{Deserialize, Serialize};

pub use customer::{Country, Currency, Customer};
pub use org::{Branch, Company, Department, Division, OrgUnit, SalesOrganization};
pub use role::{Permission, Role, RolePermission, UserRole};
pub use uom::{ProductBaseUom, UnitOfMeasurement, UomConversionDetail, UomConversionHeader};
pub use user::{User, UserBranch};

/// Embedded `{ name }` or `{ id, name }` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

/// Embedded `{ email }` audit user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRef {
    pub email: String,
}

#[cfg(test)]
#[path = "models_test.rs"]
mod tests;
