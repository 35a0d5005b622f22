//! Units of measurement and product UOM configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitOfMeasurement {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUnitOfMeasurementDto {
    pub name: String,
    pub symbol: String,
    pub is_custom: bool,
    pub created_by: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUnitOfMeasurementDto {
    pub name: String,
    pub symbol: String,
}

/// A named conversion set shared across products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UomConversionHeader {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUomConversionHeaderDto {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_by: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUomConversionHeaderDto {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

/// One rule within a header, e.g. 1 box = 10 packs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UomConversionDetail {
    pub id: i64,
    pub header_id: i64,
    pub from_uom_id: i64,
    pub to_uom_id: i64,
    pub conversion_factor: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub from_uom: Option<UnitOfMeasurement>,
    #[serde(default)]
    pub to_uom: Option<UnitOfMeasurement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUomConversionDetailDto {
    pub header_id: i64,
    pub from_uom_id: i64,
    pub to_uom_id: i64,
    pub conversion_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUomConversionDetailDto {
    pub from_uom_id: i64,
    pub to_uom_id: i64,
    pub conversion_factor: f64,
}

/// Conversion header, base UOM and default display UOM bundled for products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBaseUom {
    pub id: i64,
    pub name: String,
    pub uom_conversion_header_id: i64,
    pub base_uom_id: i64,
    pub default_display_uom_id: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub uom_conversion_header: Option<UomConversionHeader>,
    #[serde(default)]
    pub base_uom: Option<UnitOfMeasurement>,
    #[serde(default)]
    pub default_display_uom: Option<UnitOfMeasurement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductBaseUomDto {
    pub name: String,
    pub uom_conversion_header_id: i64,
    pub base_uom_id: i64,
    pub default_display_uom_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductBaseUomDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uom_conversion_header_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_uom_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_display_uom_id: Option<i64>,
}
