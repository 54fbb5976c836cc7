//! App record model.
//!
//! # Invariants
//! - `(name, country_ext_id)` is unique across apps.
//! - `enable = false` is the disable convention; apps are not cascaded.

use super::{default_enable, RecordId};
use crate::validation::app::{validate_country_ext_id, validate_name};
use crate::validation::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};

/// Maximum `name` length, in characters.
pub const APP_NAME_MAX_LEN: usize = 255;
/// Maximum `country_ext_id` length, in characters.
pub const COUNTRY_EXT_ID_MAX_LEN: usize = 50;

/// Read projection of one `apps` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub id: RecordId,
    pub name: String,
    /// Country identifier owned by an external catalog.
    pub country_ext_id: String,
    pub enable: bool,
    /// Unix epoch milliseconds, set by the store on insert.
    #[serde(alias = "register")]
    pub registered_at: i64,
    /// Unix epoch milliseconds, refreshed on every update.
    #[serde(alias = "updated")]
    pub updated_at: i64,
}

/// Input for creating an app.
///
/// Deserialization enforces the field length rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AppCreateFields")]
pub struct AppCreate {
    pub name: String,
    pub country_ext_id: String,
    pub enable: bool,
}

#[derive(Deserialize)]
struct AppCreateFields {
    name: String,
    country_ext_id: String,
    #[serde(default = "default_enable")]
    enable: bool,
}

impl TryFrom<AppCreateFields> for AppCreate {
    type Error = ValidationError;

    fn try_from(fields: AppCreateFields) -> ValidationResult<Self> {
        validate_name(&fields.name)?;
        validate_country_ext_id(&fields.country_ext_id)?;
        Ok(Self {
            name: fields.name,
            country_ext_id: fields.country_ext_id,
            enable: fields.enable,
        })
    }
}

impl AppCreate {
    /// Builds an enabled app input.
    pub fn new(name: impl Into<String>, country_ext_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country_ext_id: country_ext_id.into(),
            enable: true,
        }
    }
}

/// Partial update for an app. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AppUpdateFields")]
pub struct AppUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_ext_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
}

#[derive(Deserialize)]
struct AppUpdateFields {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    country_ext_id: Option<String>,
    #[serde(default)]
    enable: Option<bool>,
}

impl TryFrom<AppUpdateFields> for AppUpdate {
    type Error = ValidationError;

    fn try_from(fields: AppUpdateFields) -> ValidationResult<Self> {
        if let Some(name) = fields.name.as_deref() {
            validate_name(name)?;
        }
        if let Some(country_ext_id) = fields.country_ext_id.as_deref() {
            validate_country_ext_id(country_ext_id)?;
        }
        Ok(Self {
            name: fields.name,
            country_ext_id: fields.country_ext_id,
            enable: fields.enable,
        })
    }
}
