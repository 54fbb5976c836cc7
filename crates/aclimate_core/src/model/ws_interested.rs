//! Weather-station interest record model.

use super::RecordId;
use crate::validation::ws_interested::{validate_user_id, validate_ws_ext_id};
use crate::validation::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};

/// Maximum `ws_ext_id` length, in characters.
pub const WS_EXT_ID_MAX_LEN: usize = 50;

/// Notification preferences: arbitrary JSON key/value pairs.
pub type Notification = serde_json::Map<String, serde_json::Value>;

/// Read projection of one `ws_interested` row.
///
/// The entity has no enable flag and no timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WsInterested {
    pub id: RecordId,
    pub user_id: RecordId,
    /// Weather station identifier owned by an external catalog.
    pub ws_ext_id: String,
    pub notification: Notification,
}

/// Input for registering interest in a station.
///
/// Deserialization enforces the length and positivity rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WsInterestedCreateFields")]
pub struct WsInterestedCreate {
    pub user_id: RecordId,
    pub ws_ext_id: String,
    pub notification: Notification,
}

#[derive(Deserialize)]
struct WsInterestedCreateFields {
    user_id: RecordId,
    ws_ext_id: String,
    notification: Notification,
}

impl TryFrom<WsInterestedCreateFields> for WsInterestedCreate {
    type Error = ValidationError;

    fn try_from(fields: WsInterestedCreateFields) -> ValidationResult<Self> {
        validate_user_id(fields.user_id)?;
        validate_ws_ext_id(&fields.ws_ext_id)?;
        Ok(Self {
            user_id: fields.user_id,
            ws_ext_id: fields.ws_ext_id,
            notification: fields.notification,
        })
    }
}

impl WsInterestedCreate {
    pub fn new(user_id: RecordId, ws_ext_id: impl Into<String>, notification: Notification) -> Self {
        Self {
            user_id,
            ws_ext_id: ws_ext_id.into(),
            notification,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WsInterestedUpdateFields")]
pub struct WsInterestedUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_ext_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

#[derive(Deserialize)]
struct WsInterestedUpdateFields {
    #[serde(default)]
    user_id: Option<RecordId>,
    #[serde(default)]
    ws_ext_id: Option<String>,
    #[serde(default)]
    notification: Option<Notification>,
}

impl TryFrom<WsInterestedUpdateFields> for WsInterestedUpdate {
    type Error = ValidationError;

    fn try_from(fields: WsInterestedUpdateFields) -> ValidationResult<Self> {
        if let Some(user_id) = fields.user_id {
            validate_user_id(user_id)?;
        }
        if let Some(ws_ext_id) = fields.ws_ext_id.as_deref() {
            validate_ws_ext_id(ws_ext_id)?;
        }
        Ok(Self {
            user_id: fields.user_id,
            ws_ext_id: fields.ws_ext_id,
            notification: fields.notification,
        })
    }
}
