//! User record model.
//!
//! # Invariants
//! - `(ext_key_clock_id, app_id)` is unique across users.
//! - `profile` is always one of `ProfileType::ALL`.

use super::{default_enable, RecordId};
use crate::validation::user::{validate_app_id, validate_ext_key_clock_id};
use crate::validation::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Maximum `ext_key_clock_id` length, in characters.
pub const EXT_KEY_CLOCK_ID_MAX_LEN: usize = 255;

/// Classification of a user inside an app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileType {
    Farmer,
    Technician,
}

impl ProfileType {
    /// Every profile, in declaration order.
    pub const ALL: [ProfileType; 2] = [ProfileType::Farmer, ProfileType::Technician];

    /// Stored and serialized token for this profile.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Farmer => "FARMER",
            Self::Technician => "TECHNICIAN",
        }
    }

    /// Exact-token lookup; returns `None` for unknown tokens.
    pub fn from_token(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|profile| profile.as_str() == value)
    }

    /// Comma-separated list of valid tokens, for error messages.
    pub fn valid_tokens() -> String {
        Self::ALL
            .iter()
            .map(|profile| profile.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for ProfileType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_token(value).ok_or_else(|| {
            ValidationError::new(format!(
                "Invalid profile type: {value}. Valid options are: {}",
                Self::valid_tokens()
            ))
        })
    }
}

/// Read projection of one `users` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    /// Subject id issued by the external identity provider.
    pub ext_key_clock_id: String,
    pub app_id: RecordId,
    pub profile: ProfileType,
    pub enable: bool,
    #[serde(alias = "register")]
    pub registered_at: i64,
    #[serde(alias = "updated")]
    pub updated_at: i64,
}

/// Input for creating a user.
///
/// Deserialization enforces the length and positivity rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserCreateFields")]
pub struct UserCreate {
    pub ext_key_clock_id: String,
    pub app_id: RecordId,
    pub profile: ProfileType,
    pub enable: bool,
}

#[derive(Deserialize)]
struct UserCreateFields {
    ext_key_clock_id: String,
    app_id: RecordId,
    profile: ProfileType,
    #[serde(default = "default_enable")]
    enable: bool,
}

impl TryFrom<UserCreateFields> for UserCreate {
    type Error = ValidationError;

    fn try_from(fields: UserCreateFields) -> ValidationResult<Self> {
        validate_ext_key_clock_id(&fields.ext_key_clock_id)?;
        validate_app_id(fields.app_id)?;
        Ok(Self {
            ext_key_clock_id: fields.ext_key_clock_id,
            app_id: fields.app_id,
            profile: fields.profile,
            enable: fields.enable,
        })
    }
}

impl UserCreate {
    /// Builds an enabled user input.
    pub fn new(ext_key_clock_id: impl Into<String>, app_id: RecordId, profile: ProfileType) -> Self {
        Self {
            ext_key_clock_id: ext_key_clock_id.into(),
            app_id,
            profile,
            enable: true,
        }
    }
}

/// Partial update for a user. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserUpdateFields")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext_key_clock_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
}

#[derive(Deserialize)]
struct UserUpdateFields {
    #[serde(default)]
    ext_key_clock_id: Option<String>,
    #[serde(default)]
    app_id: Option<RecordId>,
    #[serde(default)]
    profile: Option<ProfileType>,
    #[serde(default)]
    enable: Option<bool>,
}

impl TryFrom<UserUpdateFields> for UserUpdate {
    type Error = ValidationError;

    fn try_from(fields: UserUpdateFields) -> ValidationResult<Self> {
        if let Some(ext_key_clock_id) = fields.ext_key_clock_id.as_deref() {
            validate_ext_key_clock_id(ext_key_clock_id)?;
        }
        if let Some(app_id) = fields.app_id {
            validate_app_id(app_id)?;
        }
        Ok(Self {
            ext_key_clock_id: fields.ext_key_clock_id,
            app_id: fields.app_id,
            profile: fields.profile,
            enable: fields.enable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ProfileType, UserCreate, UserUpdate};

    #[test]
    fn profile_parses_exact_tokens_only() {
        assert_eq!("FARMER".parse::<ProfileType>().unwrap(), ProfileType::Farmer);
        assert_eq!(
            "TECHNICIAN".parse::<ProfileType>().unwrap(),
            ProfileType::Technician
        );
        assert!("farmer".parse::<ProfileType>().is_err());
    }

    #[test]
    fn profile_error_lists_valid_tokens() {
        let err = "INVALID_PROFILE".parse::<ProfileType>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid profile type: INVALID_PROFILE"));
        assert!(message.contains("FARMER, TECHNICIAN"));
    }

    #[test]
    fn profile_serializes_as_upper_case_token() {
        let input = UserCreate::new("keycloak_123", 1, ProfileType::Farmer);
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["profile"], "FARMER");
        assert_eq!(json["enable"], true);
    }

    #[test]
    fn create_rejects_non_positive_app_id_on_deserialize() {
        let json = serde_json::json!({
            "ext_key_clock_id": "keycloak_123",
            "app_id": -5,
            "profile": "FARMER",
        });
        let err = serde_json::from_value::<UserCreate>(json).unwrap_err();
        assert!(err.to_string().contains("App ID must be a positive integer"));

        let json = serde_json::json!({
            "ext_key_clock_id": "keycloak_123",
            "app_id": 1,
            "profile": "FARMER",
        });
        let input: UserCreate = serde_json::from_value(json).unwrap();
        assert_eq!(input, UserCreate::new("keycloak_123", 1, ProfileType::Farmer));
    }

    #[test]
    fn update_checks_present_fields_on_deserialize() {
        let json = serde_json::json!({ "ext_key_clock_id": "k".repeat(256) });
        assert!(serde_json::from_value::<UserUpdate>(json).is_err());
        let json = serde_json::json!({ "app_id": 0 });
        assert!(serde_json::from_value::<UserUpdate>(json).is_err());
        let json = serde_json::json!({ "profile": "TECHNICIAN" });
        let update: UserUpdate = serde_json::from_value(json).unwrap();
        assert_eq!(update.profile, Some(ProfileType::Technician));
    }
}
