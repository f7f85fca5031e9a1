//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use datahub_core::events::LoginIdentity;
use datahub_core::types::{AccessLevel, ResourceId};

/// A registered user; also the root of the user's personal folders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    #[serde(rename = "_id")]
    pub id: ResourceId,
    /// Unique login name.
    pub login: String,
    /// First name.
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    /// Last name.
    #[serde(rename = "lastName", default)]
    pub last_name: String,
    /// Email address, visible to the user and administrators only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the user is a site administrator.
    #[serde(default)]
    pub admin: bool,
    /// Whether the user's profile is public.
    #[serde(default)]
    pub public: bool,
    /// The viewer's access level on this user.
    #[serde(rename = "_accessLevel", default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,
}

impl User {
    /// `First Last`, falling back to the login.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.login.clone()
        } else {
            full.to_string()
        }
    }

    /// The identity carried by login events.
    pub fn identity(&self) -> LoginIdentity {
        LoginIdentity {
            id: self.id.to_string(),
            login: self.login.clone(),
            admin: self.admin,
        }
    }
}

/// Session token returned by authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// The token value.
    pub token: String,
    /// When the token expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}
