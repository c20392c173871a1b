//! Dashboard user and authentication response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use msme_core::{Email, UserId, UserRole};

/// The signed-in user as held in the session store. Never carries a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: UserRole,
    /// Id from the business-type catalog, once the user picked one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial user update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub business_type: Option<String>,
}

impl UserPatch {
    /// Shallow-merge the set fields into `user`.
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(business_type) = self.business_type {
            user.business_type = Some(business_type);
        }
    }
}

/// Result of a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}
