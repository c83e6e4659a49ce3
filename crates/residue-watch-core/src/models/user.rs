//! User account models.

use serde::{Deserialize, Serialize};

/// Account role controlling which views and dashboards a user sees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Farm-scoped access, records treatments for their own farm
    Farmer,
    /// Cross-farm read access for regulatory review
    Inspector,
    /// Full system access, user administration
    Admin,
}

impl Role {
    /// Canonical lowercase name, as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Inspector => "inspector",
            Role::Admin => "admin",
        }
    }

    /// Parse the canonical lowercase name.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "farmer" => Some(Role::Farmer),
            "inspector" => Some(Role::Inspector),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID
    pub id: String,
    pub username: String,
    /// Password hash as issued by the auth layer, never plaintext
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub email: String,
    /// Farm this account is attached to (farmer accounts)
    pub farm_id: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Insert data for a new user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub email: String,
    pub farm_id: Option<String>,
}

impl User {
    /// Build a stored user from insert data, minting the ID.
    pub fn from_new(new: NewUser) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: new.username,
            password_hash: new.password_hash,
            full_name: new.full_name,
            role: new.role,
            email: new.email,
            farm_id: new.farm_id,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Check for system administration access.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
