/**
 * Identity Claims
 *
 * The claim set is the identity carried inside every token. It is built once
 * from a stored user record at login or registration and never re-derived
 * from storage while the token is alive.
 */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::StoredUser;

/// Portal role attached to every account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "student" => Ok(Role::Student),
            "faculty" => Ok(Role::Faculty),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Identity fields embedded in a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// User ID
    pub sub: String,
    /// Normalized email
    pub email: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

impl ClaimSet {
    pub fn new(
        sub: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            sub: sub.into(),
            email: email.into(),
            name: name.into(),
            role,
        }
    }

    /// Parse the subject back into a user ID
    pub fn user_id(&self) -> Option<uuid::Uuid> {
        uuid::Uuid::parse_str(&self.sub).ok()
    }
}

impl From<&StoredUser> for ClaimSet {
    fn from(user: &StoredUser) -> Self {
        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}
