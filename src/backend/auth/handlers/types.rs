/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * These types are shared across register, login, and get_me handlers.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::claims::{ClaimSet, Role};
use crate::backend::auth::service::{Credentials, Registration};
use crate::backend::auth::users::{StoredUser, UserProfile};

/// Registration request
///
/// Contains the display name, email and password for a new student account.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// User's email address (normalized before storage)
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            password: request.password,
            profile: UserProfile {
                student_id: request.student_id,
                department: request.department,
            },
        }
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    /// User's password (will be verified against stored hash)
    pub password: String,
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
        }
    }
}

/// Auth response
///
/// Returned by register and login handlers. The shape is identical whichever
/// store served the request; only `message` differs.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// User response (without sensitive data)
///
/// Does not include password hash or other sensitive information.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

impl From<&StoredUser> for UserResponse {
    fn from(user: &StoredUser) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            profile: (!user.profile.is_empty()).then(|| user.profile.clone()),
        }
    }
}

impl From<&ClaimSet> for UserResponse {
    fn from(claims: &ClaimSet) -> Self {
        Self {
            id: claims.sub.clone(),
            name: claims.name.clone(),
            email: claims.email.clone(),
            role: claims.role,
            profile: None,
        }
    }
}
