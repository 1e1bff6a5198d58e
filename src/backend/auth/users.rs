/**
 * User Model and Database Operations
 *
 * This module holds the stored user record shared by the primary and the
 * fallback store, and the PostgreSQL implementation of `UserStore`.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::claims::Role;
use crate::backend::auth::store::{StoreError, UserStore};

const USER_COLUMNS: &str = "id, name, email, password_hash, role, student_id, department, \
                            is_active, last_login, created_at, updated_at";

/// Optional profile data collected at registration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl UserProfile {
    pub fn is_empty(&self) -> bool {
        self.student_id.is_none() && self.department.is_none()
    }
}

/// User record as held by either store
#[derive(Debug, Clone, PartialEq)]
pub struct StoredUser {
    /// Unique user ID (UUID)
    pub id: Uuid,
    pub name: String,
    /// Lowercase-normalized email, the unique key
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub role: Role,
    pub profile: UserProfile,
    /// Deactivated accounts keep their record but cannot log in
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredUser {
    /// Build a new active student record. `email` must already be normalized.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: String,
        profile: UserProfile,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash,
            role: Role::Student,
            profile,
            is_active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Row shape of the `users` table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    student_id: Option<String>,
    department: Option<String>,
    is_active: bool,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for StoredUser {
    fn from(row: UserRow) -> Self {
        let role = row.role.parse().unwrap_or_else(|e| {
            tracing::warn!("User {} has {}; treating as student", row.id, e);
            Role::Student
        });
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role,
            profile: UserProfile {
                student_id: row.student_id,
                department: row.department,
            },
            is_active: row.is_active,
            last_login: row.last_login,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn unavailable(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

/// PostgreSQL-backed user store
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn connect(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn users_collection(&self) -> Result<(), StoreError> {
        let table = sqlx::query_scalar::<_, Option<String>>("SELECT to_regclass('public.users')::text")
            .fetch_one(&self.pool)
            .await
            .map_err(unavailable)?;

        match table {
            Some(_) => Ok(()),
            None => Err(StoreError::Unavailable("users table does not exist".to_string())),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(row.map(StoredUser::from))
    }

    async fn insert_user(&self, user: &StoredUser) -> Result<StoredUser, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, student_id, department,
                               is_active, last_login, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.profile.student_id)
        .bind(&user.profile.department)
        .bind(user.is_active)
        .bind(user.last_login)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::DuplicateEmail(user.email.clone())
            }
            _ => unavailable(e),
        })?;

        Ok(row.into())
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET last_login = $1, updated_at = $1 WHERE id = $2")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}
