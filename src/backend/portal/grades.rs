/**
 * Grade Handlers
 *
 * GET /api/grades returns the grades of the calling user, identified by the
 * `sub` claim of their token.
 */

use axum::{extract::State, response::Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::errors::AuthError;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::portal::require_pool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Grade {
    pub id: Uuid,
    pub course_id: Uuid,
    pub course_code: String,
    pub assignment_id: Option<Uuid>,
    pub score: f64,
    pub letter: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

pub async fn list_grades(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<Grade>>, BackendError> {
    let claims = auth.into_claims()?;
    let user_id = claims.user_id().ok_or_else(|| {
        tracing::warn!("Token subject is not a user id: {}", claims.sub);
        AuthError::InvalidToken
    })?;
    let pool = require_pool(pool)?;

    let grades = sqlx::query_as::<_, Grade>(
        r#"
        SELECT g.id, g.course_id, c.code AS course_code, g.assignment_id,
               g.score, g.letter, g.recorded_at
        FROM grades g
        JOIN courses c ON c.id = g.course_id
        WHERE g.user_id = $1
        ORDER BY g.recorded_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(grades))
}
