/**
 * Assignment Handlers
 *
 * GET /api/courses/{id}/assignments
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::portal::courses::fetch_course;
use crate::backend::portal::require_pool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Assignment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub max_points: i32,
    pub created_at: DateTime<Utc>,
}

/// Assignments of a course, soonest due first
pub async fn list_assignments(
    State(pool): State<Option<PgPool>>,
    AuthUser(_auth): AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<Assignment>>, BackendError> {
    let pool = require_pool(pool)?;
    if fetch_course(&pool, course_id).await?.is_none() {
        return Err(BackendError::not_found("Course not found"));
    }

    let assignments = sqlx::query_as::<_, Assignment>(
        "SELECT id, course_id, title, description, due_date, max_points, created_at
         FROM assignments WHERE course_id = $1
         ORDER BY due_date ASC NULLS LAST, created_at ASC",
    )
    .bind(course_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(assignments))
}
