/**
 * Study Material Handlers
 *
 * GET /api/courses/{id}/materials
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
pub struct Material {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    /// document, video, link, ...
    pub kind: String,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub async fn list_materials(
    State(pool): State<Option<PgPool>>,
    AuthUser(_auth): AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<Material>>, BackendError> {
    let pool = require_pool(pool)?;
    if fetch_course(&pool, course_id).await?.is_none() {
        return Err(BackendError::not_found("Course not found"));
    }

    let materials = sqlx::query_as::<_, Material>(
        "SELECT id, course_id, title, kind, url, created_at
         FROM materials WHERE course_id = $1 ORDER BY created_at ASC",
    )
    .bind(course_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(materials))
}
