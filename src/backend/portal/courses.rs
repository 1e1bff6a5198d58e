/**
 * Course Handlers
 *
 * GET /api/courses, GET /api/courses/{id} and POST /api/courses.
 * Creating a course requires the admin role.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::claims::Role;
use crate::backend::auth::gate::require_role;
use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, JsonBody};
use crate::backend::portal::require_pool;
use crate::shared::SharedError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub credits: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub credits: i32,
}

impl CreateCourseRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.code.trim().is_empty() {
            return Err(SharedError::validation("code", "Course code is required"));
        }
        if self.title.trim().is_empty() {
            return Err(SharedError::validation("title", "Course title is required"));
        }
        if self.credits < 0 {
            return Err(SharedError::validation("credits", "Credits cannot be negative"));
        }
        Ok(())
    }
}

pub async fn fetch_courses(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, code, title, description, instructor, credits, created_at
         FROM courses ORDER BY code",
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_course(pool: &PgPool, id: Uuid) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, code, title, description, instructor, credits, created_at
         FROM courses WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

async fn insert_course(pool: &PgPool, request: &CreateCourseRequest) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        INSERT INTO courses (id, code, title, description, instructor, credits, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        RETURNING id, code, title, description, instructor, credits, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.code.trim())
    .bind(request.title.trim())
    .bind(&request.description)
    .bind(&request.instructor)
    .bind(request.credits)
    .fetch_one(pool)
    .await
}

pub async fn list_courses(
    State(pool): State<Option<PgPool>>,
    AuthUser(_auth): AuthUser,
) -> Result<Json<Vec<Course>>, BackendError> {
    let pool = require_pool(pool)?;
    let courses = fetch_courses(&pool).await?;
    Ok(Json(courses))
}

pub async fn get_course(
    State(pool): State<Option<PgPool>>,
    AuthUser(_auth): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, BackendError> {
    let pool = require_pool(pool)?;
    let course = fetch_course(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Course not found"))?;
    Ok(Json(course))
}

/// Create a course (admin only)
///
/// # Errors
///
/// * `403 Forbidden` - Caller is not an admin
/// * `400 Bad Request` - Unreadable body, missing code or title
/// * `409 Conflict` - A course with the same code exists
pub async fn create_course(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    JsonBody(request): JsonBody<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Course>), BackendError> {
    let caller = require_role(&auth, &[Role::Admin])?;
    request.validate()?;
    let pool = require_pool(pool)?;

    let course = insert_course(&pool, &request).await.map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            BackendError::handler(StatusCode::CONFLICT, "Course with this code already exists")
        }
        _ => BackendError::from(e),
    })?;

    tracing::info!("Course {} created by {}", course.code, caller.email);
    Ok((StatusCode::CREATED, Json(course)))
}
