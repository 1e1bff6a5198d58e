//! Portal Resources Module
//!
//! Read and write handlers for the portal's resources. Every handler here
//! runs behind the auth middleware and queries the primary store directly;
//! there is no fallback for resource data.
//!
//! # Module Structure
//!
//! ```text
//! portal/
//! ├── mod.rs         - Module exports and shared helpers
//! ├── courses.rs     - Course listing, lookup and admin-only creation
//! ├── assignments.rs - Assignments of a course
//! ├── materials.rs   - Study materials of a course
//! └── grades.rs      - Grades of the calling user
//! ```

use sqlx::PgPool;

use crate::backend::error::BackendError;

pub mod courses;

pub mod assignments;

pub mod materials;

pub mod grades;

pub use assignments::list_assignments;
pub use courses::{create_course, get_course, list_courses};
pub use grades::list_grades;
pub use materials::list_materials;

/// Unwrap the optional pool, answering 503 when no database is configured
pub(crate) fn require_pool(pool: Option<PgPool>) -> Result<PgPool, BackendError> {
    pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::ServiceUnavailable
    })
}
