//! Request extractors for authentication and capability checks.
//!
//! 1. The client sends `Authorization: Bearer <token>`.
//! 2. [`auth::AuthUser`] verifies the JWT and exposes its claims.
//! 3. A `Require*` extractor resolves the role's capability set and rejects
//!    with 403 when the needed flag is false.
//!
//! ```ignore
//! use crate::middleware::auth::{AuthUser, RequireEditStudents};
//!
//! // Any valid token
//! async fn whoami(auth_user: AuthUser) -> impl IntoResponse { /* ... */ }
//!
//! // Only roles with canEditStudents
//! async fn create_student(RequireEditStudents(auth_user): RequireEditStudents) { /* ... */ }
//! ```

pub mod auth;
