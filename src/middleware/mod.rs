//! Request extractors for authentication and authorization.
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`auth::AuthUser`] verifies the access token and loads the active account
//! 3. Role extractors ([`auth::CurrentAdmin`], [`auth::CurrentStudent`],
//!    [`auth::CurrentProfessor`]) load the matching role row
//! 4. Permission extractors such as [`auth::RequireSchool`] check the admin bitmask
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{AuthUser, RequireSchool};
//!
//! // Any active account
//! async fn me(AuthUser(user): AuthUser) -> Json<User> {
//!     Json(user)
//! }
//!
//! // Admins holding the "school" capability
//! async fn create_school(RequireSchool(admin): RequireSchool) -> impl IntoResponse {
//!     // ...
//! }
//! ```

pub mod auth;
