//! # Campus API
//!
//! A REST backend for running a school: accounts and administrators, the
//! academic hierarchy (schools, years, terms, courses, divisions), weekly
//! timetables and course documents. Built with Axum and PostgreSQL.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Superuser bootstrap (server start and campus-cli)
//! ├── middleware/       # Auth extractors and permission guards
//! ├── modules/          # Feature modules
//! │   ├── login/       # Tokens and password recovery
//! │   ├── users/       # Accounts and role-row consistency
//! │   ├── admins/      # Admin promotion and permissions
//! │   ├── schools/ years/ terms/ courses/ divisions/
//! │   ├── professors/ students/
//! │   ├── timeslots/ lectures/ timetable/
//! │   ├── files/       # Course documents and submissions
//! │   └── utils/       # Test email
//! └── utils/            # Email delivery and upload helpers
//! ```
//!
//! Each feature module follows the same layout:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Business logic and SQL
//! - `model.rs`: Entities and DTOs, re-exported from `campus-models`
//! - `router.rs`: Axum router configuration
//!
//! ## Accounts and roles
//!
//! Every account has a type: `superuser`, `admin`, `professor` or `student`.
//! Professors and students get a matching row in `professors`/`students`.
//! Superusers and admins always have an `admins` row, and a professor may be
//! promoted to admin as well. What an admin may do is governed by the
//! [`campus_core::AdminPermissions`] bitmask; a negative value grants
//! everything.
//!
//! ## Authentication
//!
//! `POST /api/v1/login/access-token` takes an OAuth2 password form and returns
//! an access/refresh token pair (HS512). Send the access token as
//! `Authorization: Bearer <token>`.
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:8000/swagger-ui`
//! - Scalar: `http://localhost:8000/scalar`
//!
//! ## Modules
//!
//! - [`cli`]: Superuser creation
//! - [`docs`]: OpenAPI documentation setup
//! - [`logging`]: Tracing subscriber and request logging
//! - [`middleware`]: Authentication extractors and permission guards
//! - [`modules`]: Feature modules
//! - [`router`]: Main application router
//! - [`state`]: Shared application state
//! - [`utils`]: Email and upload helpers
//! - [`validator`]: Request body extraction and validation

pub mod cli;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use campus_auth;
pub use campus_config;
pub use campus_core;
pub use campus_db;
pub use campus_models;
