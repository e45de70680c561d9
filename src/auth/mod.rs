//! Authentication Module
//!
//! JWT authentication for the HTTP surface:
//! - [`JwtService`] - token generation and validation
//! - [`CurrentUser`] - authenticated employee context
//! - [`require_auth`] - authentication middleware
//! - [`require_admin`] - admin gate for the employee CRUD routes

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
