//! # PEI Auth
//!
//! Access-token claims and JWT issue/verify helpers.
//!
//! - [`claims`]: JWT claim structures
//! - [`jwt`]: Token creation and verification
//!
//! Tokens carry the user's raw role string, never a permission list; the
//! capability set is resolved from the role on every request.

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
