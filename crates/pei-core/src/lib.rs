//! # PEI Core
//!
//! Core types, errors, and utilities for the PEI API.
//!
//! This crate provides the foundational pieces used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Pagination parameters and response metadata
//! - [`password`]: Password hashing and verification
//! - [`permissions`]: Role to capability resolution
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use pei_core::errors::AppError;
//! use pei_core::permissions::{Role, get_permissions};
//!
//! let perms = get_permissions("Tutor");
//! if !perms.can_edit_students {
//!     return Err(AppError::forbidden(anyhow::anyhow!("Read-only access")));
//! }
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod permissions;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
pub use permissions::{Capability, PermissionSet, Role, get_permissions};
