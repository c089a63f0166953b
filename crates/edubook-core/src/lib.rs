//! # EduBook Core
//!
//! Foundational types shared by every EduBook crate:
//!
//! - [`errors`]: [`AppError`] with HTTP response conversion and the [`StoreError`]
//!   taxonomy reported by persistence backends
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use edubook_core::{AppError, hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;

pub use errors::{AppError, StoreError, format_validation_errors};
pub use password::{hash_password, hash_password_with_cost, verify_password};
