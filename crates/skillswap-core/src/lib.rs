//! # SkillSwap Core
//!
//! Core types, errors, and utilities for the SkillSwap API.
//!
//! - [`errors`]: the API error taxonomy with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//! - [`response`]: the `success` / `fail` / `error` response envelope status
//!
//! # Example
//!
//! ```ignore
//! use skillswap_core::errors::AppError;
//! use skillswap_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;
pub mod response;

pub use errors::{AppError, ErrorKind, ErrorResponse};
pub use password::{hash_password, verify_password};
pub use response::ResponseStatus;
