//! # SkillSwap Auth
//!
//! Stateless bearer tokens for the SkillSwap API.
//!
//! Tokens are HS256 JWTs carrying only the user id and an expiry, so they can
//! be verified without a lookup table. Checking that the user still exists
//! is left to the HTTP layer, which owns the database.
//!
//! # Example
//!
//! ```ignore
//! use skillswap_auth::{create_access_token, verify_token};
//! use skillswap_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.user_id()?, user_id);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
