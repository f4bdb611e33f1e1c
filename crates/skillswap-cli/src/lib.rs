//! # SkillSwap CLI
//!
//! Seeding and account utilities for SkillSwap development databases.
//!
//! ## Usage
//!
//! ```ignore
//! use skillswap_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(50).with_requests_per_user(3);
//! seed_all(&pool, config).await?;
//! ```

pub mod accounts;
pub mod seeder;
