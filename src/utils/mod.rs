//! Shared utilities for the SkillSwap API.
//!
//! - [`email`]: SMTP delivery of swap notifications

pub mod email;

pub use email::{EmailService, MatchNotice};
