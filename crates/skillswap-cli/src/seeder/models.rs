//! Data models for database seeding configuration.

use skillswap_models::{SwapStatus, UserId};

/// Seed data for creating a user.
pub struct UserSeed {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub instagram: Option<String>,
    pub telegram: Option<String>,
    pub twitter: Option<String>,
    pub phone: Option<String>,
}

impl UserSeed {
    pub fn has_contact(&self) -> bool {
        self.phone.is_some()
            || self.instagram.is_some()
            || self.telegram.is_some()
            || self.twitter.is_some()
    }
}

/// Seed data for creating a swap request.
pub struct SwapRequestSeed {
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub message: String,
    pub status: SwapStatus,
}

/// Complete configuration for database seeding.
#[derive(Clone)]
pub struct SeedConfig {
    pub num_users: usize,
    pub requests_per_user: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_users: 50,
            requests_per_user: 2,
        }
    }
}

impl SeedConfig {
    pub fn new(num_users: usize) -> Self {
        Self {
            num_users,
            ..Default::default()
        }
    }

    pub fn with_requests_per_user(mut self, requests_per_user: usize) -> Self {
        self.requests_per_user = requests_per_user;
        self
    }

    /// Upper bound on generated requests. Each user can only target the
    /// `num_users - 1` others.
    pub fn max_requests(&self) -> usize {
        self.num_users * self.requests_per_user.min(self.num_users.saturating_sub(1))
    }
}
