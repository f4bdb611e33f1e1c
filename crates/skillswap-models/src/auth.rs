//! Authentication DTOs and responses.

use serde::{Deserialize, Serialize};
use skillswap_core::ResponseStatus;
use utoipa::ToSchema;
use validator::Validate;

use crate::users::{User, UserData};

/// Login request with email and password.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret123")]
    pub password: String,
}

/// Successful signup or login: a bearer token plus the caller's profile.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub status: ResponseStatus,
    pub token: String,
    pub data: UserData,
}

impl AuthResponse {
    pub fn new(token: String, user: User) -> Self {
        Self {
            status: ResponseStatus::Success,
            token,
            data: UserData { user },
        }
    }
}
