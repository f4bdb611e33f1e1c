//! User directory models and DTOs.
//!
//! A user row is read through several shapes depending on who is looking:
//!
//! - [`User`]: the owner's own profile (everything except the password hash)
//! - [`PublicProfile`]: what the public directory listing exposes
//! - [`UserCard`]: the superset loaded when enriching swap requests, narrowed
//!   per read path with a [`UserProjection`]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skillswap_core::AppError;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::UserId;
use crate::value_types::Email;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_BIO_LEN: usize = 500;
pub const MAX_PHONE_LEN: usize = 32;
pub const MAX_SOCIAL_HANDLE_LEN: usize = 100;

pub const CONTACT_REQUIRED_MESSAGE: &str =
    "Please provide a phone number or at least one social media link";

/// Optional social media handles, stored as three nullable columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SocialLinks {
    #[schema(example = "ada.codes")]
    pub instagram: Option<String>,
    pub telegram: Option<String>,
    pub twitter: Option<String>,
}

impl SocialLinks {
    /// Trims every handle and drops the ones left empty.
    pub fn normalized(self) -> Result<Self, AppError> {
        Ok(Self {
            instagram: normalize_handle("instagram", self.instagram)?,
            telegram: normalize_handle("telegram", self.telegram)?,
            twitter: normalize_handle("twitter", self.twitter)?,
        })
    }

    pub fn has_any(&self) -> bool {
        [&self.instagram, &self.telegram, &self.twitter]
            .iter()
            .any(|handle| handle.as_deref().is_some_and(|h| !h.trim().is_empty()))
    }
}

fn normalize_handle(field: &str, handle: Option<String>) -> Result<Option<String>, AppError> {
    let Some(handle) = normalize_optional_text(handle) else {
        return Ok(None);
    };

    if handle.chars().count() > MAX_SOCIAL_HANDLE_LEN {
        return Err(AppError::validation(anyhow::anyhow!(
            "{} handle must be at most {} characters",
            field,
            MAX_SOCIAL_HANDLE_LEN
        )));
    }

    Ok(Some(handle))
}

/// Trims the value, treating an empty result as absent.
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims each skill and drops blanks, keeping the caller's order.
pub fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub(crate) fn normalize_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation(anyhow::anyhow!("Name is required")));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(anyhow::anyhow!(
            "Name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

/// The authenticated user's own profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub bio: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    #[sqlx(flatten)]
    pub social_links: SocialLinks,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user row together with its password hash. Only used for login.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithPassword {
    #[sqlx(flatten)]
    pub user: User,
    pub password: String,
}

/// What the public directory listing returns for each user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: UserId,
    pub name: String,
    pub bio: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Every field a swap-request view may disclose about a user.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserCard {
    pub id: UserId,
    pub name: String,
    pub bio: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    #[sqlx(flatten)]
    pub social_links: SocialLinks,
    pub phone: Option<String>,
}

/// Field allow-list applied to a [`UserCard`] on a given read path.
///
/// `id` and `name` are always included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserProjection {
    pub skills_offered: bool,
    pub skills_wanted: bool,
    pub bio: bool,
    pub contact: bool,
}

impl UserProjection {
    pub const NAME_ONLY: Self = Self {
        skills_offered: false,
        skills_wanted: false,
        bio: false,
        contact: false,
    };

    /// Sender as shown in the response to a freshly created request.
    pub const CREATED_SENDER: Self = Self {
        skills_offered: true,
        ..Self::NAME_ONLY
    };

    /// Sender as shown in the recipient's inbox.
    pub const RECEIVED_SENDER: Self = Self {
        skills_offered: true,
        bio: true,
        ..Self::NAME_ONLY
    };

    /// Recipient as shown in the sender's outbox.
    pub const SENT_RECIPIENT: Self = Self {
        skills_wanted: true,
        bio: true,
        ..Self::NAME_ONLY
    };

    pub const fn with_contact(self, disclose: bool) -> Self {
        Self {
            contact: self.contact || disclose,
            ..self
        }
    }
}

/// A [`UserCard`] narrowed by a [`UserProjection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_offered: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_wanted: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
}

impl UserCard {
    pub fn project(&self, projection: UserProjection) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            skills_offered: projection
                .skills_offered
                .then(|| self.skills_offered.clone()),
            skills_wanted: projection.skills_wanted.then(|| self.skills_wanted.clone()),
            bio: if projection.bio {
                self.bio.clone()
            } else {
                None
            },
            phone: if projection.contact {
                self.phone.clone()
            } else {
                None
            },
            social_links: projection.contact.then(|| self.social_links.clone()),
        }
    }
}

/// DTO for `POST /auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Trimmed and lowercased before storage
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret123")]
    pub password: String,
    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,
    pub social_links: Option<SocialLinks>,
    #[serde(default)]
    pub skills_offered: Vec<String>,
    #[serde(default)]
    pub skills_wanted: Vec<String>,
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,
}

/// A normalized registration, ready to be hashed and inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password: String,
    pub bio: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub social_links: SocialLinks,
    pub phone: Option<String>,
}

impl SignupDto {
    /// Normalizes every field and enforces the contact rule: a phone number
    /// or at least one social handle must survive trimming.
    pub fn into_new_user(self) -> Result<NewUser, AppError> {
        let name = normalize_name(&self.name)?;
        let email = Email::new(self.email)
            .map_err(|_| AppError::validation(anyhow::anyhow!("Please provide a valid email")))?;
        let phone = normalize_optional_text(self.phone);
        let social_links = self.social_links.unwrap_or_default().normalized()?;

        if phone.is_none() && !social_links.has_any() {
            return Err(AppError::validation(anyhow::anyhow!(
                CONTACT_REQUIRED_MESSAGE
            )));
        }

        Ok(NewUser {
            name,
            email,
            password: self.password,
            bio: normalize_optional_text(self.bio),
            skills_offered: normalize_skills(self.skills_offered),
            skills_wanted: normalize_skills(self.skills_wanted),
            social_links,
            phone,
        })
    }
}

/// DTO for `PATCH /users/me`.
///
/// Only the allow-listed fields deserialize; anything else in the body
/// (email, password, phone, ...) is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_offered: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_wanted: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
}

/// The normalized set of columns a profile update will write.
///
/// `bio: Some(None)` clears the bio.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub bio: Option<Option<String>>,
    pub skills_offered: Option<Vec<String>>,
    pub skills_wanted: Option<Vec<String>>,
    pub social_links: Option<SocialLinks>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.bio.is_none()
            && self.skills_offered.is_none()
            && self.skills_wanted.is_none()
            && self.social_links.is_none()
    }
}

impl UpdateProfileDto {
    pub fn into_changes(self) -> Result<ProfileChanges, AppError> {
        Ok(ProfileChanges {
            name: self.name.as_deref().map(normalize_name).transpose()?,
            bio: self.bio.map(|bio| normalize_optional_text(Some(bio))),
            skills_offered: self.skills_offered.map(normalize_skills),
            skills_wanted: self.skills_wanted.map(normalize_skills),
            social_links: self.social_links.map(SocialLinks::normalized).transpose()?,
        })
    }
}

/// Query parameters for `GET /users`.
///
/// All filters are optional and combine with AND. Unknown parameters are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct UserFilterParams {
    /// Exact name match
    pub name: Option<String>,
    /// Exact email match, case-insensitive
    pub email: Option<String>,
    /// Users whose offered skills contain this value
    pub skills_offered: Option<String>,
    /// Users whose wanted skills contain this value
    pub skills_wanted: Option<String>,
}

impl UserFilterParams {
    /// Drops blank filter values and lowercases the email filter.
    pub fn normalized(self) -> Self {
        Self {
            name: normalize_optional_text(self.name),
            email: normalize_optional_text(self.email).map(|e| e.to_lowercase()),
            skills_offered: normalize_optional_text(self.skills_offered),
            skills_wanted: normalize_optional_text(self.skills_wanted),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserData {
    pub user: User,
}

/// Envelope for a single self profile.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub status: skillswap_core::ResponseStatus,
    pub data: UserData,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsersData {
    pub users: Vec<PublicProfile>,
}

/// Envelope for the directory listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UsersResponse {
    pub status: skillswap_core::ResponseStatus,
    pub results: usize,
    pub data: UsersData,
}
