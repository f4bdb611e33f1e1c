//! Swap-request ledger models and the request lifecycle.
//!
//! ```text
//! pending ──▶ accepted
//!    │
//!    └─────▶ rejected
//! ```
//!
//! Only the recipient moves a request out of `pending`, and only once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skillswap_core::ResponseStatus;
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{SwapRequestId, UserId};
use crate::users::UserSummary;

pub const MAX_MESSAGE_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "swap_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
}

impl SwapStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Applies a recipient's decision.
    ///
    /// The target is checked before the current state, so a bad target is
    /// reported even on a request that is already resolved.
    pub fn transition(self, target: SwapStatus) -> Result<SwapStatus, TransitionError> {
        if !target.is_terminal() {
            return Err(TransitionError::InvalidTarget);
        }
        if self.is_terminal() {
            return Err(TransitionError::AlreadyResolved(self));
        }
        Ok(target)
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for SwapStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    InvalidTarget,
    AlreadyResolved(SwapStatus),
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget => f.write_str("Status must be either 'accepted' or 'rejected'"),
            Self::AlreadyResolved(status) => {
                write!(f, "This request has already been {}", status)
            }
        }
    }
}

impl std::error::Error for TransitionError {}

/// A ledger row. Users are referenced by id only.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SwapRequest {
    pub id: SwapRequestId,
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub message: String,
    pub status: SwapStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user reference in a swap-request view: a projected summary where the
/// read path enriches that side, the bare id where it does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum UserRef {
    Summary(UserSummary),
    Id(UserId),
}

impl UserRef {
    pub fn id(&self) -> UserId {
        match self {
            Self::Summary(summary) => summary.id,
            Self::Id(id) => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequestView {
    pub id: SwapRequestId,
    pub from_user: UserRef,
    pub to_user: UserRef,
    pub message: String,
    pub status: SwapStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SwapRequest {
    pub fn into_view(self, from_user: UserRef, to_user: UserRef) -> SwapRequestView {
        SwapRequestView {
            id: self.id,
            from_user,
            to_user,
            message: self.message,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// DTO for `POST /swap-requests`.
///
/// `toUserId` stays a string so that a malformed id is reported as an
/// unknown user rather than a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSwapRequestDto {
    #[validate(length(min = 1, message = "toUserId is required"))]
    #[schema(example = "6f1c2a8e-3b7d-4c1e-9a53-0d2f8b7e4c11")]
    pub to_user_id: String,
    #[validate(length(max = 200, message = "Message must be at most 200 characters"))]
    #[schema(example = "Happy to trade guitar lessons for Rust reviews")]
    pub message: Option<String>,
}

impl CreateSwapRequestDto {
    pub fn message(&self) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    }
}

/// DTO for `PATCH /swap-requests/{id}`.
///
/// `status` accepts any JSON value so that a wrong type is reported as an
/// invalid status, after the request and actor checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSwapStatusDto {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "accepted")]
    pub status: Option<serde_json::Value>,
}

impl UpdateSwapStatusDto {
    pub fn new(status: SwapStatus) -> Self {
        Self {
            status: Some(serde_json::Value::String(status.as_str().to_string())),
        }
    }

    /// The requested target, `InvalidTarget` when missing or unrecognized.
    pub fn target(&self) -> Result<SwapStatus, TransitionError> {
        self.status
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .and_then(|s| s.parse().ok())
            .ok_or(TransitionError::InvalidTarget)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SwapRequestData {
    pub request: SwapRequestView,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SwapRequestResponse {
    pub status: ResponseStatus,
    pub data: SwapRequestData,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SwapRequestsData {
    pub requests: Vec<SwapRequestView>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SwapRequestsResponse {
    pub status: ResponseStatus,
    pub results: usize,
    pub data: SwapRequestsData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_can_be_accepted_or_rejected() {
        assert_eq!(
            SwapStatus::Pending.transition(SwapStatus::Accepted),
            Ok(SwapStatus::Accepted)
        );
        assert_eq!(
            SwapStatus::Pending.transition(SwapStatus::Rejected),
            Ok(SwapStatus::Rejected)
        );
    }

    #[test]
    fn test_terminal_states_are_final() {
        for current in [SwapStatus::Accepted, SwapStatus::Rejected] {
            for target in [SwapStatus::Accepted, SwapStatus::Rejected] {
                assert_eq!(
                    current.transition(target),
                    Err(TransitionError::AlreadyResolved(current))
                );
            }
        }
    }

    #[test]
    fn test_pending_is_never_a_valid_target() {
        for current in [SwapStatus::Pending, SwapStatus::Accepted] {
            assert_eq!(
                current.transition(SwapStatus::Pending),
                Err(TransitionError::InvalidTarget)
            );
        }
    }

    #[test]
    fn test_already_resolved_message() {
        let err = TransitionError::AlreadyResolved(SwapStatus::Rejected);
        assert_eq!(err.to_string(), "This request has already been rejected");
    }

    #[test]
    fn test_update_dto_target() {
        assert_eq!(
            UpdateSwapStatusDto::new(SwapStatus::Accepted).target(),
            Ok(SwapStatus::Accepted)
        );

        let dto: UpdateSwapStatusDto = serde_json::from_str(r#"{"status":"maybe"}"#).unwrap();
        assert_eq!(dto.target(), Err(TransitionError::InvalidTarget));

        let dto: UpdateSwapStatusDto = serde_json::from_str(r#"{"status":42}"#).unwrap();
        assert_eq!(dto.target(), Err(TransitionError::InvalidTarget));

        for padded in [r#"{"status":" accepted "}"#, r#"{"status":"Rejected"}"#] {
            let dto: UpdateSwapStatusDto = serde_json::from_str(padded).unwrap();
            assert_eq!(dto.target(), Err(TransitionError::InvalidTarget), "{padded}");
        }

        assert_eq!(
            UpdateSwapStatusDto::default().target(),
            Err(TransitionError::InvalidTarget)
        );
    }

    #[test]
    fn test_create_dto_message_length() {
        let dto = CreateSwapRequestDto {
            to_user_id: "x".into(),
            message: Some("é".repeat(200)),
        };
        assert!(dto.validate().is_ok());

        let dto = CreateSwapRequestDto {
            to_user_id: "x".into(),
            message: Some("a".repeat(201)),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_message_defaults_to_empty() {
        let dto: CreateSwapRequestDto =
            serde_json::from_str(r#"{"toUserId":"abc"}"#).unwrap();
        assert_eq!(dto.message(), "");
    }

    #[test]
    fn test_view_serializes_bare_id_for_unenriched_side() {
        let to = UserId::new();
        let summary = UserSummary {
            id: UserId::new(),
            name: "Ada".into(),
            skills_offered: Some(vec!["rust".into()]),
            skills_wanted: None,
            bio: None,
            phone: None,
            social_links: None,
        };
        let now = Utc::now();
        let request = SwapRequest {
            id: SwapRequestId::new(),
            from_user_id: summary.id,
            to_user_id: to,
            message: String::new(),
            status: SwapStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let view = request.into_view(UserRef::Summary(summary), UserRef::Id(to));
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["toUser"], to.to_string());
        assert_eq!(json["fromUser"]["name"], "Ada");
        assert_eq!(json["status"], "pending");
        assert!(json.get("createdAt").is_some());
    }
}
