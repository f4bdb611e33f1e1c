//! Wire envelope and client-side views over API payloads.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use skillswap_models::{
    PublicProfile, SwapRequestView, SwapStatus, User, UserFilterParams, UserId, UserRef,
};

use crate::error::{ClientError, Result};

/// `{status, token?, results?, data?, code?, message?}`
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub results: Option<usize>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> Result<T> {
        self.data
            .ok_or_else(|| ClientError::Parse("response has no data".to_string()))
    }
}

/// Parses a 2xx body.
pub fn parse_success<T: DeserializeOwned>(body: &str) -> Result<Envelope<T>> {
    serde_json::from_str(body).map_err(|e| ClientError::Parse(e.to_string()))
}

/// Turns a non-2xx body into [`ClientError::Api`], keeping the raw text when
/// it is not an envelope.
pub fn parse_failure(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<Envelope<serde_json::Value>>(body) {
        Ok(envelope) => ClientError::Api {
            status,
            code: envelope.code,
            message: envelope
                .message
                .unwrap_or_else(|| format!("Request failed with status {}", status)),
        },
        Err(_) => ClientError::Api {
            status,
            code: None,
            message: if body.trim().is_empty() {
                format!("Request failed with status {}", status)
            } else {
                body.to_string()
            },
        },
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserPayload {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsersPayload {
    pub users: Vec<PublicProfile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RequestPayload {
    pub request: SwapRequestView,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RequestsPayload {
    pub requests: Vec<SwapRequestView>,
}

/// Token and profile returned by signup and login.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub user: User,
}

/// Query pairs for `GET /users`, blanks omitted.
pub fn filter_query(filters: &UserFilterParams) -> Vec<(&'static str, String)> {
    [
        ("name", &filters.name),
        ("email", &filters.email),
        ("skillsOffered", &filters.skills_offered),
        ("skillsWanted", &filters.skills_wanted),
    ]
    .into_iter()
    .filter_map(|(key, value)| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| (key, v.to_string()))
    })
    .collect()
}

/// Drops the signed-in user from a browse list.
pub fn exclude_user(users: Vec<PublicProfile>, me: Option<UserId>) -> Vec<PublicProfile> {
    match me {
        Some(me) => users.into_iter().filter(|u| u.id != me).collect(),
        None => users,
    }
}

/// The other party of `request` as seen by `me`.
pub fn counterpart(request: &SwapRequestView, me: UserId) -> &UserRef {
    if request.from_user.id() == me {
        &request.to_user
    } else {
        &request.from_user
    }
}

/// Contact details are only ever present on accepted requests.
pub fn is_match(request: &SwapRequestView) -> bool {
    request.status == SwapStatus::Accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use skillswap_models::{SwapRequestId, UserSummary};

    fn profile(id: UserId, name: &str) -> PublicProfile {
        PublicProfile {
            id,
            name: name.to_string(),
            bio: None,
            skills_offered: vec![],
            skills_wanted: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_failure_reads_envelope() {
        let body = r#"{"status":"fail","code":"DuplicateRequest","message":"You have already sent a request to this user"}"#;
        match parse_failure(400, body) {
            ClientError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(code.as_deref(), Some("DuplicateRequest"));
                assert_eq!(message, "You have already sent a request to this user");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_failure_keeps_plain_text() {
        let err = parse_failure(405, "Method Not Allowed");
        assert_eq!(err.to_string(), "Method Not Allowed");
        assert_eq!(err.code(), None);

        let err = parse_failure(502, "");
        assert_eq!(err.to_string(), "Request failed with status 502");
    }

    #[test]
    fn test_parse_success_list_envelope() {
        let id = UserId::new();
        let body = format!(
            r#"{{"status":"success","results":1,"data":{{"users":[{{"id":"{}","name":"Ada","bio":null,"skillsOffered":["rust"],"skillsWanted":[],"createdAt":"2026-01-01T00:00:00Z"}}]}}}}"#,
            id
        );
        let envelope: Envelope<UsersPayload> = parse_success(&body).unwrap();
        assert_eq!(envelope.results, Some(1));

        let users = envelope.into_data().unwrap().users;
        assert_eq!(users[0].id, id);
        assert_eq!(users[0].skills_offered, vec!["rust"]);
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: Envelope<UsersPayload> =
            parse_success(r#"{"status":"success","message":"ok"}"#).unwrap();
        assert!(envelope.into_data().is_err());
    }

    #[test]
    fn test_filter_query_skips_blanks() {
        let filters = UserFilterParams {
            name: Some("  ada ".into()),
            email: Some("   ".into()),
            skills_offered: None,
            skills_wanted: Some("guitar".into()),
        };
        assert_eq!(
            filter_query(&filters),
            vec![
                ("name", "ada".to_string()),
                ("skillsWanted", "guitar".to_string())
            ]
        );
    }

    #[test]
    fn test_exclude_user() {
        let me = UserId::new();
        let other = UserId::new();
        let users = vec![profile(me, "Me"), profile(other, "Other")];

        let browse = exclude_user(users.clone(), Some(me));
        assert_eq!(browse.len(), 1);
        assert_eq!(browse[0].id, other);

        assert_eq!(exclude_user(users, None).len(), 2);
    }

    #[test]
    fn test_counterpart_depends_on_viewer() {
        let me = UserId::new();
        let them = UserId::new();
        let now = Utc::now();
        let request = SwapRequestView {
            id: SwapRequestId::new(),
            from_user: UserRef::Id(me),
            to_user: UserRef::Summary(UserSummary {
                id: them,
                name: "Grace".into(),
                skills_offered: None,
                skills_wanted: None,
                bio: None,
                phone: Some("555-0100".into()),
                social_links: None,
            }),
            message: String::new(),
            status: SwapStatus::Accepted,
            created_at: now,
            updated_at: now,
        };

        assert_eq!(counterpart(&request, me).id(), them);
        assert_eq!(counterpart(&request, them).id(), me);
        assert!(is_match(&request));
    }
}
