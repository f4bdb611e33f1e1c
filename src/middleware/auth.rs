use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use skillswap_auth::verify_token;
use skillswap_core::AppError;
use skillswap_models::UserId;
use tracing::debug;

use crate::modules::users::service::UserService;
use crate::state::AppState;

/// Extractor for routes that need a signed-in user.
///
/// Verifies the bearer token and confirms the user it names still exists,
/// so handlers can rely on `user_id` referring to a live account.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
}

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::unauthenticated("You are not logged in. Please log in to get access".into())
        })?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthenticated("Invalid authorization header format".into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = verify_token(token, &state.jwt_config)?;
        let user_id = UserId::from_uuid(claims.user_id()?);

        if !UserService::exists(&state.db, user_id).await? {
            debug!(user.id = %user_id, "Token refers to a deleted user");
            return Err(AppError::unauthenticated(
                "The user belonging to this token no longer exists".into(),
            ));
        }

        Ok(AuthUser { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use skillswap_core::ErrorKind;

    fn parts_with(header_value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/users/me");
        if let Some(value) = header_value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header_is_unauthenticated() {
        let parts = parts_with(None);
        assert_eq!(
            bearer_token(&parts).unwrap_err().kind,
            ErrorKind::Unauthenticated
        );
    }

    #[test]
    fn test_non_bearer_scheme_is_unauthenticated() {
        for value in ["Basic dXNlcjpwYXNz", "Bearer ", "abc.def.ghi"] {
            let parts = parts_with(Some(value));
            assert_eq!(
                bearer_token(&parts).unwrap_err().kind,
                ErrorKind::Unauthenticated,
                "{value}"
            );
        }
    }
}
