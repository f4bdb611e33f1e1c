use axum::{Json, extract::State};
use tracing::instrument;

use skillswap_core::{AppError, ErrorResponse, ResponseStatus};
use skillswap_models::{
    UpdateProfileDto, UserData, UserFilterParams, UserResponse, UsersData, UsersResponse,
};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedQuery};

use super::service::UserService;

/// Browse the user directory
///
/// Public. Contact details and email addresses are never included.
#[utoipa::path(
    get,
    path = "/api/users",
    params(UserFilterParams),
    responses(
        (status = 200, description = "List of public profiles", body = UsersResponse),
        (status = 400, description = "Malformed query string", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    ValidatedQuery(filters): ValidatedQuery<UserFilterParams>,
) -> Result<Json<UsersResponse>, AppError> {
    let users = UserService::list_public(&state.db, filters).await?;

    Ok(Json(UsersResponse {
        status: ResponseStatus::Success,
        results: users.len(),
        data: UsersData { users },
    }))
}

/// Get the current user's full profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::get_self(&state.db, auth_user.user_id()).await?;

    Ok(Json(UserResponse {
        status: ResponseStatus::Success,
        data: UserData { user },
    }))
}

/// Update the current user's profile
///
/// Only `name`, `bio`, `skillsOffered`, `skillsWanted` and `socialLinks` are
/// applied. Other fields in the body are ignored.
#[utoipa::path(
    patch,
    path = "/api/users/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id))]
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<UserResponse>, AppError> {
    let changes = dto.into_changes()?;
    let user = UserService::update_self(&state.db, auth_user.user_id(), changes).await?;

    Ok(Json(UserResponse {
        status: ResponseStatus::Success,
        data: UserData { user },
    }))
}
