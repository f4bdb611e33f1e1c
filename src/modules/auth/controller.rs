use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use skillswap_core::{AppError, ErrorResponse};
use skillswap_models::{AuthResponse, LoginRequest, SignupDto};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Register a new account
///
/// A phone number or at least one social link is required.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupDto,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Validation error or email already registered", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupDto>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let (token, user) = AuthService::signup(&state.db, &state.jwt_config, dto).await?;

    Ok((StatusCode::CREATED, Json(AuthResponse::new(token, user))))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Incorrect email or password", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (token, user) = AuthService::login(&state.db, &state.jwt_config, dto).await?;

    Ok(Json(AuthResponse::new(token, user)))
}
