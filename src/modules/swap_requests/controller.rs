use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use skillswap_core::{AppError, ErrorResponse, ResponseStatus};
use skillswap_models::{
    CreateSwapRequestDto, SwapRequestData, SwapRequestResponse, SwapRequestView,
    SwapRequestsData, SwapRequestsResponse, UpdateSwapStatusDto,
};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::{Direction, SwapRequestService};

fn one(request: SwapRequestView) -> Json<SwapRequestResponse> {
    Json(SwapRequestResponse {
        status: ResponseStatus::Success,
        data: SwapRequestData { request },
    })
}

fn many(requests: Vec<SwapRequestView>) -> Json<SwapRequestsResponse> {
    Json(SwapRequestsResponse {
        status: ResponseStatus::Success,
        results: requests.len(),
        data: SwapRequestsData { requests },
    })
}

/// Send a swap request to another user
#[utoipa::path(
    post,
    path = "/api/swap-requests",
    request_body = CreateSwapRequestDto,
    responses(
        (status = 201, description = "Request created", body = SwapRequestResponse),
        (status = 400, description = "Self request, duplicate request or validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Recipient not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Swap Requests"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id))]
pub async fn create_swap_request(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateSwapRequestDto>,
) -> Result<(StatusCode, Json<SwapRequestResponse>), AppError> {
    let request = SwapRequestService::create(&state.db, auth_user.user_id(), dto).await?;

    Ok((StatusCode::CREATED, one(request)))
}

/// List requests sent to the current user
#[utoipa::path(
    get,
    path = "/api/swap-requests/received",
    responses(
        (status = 200, description = "Received requests, newest first", body = SwapRequestsResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Swap Requests"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id))]
pub async fn get_received(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<SwapRequestsResponse>, AppError> {
    let requests =
        SwapRequestService::list(&state.db, auth_user.user_id(), Direction::Received).await?;

    Ok(many(requests))
}

/// List requests the current user has sent
#[utoipa::path(
    get,
    path = "/api/swap-requests/sent",
    responses(
        (status = 200, description = "Sent requests, newest first", body = SwapRequestsResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Swap Requests"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id))]
pub async fn get_sent(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<SwapRequestsResponse>, AppError> {
    let requests = SwapRequestService::list(&state.db, auth_user.user_id(), Direction::Sent).await?;

    Ok(many(requests))
}

/// Accept or reject a received request
#[utoipa::path(
    patch,
    path = "/api/swap-requests/{id}",
    params(
        ("id" = String, Path, description = "Swap request ID")
    ),
    request_body = UpdateSwapStatusDto,
    responses(
        (status = 200, description = "Request resolved", body = SwapRequestResponse),
        (status = 400, description = "Invalid or already applied status", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the recipient", body = ErrorResponse),
        (status = 404, description = "Request not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Swap Requests"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id))]
pub async fn update_swap_request(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<String>,
    ValidatedJson(dto): ValidatedJson<UpdateSwapStatusDto>,
) -> Result<Json<SwapRequestResponse>, AppError> {
    let request = SwapRequestService::transition(
        &state.db,
        &state.email_config,
        &id,
        auth_user.user_id(),
        dto,
    )
    .await?;

    Ok(one(request))
}
