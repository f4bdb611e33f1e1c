use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{create_swap_request, get_received, get_sent, update_swap_request};

pub fn init_swap_requests_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_swap_request))
        .route("/received", get(get_received))
        .route("/sent", get(get_sent))
        .route("/{id}", patch(update_swap_request))
}
