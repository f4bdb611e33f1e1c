use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_me, get_users, update_me};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/me", get(get_me).patch(update_me))
}
