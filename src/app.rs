use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/action", post(handlers::form_action))
        .route("/quote/refresh", post(handlers::form_refresh_quote))
        .route("/api/state", get(handlers::get_state))
        .route("/api/action", post(handlers::api_action))
        .route("/api/quote", get(handlers::get_quote))
        .route("/api/quote/refresh", post(handlers::refresh_quote))
        .with_state(state)
}
