pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/filters", get(handlers::handle_list_filters))
        .route("/api/v1/screen", post(handlers::handle_screen))
        .route("/api/v1/screen/pdf", post(handlers::handle_screen_pdf))
        .route(
            "/api/v1/settings",
            get(handlers::handle_get_settings).put(handlers::handle_put_settings),
        )
        .with_state(state)
}
