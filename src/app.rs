use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/entries", post(handlers::entry_form))
        .route("/api/products", get(handlers::get_products))
        .route("/api/entries", post(handlers::create_entry))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .with_state(state)
}
