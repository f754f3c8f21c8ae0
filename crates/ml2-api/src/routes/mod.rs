use std::sync::Arc;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

mod export;
mod health;
mod simulate;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/baseline", get(simulate::get_baseline))
        .route("/instruments", get(simulate::get_instruments))
        .route("/simulate", post(simulate::run_simulation))
        .route("/export/csv", post(export::export_csv))
        .route("/export/excel", post(export::export_excel))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
