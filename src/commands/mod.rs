pub mod analysis;
pub mod page;

pub use analysis::*;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::stock_api::AnalysisService;

#[derive(Clone)]
pub struct AppState {
    pub service: AnalysisService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .route("/api/analyze", post(analyze_json))
        .route("/health", get(liveness))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
