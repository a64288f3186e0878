use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::State;
use axum::response::Html;
use axum::{Form, Json};

use super::page::render_page;
use super::AppState;
use crate::stock_api::{AnalysisResult, ChipForm};

pub async fn show_form(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.service.config().symbol, None))
}

pub async fn submit_form(
    State(state): State<AppState>,
    form: Result<Form<ChipForm>, FormRejection>,
) -> Html<String> {
    let result = match form {
        Ok(Form(form)) => state.service.analyze_form(&form).await,
        Err(rejection) => {
            tracing::info!(error = %rejection, "rejected form body");
            AnalysisResult::input_error(rejection.body_text())
        }
    };
    Html(render_page(&state.service.config().symbol, Some(&result)))
}

pub async fn analyze_json(
    State(state): State<AppState>,
    form: Result<Json<ChipForm>, JsonRejection>,
) -> Json<AnalysisResult> {
    match form {
        Ok(Json(form)) => Json(state.service.analyze_form(&form).await),
        Err(rejection) => {
            tracing::info!(error = %rejection, "rejected JSON body");
            Json(AnalysisResult::input_error(rejection.body_text()))
        }
    }
}

pub async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
