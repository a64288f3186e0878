mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{analysis_config, intraday_window, rising_series, StubFetcher};
use taiex_analyzer::commands::{router, AppState};
use taiex_analyzer::stock_api::{AnalysisResult, AnalysisService, INPUT_ERROR_LABEL};

fn app(fetcher: Arc<StubFetcher>) -> axum::Router {
    router(AppState {
        service: AnalysisService::new(fetcher, analysis_config()),
    })
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn get_renders_empty_form() {
    let fetcher = Arc::new(StubFetcher::new(rising_series(80), intraday_window()));
    let response = app(fetcher.clone())
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(r#"name="buy_oi""#));
    assert!(!html.contains("Chip analysis"));
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn post_form_renders_result() {
    let fetcher = Arc::new(StubFetcher::new(rising_series(80), intraday_window()));
    let request = Request::post("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("buy_oi=5&sell_oi=-3&pc_ratio=0.8&foreign_buy=10"))
        .unwrap();

    let response = app(fetcher).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<b>Overall: bullish</b>"), "{html}");
    assert!(html.contains("<li>MACD bullish trend</li>"), "{html}");
    assert!(html.contains("Support: ~10.00, Resistance: ~58.00"), "{html}");
}

#[tokio::test]
async fn post_bad_form_renders_diagnostic() {
    let fetcher = Arc::new(StubFetcher::new(rising_series(80), intraday_window()));
    let request = Request::post("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("buy_oi=5&sell_oi=-3&pc_ratio=high&foreign_buy=10"))
        .unwrap();

    let response = app(fetcher.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(INPUT_ERROR_LABEL));
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn json_endpoint_returns_result() {
    let fetcher = Arc::new(StubFetcher::new(rising_series(80), intraday_window()));
    let request = Request::post("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"buy_oi":"0","sell_oi":"0","pc_ratio":"1.5","foreign_buy":"0"}"#,
        ))
        .unwrap();

    let response = app(fetcher).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let result: AnalysisResult = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(result.chips, vec!["bearish (P/C ratio > 1)"]);
    assert_eq!(result.chips_final, "Overall: bearish");
    assert_eq!(result.tech.len(), 2);
}

#[tokio::test]
async fn json_endpoint_missing_field() {
    let fetcher = Arc::new(StubFetcher::new(rising_series(80), intraday_window()));
    let request = Request::post("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"buy_oi":"1","sell_oi":"2","pc_ratio":"0.9"}"#))
        .unwrap();

    let response = app(fetcher).oneshot(request).await.unwrap();

    let result: AnalysisResult = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(result.chips, vec![INPUT_ERROR_LABEL]);
    assert_eq!(result.chips_final, "missing field: foreign_buy");
    assert!(result.tech.is_empty());
    assert_eq!(result.sr, "");
}

#[tokio::test]
async fn json_endpoint_accepts_numbers() {
    let fetcher = Arc::new(StubFetcher::new(rising_series(80), intraday_window()));
    let request = Request::post("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"buy_oi":5,"sell_oi":-3,"pc_ratio":0.8,"foreign_buy":10}"#))
        .unwrap();

    let response = app(fetcher.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let result: AnalysisResult = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(result.chips.len(), 3);
    assert_eq!(result.chips_final, "Overall: bullish");
    assert_eq!(result.tech.len(), 2);
    assert_eq!(fetcher.call_count(), 2);
}

#[tokio::test]
async fn json_endpoint_malformed_body_is_diagnostic() {
    let fetcher = Arc::new(StubFetcher::new(rising_series(80), intraday_window()));
    let request = Request::post("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"buy_oi": 5, "sell_oi""#))
        .unwrap();

    let response = app(fetcher.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let result: AnalysisResult = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(result.chips, vec![INPUT_ERROR_LABEL]);
    assert!(!result.chips_final.is_empty());
    assert!(result.tech.is_empty());
    assert_eq!(result.sr, "");
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn json_endpoint_wrong_value_type_is_diagnostic() {
    let fetcher = Arc::new(StubFetcher::new(rising_series(80), intraday_window()));
    let request = Request::post("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"buy_oi":true,"sell_oi":-3,"pc_ratio":0.8,"foreign_buy":10}"#))
        .unwrap();

    let response = app(fetcher.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let result: AnalysisResult = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(result.chips, vec![INPUT_ERROR_LABEL]);
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn post_without_form_content_type_renders_diagnostic() {
    let fetcher = Arc::new(StubFetcher::new(rising_series(80), intraday_window()));
    let request = Request::post("/")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("buy_oi=5&sell_oi=-3&pc_ratio=0.8&foreign_buy=10"))
        .unwrap();

    let response = app(fetcher.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(INPUT_ERROR_LABEL), "{html}");
    assert!(html.contains(r#"name="buy_oi""#));
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn health_reports_alive() {
    let fetcher = Arc::new(StubFetcher::new(Vec::new(), Vec::new()));
    let response = app(fetcher)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "alive");
}
