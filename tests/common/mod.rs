#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use taiex_analyzer::config::AnalysisConfig;
use taiex_analyzer::stock_api::{FetchError, Interval, SeriesFetcher, StockData};

/// Serves canned series per interval and counts calls.
pub struct StubFetcher {
    pub daily: Result<Vec<StockData>, String>,
    pub intraday: Result<Vec<StockData>, String>,
    pub calls: AtomicUsize,
}

impl StubFetcher {
    pub fn new(daily: Vec<StockData>, intraday: Vec<StockData>) -> Self {
        Self {
            daily: Ok(daily),
            intraday: Ok(intraday),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            daily: Err(reason.to_string()),
            intraday: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeriesFetcher for StubFetcher {
    async fn fetch(
        &self,
        _symbol: &str,
        interval: Interval,
        _period: &str,
    ) -> Result<Vec<StockData>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let series = if interval.is_intraday() { &self.intraday } else { &self.daily };
        series.clone().map_err(|description| FetchError::Api {
            code: "Not Found".to_string(),
            description,
        })
    }

    fn signature(&self) -> &'static str {
        "stub"
    }
}

pub fn bar(i: usize, high: f64, low: f64, close: f64) -> StockData {
    StockData {
        date: format!("2024-01-{:02}", i % 28 + 1),
        timestamp: 1_704_067_200 + i as i64 * 86_400,
        open: close,
        high,
        low,
        close,
        volume: 1_000,
    }
}

/// `n` bars on an accelerating uptrend, so MACD keeps pulling away from its signal line.
pub fn rising_series(n: usize) -> Vec<StockData> {
    (0..n)
        .map(|i| {
            let c = 17_000.0 + (i * i) as f64;
            bar(i, c + 5.0, c - 5.0, c)
        })
        .collect()
}

/// 20 intraday bars with lows 10, 12, .. and highs 20, 22, ..
pub fn intraday_window() -> Vec<StockData> {
    (0..20)
        .map(|i| bar(i, 20.0 + 2.0 * i as f64, 10.0 + 2.0 * i as f64, 15.0 + 2.0 * i as f64))
        .collect()
}

pub fn analysis_config() -> AnalysisConfig {
    AnalysisConfig::default()
}
