use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::SeriesFetcher;
use crate::stock_api::error::FetchError;
use crate::stock_api::http_client::build_http_client;
use crate::stock_api::types::StockData;
use crate::stock_api::utils::{format_timestamp, Interval};

pub const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i32,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

/// Parse a chart API body into bars, dropping rows with any missing price.
pub fn parse_chart_response(body: &str, interval: Interval) -> Result<Vec<StockData>, FetchError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    if let Some(error) = response.chart.error {
        return Err(FetchError::Api {
            code: error.code,
            description: error.description,
        });
    }

    let results = response.chart.result.ok_or(FetchError::NoData)?;
    let data = results.first().ok_or(FetchError::NoData)?;
    let columns = data.indicators.quote.first().ok_or(FetchError::NoData)?;
    let intraday = interval.is_intraday();

    let mut result = Vec::with_capacity(data.timestamp.len());
    for (i, &timestamp) in data.timestamp.iter().enumerate() {
        let open = columns.open.get(i).copied().flatten();
        let high = columns.high.get(i).copied().flatten();
        let low = columns.low.get(i).copied().flatten();
        let close = columns.close.get(i).copied().flatten();

        if let (Some(open), Some(high), Some(low), Some(close)) = (open, high, low, close) {
            result.push(StockData {
                date: format_timestamp(timestamp, data.meta.gmtoffset, intraday),
                timestamp,
                open,
                high,
                low,
                close,
                volume: columns.volume.get(i).copied().flatten().unwrap_or(0),
            });
        }
    }

    if result.is_empty() {
        return Err(FetchError::NoData);
    }

    Ok(result)
}

/// Yahoo chart API client.
pub struct YahooFetcher {
    client: reqwest::Client,
    base_url: String,
    retries: u32,
}

impl YahooFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration, retries: u32) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retries: retries.max(1),
        })
    }

    pub fn chart_url(&self, symbol: &str, interval: Interval, period: &str) -> String {
        format!(
            "{}/{}?interval={}&range={}",
            self.base_url,
            urlencoding::encode(symbol.trim()),
            interval,
            urlencoding::encode(period.trim()),
        )
    }

    async fn fetch_once(&self, url: &str, interval: Interval) -> Result<Vec<StockData>, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // The chart API reports bad symbols as 404 with an error payload.
        if !status.is_success() {
            return match parse_chart_response(&body, interval) {
                Err(e @ FetchError::Api { .. }) => Err(e),
                _ => Err(FetchError::Status(status.as_u16())),
            };
        }

        parse_chart_response(&body, interval)
    }
}

#[async_trait]
impl SeriesFetcher for YahooFetcher {
    async fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        period: &str,
    ) -> Result<Vec<StockData>, FetchError> {
        let url = self.chart_url(symbol, interval, period);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.fetch_once(&url, interval).await {
                Ok(data) => {
                    tracing::debug!(symbol, %interval, period, bars = data.len(), "fetched series");
                    return Ok(data);
                }
                Err(e) if e.is_retryable() && attempt < self.retries => {
                    tracing::info!(symbol, attempt, error = %e, "fetch failed, retrying");
                    tokio::time::sleep(Duration::from_millis(500 * attempt as u64)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn signature(&self) -> &'static str {
        "Yahoo chart API"
    }
}
