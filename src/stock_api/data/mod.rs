pub mod kline;

pub use kline::*;

use async_trait::async_trait;

use super::error::FetchError;
use super::types::StockData;
use super::utils::Interval;

/// Source of OHLC series for one instrument.
#[async_trait]
pub trait SeriesFetcher: Send + Sync {
    async fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        period: &str,
    ) -> Result<Vec<StockData>, FetchError>;

    fn signature(&self) -> &'static str;
}
