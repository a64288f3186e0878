use std::fmt;

use super::data::SeriesFetcher;
use super::error::{AnalysisError, FetchError};
use super::types::{SeriesRequest, StockData};

pub const DEFAULT_WINDOW: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportResistance {
    pub support: f64,
    pub resistance: f64,
}

impl fmt::Display for SupportResistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Support: ~{:.2}, Resistance: ~{:.2}",
            self.support, self.resistance
        )
    }
}

/// Lowest low and highest high over the most recent `window` bars.
pub fn calculate_support_resistance(
    data: &[StockData],
    window: usize,
) -> Result<SupportResistance, AnalysisError> {
    let recent = &data[data.len().saturating_sub(window)..];
    if recent.is_empty() {
        return Err(FetchError::NoData.into());
    }

    let support = recent.iter().map(|d| d.low).fold(f64::INFINITY, f64::min);
    let resistance = recent.iter().map(|d| d.high).fold(f64::NEG_INFINITY, f64::max);

    Ok(SupportResistance { support, resistance })
}

pub async fn try_support_resistance(
    fetcher: &dyn SeriesFetcher,
    request: &SeriesRequest,
    window: usize,
) -> Result<SupportResistance, AnalysisError> {
    let data = fetcher
        .fetch(&request.symbol, request.interval, &request.period)
        .await?;
    calculate_support_resistance(&data, window)
}

pub async fn get_support_resistance(
    fetcher: &dyn SeriesFetcher,
    request: &SeriesRequest,
    window: usize,
) -> String {
    match try_support_resistance(fetcher, request, window).await {
        Ok(levels) => levels.to_string(),
        Err(e) => {
            tracing::warn!(symbol = %request.symbol, error = %e, "support/resistance failed");
            format!("support/resistance error: {}", e)
        }
    }
}
