use std::fmt;

use super::data::SeriesFetcher;
use super::error::AnalysisError;
use super::technical_indicators::{calculate_oscillators, IndicatorConfig};
use super::types::SeriesRequest;

/// Crossover state of a line against its companion over the last two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossSignal {
    GoldenCross,
    DeathCross,
    BullishTrend,
    BearishTrend,
    Flat,
}

impl fmt::Display for CrossSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CrossSignal::GoldenCross => "golden cross (bullish)",
            CrossSignal::DeathCross => "death cross (bearish)",
            CrossSignal::BullishTrend => "bullish trend",
            CrossSignal::BearishTrend => "bearish trend",
            CrossSignal::Flat => "flat (consolidation)",
        };
        f.write_str(s)
    }
}

/// First matching rule wins. Comparisons are exact; equal values are `Flat`.
pub fn classify_cross(prev: (f64, f64), cur: (f64, f64)) -> CrossSignal {
    let (prev_line, prev_comp) = prev;
    let (cur_line, cur_comp) = cur;

    if cur_line > cur_comp && prev_line < prev_comp {
        CrossSignal::GoldenCross
    } else if cur_line < cur_comp && prev_line > prev_comp {
        CrossSignal::DeathCross
    } else if cur_line > cur_comp {
        CrossSignal::BullishTrend
    } else if cur_line < cur_comp {
        CrossSignal::BearishTrend
    } else {
        CrossSignal::Flat
    }
}

/// Last two positions where both lines are defined, oldest first.
pub fn last_two_valid(
    line: &[Option<f64>],
    companion: &[Option<f64>],
) -> Option<((f64, f64), (f64, f64))> {
    let mut valid = line
        .iter()
        .zip(companion.iter())
        .rev()
        .filter_map(|(l, c)| Some(((*l)?, (*c)?)));
    let cur = valid.next()?;
    let prev = valid.next()?;
    Some((prev, cur))
}

pub fn classify_pair(
    indicator: &'static str,
    line: &[Option<f64>],
    companion: &[Option<f64>],
) -> Result<CrossSignal, AnalysisError> {
    let (prev, cur) = last_two_valid(line, companion).ok_or_else(|| {
        let available = line
            .iter()
            .zip(companion.iter())
            .filter(|(l, c)| l.is_some() && c.is_some())
            .count();
        AnalysisError::InsufficientData {
            indicator,
            needed: 2,
            available,
        }
    })?;
    Ok(classify_cross(prev, cur))
}

pub fn signal_label(indicator: &str, signal: CrossSignal) -> String {
    format!("{} {}", indicator, signal)
}

pub async fn try_analyze_tech(
    fetcher: &dyn SeriesFetcher,
    request: &SeriesRequest,
    config: &IndicatorConfig,
) -> Result<[String; 2], AnalysisError> {
    let data = fetcher
        .fetch(&request.symbol, request.interval, &request.period)
        .await?;
    let oscillators = calculate_oscillators(&data, config);

    let macd = classify_pair("MACD", &oscillators.macd.macd, &oscillators.macd.signal)?;
    let kd = classify_pair("KD", &oscillators.stochastic.k, &oscillators.stochastic.d)?;

    let histogram = oscillators.macd.histogram.iter().rev().find_map(|v| *v);
    tracing::debug!(symbol = %request.symbol, bars = data.len(), ?macd, ?histogram, ?kd, "technical signals");

    Ok([signal_label("MACD", macd), signal_label("KD", kd)])
}

/// Two labels on success, a single diagnostic label on failure.
pub async fn analyze_tech(
    fetcher: &dyn SeriesFetcher,
    request: &SeriesRequest,
    config: &IndicatorConfig,
) -> Vec<String> {
    match try_analyze_tech(fetcher, request, config).await {
        Ok(labels) => labels.to_vec(),
        Err(e) => {
            tracing::warn!(symbol = %request.symbol, error = %e, "technical analysis failed");
            vec![format!("technical analysis error: {}", e)]
        }
    }
}
