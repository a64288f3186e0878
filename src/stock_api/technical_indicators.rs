use serde::{Deserialize, Serialize};

use super::types::StockData;

/// Periods for the two oscillators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub stoch_k: usize,
    pub stoch_k_smooth: usize,
    pub stoch_d: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            stoch_k: 14,
            stoch_k_smooth: 3,
            stoch_d: 3,
        }
    }
}

pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

pub struct StochasticSeries {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

pub struct Oscillators {
    pub macd: MacdSeries,
    pub stochastic: StochasticSeries,
}

pub fn calculate_oscillators(data: &[StockData], config: &IndicatorConfig) -> Oscillators {
    let closes: Vec<f64> = data.iter().map(|d| d.close).collect();

    Oscillators {
        macd: calculate_macd(&closes, config.macd_fast, config.macd_slow, config.macd_signal),
        stochastic: calculate_stochastic(data, config.stoch_k, config.stoch_k_smooth, config.stoch_d),
    }
}

/// Simple moving average over the defined values of `data`.
///
/// The window starts at the first `Some`; any gap after that restarts the window.
pub fn calculate_sma(data: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; data.len()];
    if period == 0 {
        return result;
    }

    let mut run = 0usize;
    for i in 0..data.len() {
        if data[i].is_some() {
            run += 1;
        } else {
            run = 0;
            continue;
        }
        if run >= period {
            let sum: f64 = data[i + 1 - period..=i].iter().flatten().sum();
            result[i] = Some(sum / period as f64);
        }
    }

    result
}

/// Exponential moving average seeded with the SMA of the first `period` values.
pub fn calculate_ema(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; data.len()];
    if period == 0 || data.len() < period {
        return result;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema = data[..period].iter().sum::<f64>() / period as f64;
    result[period - 1] = Some(ema);

    for i in period..data.len() {
        ema = (data[i] - ema) * multiplier + ema;
        result[i] = Some(ema);
    }

    result
}

pub fn calculate_macd(data: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let ema_fast = calculate_ema(data, fast);
    let ema_slow = calculate_ema(data, slow);

    let macd_line: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    // Signal EMA runs over the defined MACD values only, then is re-aligned.
    let offset = macd_line.iter().position(Option::is_some).unwrap_or(macd_line.len());
    let defined: Vec<f64> = macd_line[offset..].iter().flatten().copied().collect();
    let mut signal_line = vec![None; offset];
    signal_line.extend(calculate_ema(&defined, signal));

    let histogram: Vec<Option<f64>> = macd_line
        .iter()
        .zip(signal_line.iter())
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m - s),
            _ => None,
        })
        .collect();

    MacdSeries {
        macd: macd_line,
        signal: signal_line,
        histogram,
    }
}

/// Raw %K: position of the close inside the `period` high/low range, 0..=100.
pub fn calculate_fast_k(data: &[StockData], period: usize) -> Vec<Option<f64>> {
    let mut k_values = vec![None; data.len()];
    if period == 0 || data.len() < period {
        return k_values;
    }

    for i in (period - 1)..data.len() {
        let window = &data[(i + 1 - period)..=i];
        let high = window.iter().map(|d| d.high).fold(f64::NEG_INFINITY, f64::max);
        let low = window.iter().map(|d| d.low).fold(f64::INFINITY, f64::min);
        let range = high - low;

        k_values[i] = if range > 0.0 {
            Some((data[i].close - low) / range * 100.0)
        } else {
            Some(0.0)
        };
    }

    k_values
}

/// Slow stochastic: %K is the fast %K smoothed over `k_smooth`, %D the SMA of %K over `d_period`.
pub fn calculate_stochastic(
    data: &[StockData],
    k_period: usize,
    k_smooth: usize,
    d_period: usize,
) -> StochasticSeries {
    let fast_k = calculate_fast_k(data, k_period);
    let k = calculate_sma(&fast_k, k_smooth);
    let d = calculate_sma(&k, d_period);

    StochasticSeries { k, d }
}
