use serde::{Deserialize, Serialize};
use std::fmt;

use super::utils::Interval;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StockData {
    pub date: String,
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Manually entered option-market figures for one evaluation.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ChipInputs {
    /// Change in call open interest.
    pub call_oi_delta: i64,
    /// Change in put open interest.
    pub put_oi_delta: i64,
    pub put_call_ratio: f64,
    /// Foreign investors' net call position.
    pub foreign_net_call: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Bullish => "bullish",
            Verdict::Bearish => "bearish",
            Verdict::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChipAnalysis {
    pub signals: Vec<String>,
    pub verdict: Verdict,
}

/// Everything one request produces. Built once, never mutated afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnalysisResult {
    pub chips: Vec<String>,
    pub chips_final: String,
    pub tech: Vec<String>,
    pub sr: String,
}

impl AnalysisResult {
    pub fn input_error(message: impl Into<String>) -> Self {
        AnalysisResult {
            chips: vec![INPUT_ERROR_LABEL.to_string()],
            chips_final: message.into(),
            tech: Vec::new(),
            sr: String::new(),
        }
    }
}

pub const INPUT_ERROR_LABEL: &str = "input error or processing failure";

/// Fetch parameters for one series.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SeriesRequest {
    pub symbol: String,
    pub interval: Interval,
    pub period: String,
}
