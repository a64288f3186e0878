use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use super::chip_analysis::{analyze_chips, verdict_line};
use super::data::SeriesFetcher;
use super::error::InputParseError;
use super::support_resistance::get_support_resistance;
use super::technical_signals::analyze_tech;
use super::types::{AnalysisResult, ChipInputs};
use crate::config::AnalysisConfig;

/// Raw chip fields as submitted by the form or the JSON API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChipForm {
    #[serde(default, deserialize_with = "text_or_number")]
    pub buy_oi: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub sell_oi: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub pc_ratio: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub foreign_buy: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Text(String),
    Int(i64),
    Float(f64),
}

/// Accept `"5"` and `5` alike; typing is left to `ChipForm::parse`.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawField>::deserialize(deserializer)?.map(|raw| match raw {
        RawField::Text(s) => s,
        RawField::Int(i) => i.to_string(),
        RawField::Float(f) => f.to_string(),
    }))
}

fn parse_field<T>(field: &'static str, value: Option<&str>) -> Result<T, InputParseError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = value.map(str::trim).filter(|v| !v.is_empty()).ok_or(InputParseError::Missing(field))?;
    raw.parse().map_err(|e: T::Err| InputParseError::Invalid {
        field,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

impl ChipForm {
    pub fn parse(&self) -> Result<ChipInputs, InputParseError> {
        Ok(ChipInputs {
            call_oi_delta: parse_field("buy_oi", self.buy_oi.as_deref())?,
            put_oi_delta: parse_field("sell_oi", self.sell_oi.as_deref())?,
            put_call_ratio: parse_field("pc_ratio", self.pc_ratio.as_deref())?,
            foreign_net_call: parse_field("foreign_buy", self.foreign_buy.as_deref())?,
        })
    }
}

/// Request-scoped evaluation. Holds only immutable configuration and the fetcher.
#[derive(Clone)]
pub struct AnalysisService {
    fetcher: Arc<dyn SeriesFetcher>,
    config: AnalysisConfig,
}

impl AnalysisService {
    pub fn new(fetcher: Arc<dyn SeriesFetcher>, config: AnalysisConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Parse the form, then analyse. A parse failure short-circuits before any fetch.
    pub async fn analyze_form(&self, form: &ChipForm) -> AnalysisResult {
        match form.parse() {
            Ok(inputs) => self.analyze(&inputs).await,
            Err(e) => {
                tracing::info!(error = %e, "rejected chip input");
                AnalysisResult::input_error(e.to_string())
            }
        }
    }

    pub async fn analyze(&self, inputs: &ChipInputs) -> AnalysisResult {
        let chips = analyze_chips(inputs);

        let tech_request = self.config.tech_request();
        let sr_request = self.config.sr_request();
        let fetcher = self.fetcher.as_ref();

        let (tech, sr) = tokio::join!(
            analyze_tech(fetcher, &tech_request, &self.config.indicators),
            get_support_resistance(fetcher, &sr_request, self.config.sr_window),
        );

        tracing::info!(
            source = fetcher.signature(),
            verdict = %chips.verdict,
            tech = ?tech,
            "analysis complete"
        );

        AnalysisResult {
            chips: chips.signals,
            chips_final: verdict_line(chips.verdict),
            tech,
            sr,
        }
    }
}
