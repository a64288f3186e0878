use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::stock_api::technical_indicators::IndicatorConfig;
use crate::stock_api::types::SeriesRequest;
use crate::stock_api::utils::Interval;
use crate::stock_api::YAHOO_CHART_URL;

pub const DEFAULT_CONFIG_PATH: &str = "config/app.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub retries: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: YAHOO_CHART_URL.to_string(),
            timeout_secs: 15,
            retries: 3,
        }
    }
}

impl FetcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Instrument analysed on every request.
    pub symbol: String,
    pub tech_interval: Interval,
    pub tech_period: String,
    pub sr_interval: Interval,
    pub sr_period: String,
    /// Bars considered for support/resistance.
    pub sr_window: usize,
    pub indicators: IndicatorConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            symbol: "^TWII".to_string(),
            tech_interval: Interval::Daily,
            tech_period: "6mo".to_string(),
            sr_interval: Interval::Minute5,
            sr_period: "1d".to_string(),
            sr_window: 20,
            indicators: IndicatorConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn tech_request(&self) -> SeriesRequest {
        SeriesRequest {
            symbol: self.symbol.clone(),
            interval: self.tech_interval,
            period: self.tech_period.clone(),
        }
    }

    pub fn sr_request(&self) -> SeriesRequest {
        SeriesRequest {
            symbol: self.symbol.clone(),
            interval: self.sr_interval,
            period: self.sr_period.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub fetcher: FetcherConfig,
    pub analysis: AnalysisConfig,
}

/// Load `path` (defaults when the file does not exist), apply environment
/// overrides, then validate.
///
/// | Env Var          | Config Field        |
/// |------------------|---------------------|
/// | `HOST`           | `server.host`       |
/// | `PORT`           | `server.port`       |
/// | `TAIEX_SYMBOL`   | `analysis.symbol`   |
/// | `YAHOO_BASE_URL` | `fetcher.base_url`  |
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?
    } else {
        tracing::info!(path = %path.display(), "config file not found, using defaults");
        AppConfig::default()
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate(&config)?;

    tracing::info!(
        symbol = %config.analysis.symbol,
        host = %config.server.host,
        port = config.server.port,
        "configuration loaded"
    );

    Ok(config)
}

pub fn apply_env_overrides<F>(config: &mut AppConfig, var: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = var("HOST") {
        config.server.host = host;
    }
    if let Some(port) = var("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .with_context(|| format!("PORT must be a valid port number, got {port:?}"))?;
    }
    if let Some(symbol) = var("TAIEX_SYMBOL") {
        config.analysis.symbol = symbol;
    }
    if let Some(url) = var("YAHOO_BASE_URL") {
        config.fetcher.base_url = url;
    }
    Ok(())
}

pub fn validate(config: &AppConfig) -> Result<()> {
    let analysis = &config.analysis;
    let ind = &analysis.indicators;

    if analysis.symbol.trim().is_empty() {
        bail!("analysis.symbol must not be empty");
    }
    if analysis.sr_window == 0 {
        bail!("analysis.sr_window must be greater than 0");
    }
    if analysis.tech_period.trim().is_empty() || analysis.sr_period.trim().is_empty() {
        bail!("analysis periods must not be empty");
    }
    for (name, value) in [
        ("macd_fast", ind.macd_fast),
        ("macd_slow", ind.macd_slow),
        ("macd_signal", ind.macd_signal),
        ("stoch_k", ind.stoch_k),
        ("stoch_k_smooth", ind.stoch_k_smooth),
        ("stoch_d", ind.stoch_d),
    ] {
        if value == 0 {
            bail!("analysis.indicators.{name} must be greater than 0");
        }
    }
    if ind.macd_fast >= ind.macd_slow {
        bail!(
            "analysis.indicators.macd_fast ({}) must be less than macd_slow ({})",
            ind.macd_fast,
            ind.macd_slow
        );
    }
    if config.fetcher.timeout_secs == 0 {
        bail!("fetcher.timeout_secs must be greater than 0");
    }
    Ok(())
}
