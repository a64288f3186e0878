pub mod types;
pub mod error;
pub mod utils;
pub mod http_client;
pub mod data;
pub mod technical_indicators;
pub mod technical_signals;
pub mod support_resistance;
pub mod chip_analysis;
pub mod analysis;

pub use types::*;
pub use error::*;
pub use utils::Interval;
pub use data::*;
pub use technical_signals::{analyze_tech, CrossSignal};
pub use support_resistance::get_support_resistance;
pub use chip_analysis::analyze_chips;
pub use analysis::{AnalysisService, ChipForm};
