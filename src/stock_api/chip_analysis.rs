use super::types::{ChipAnalysis, ChipInputs, Verdict};

pub const OI_BULLISH: &str = "bullish (call OI up, put OI down)";
pub const OI_BEARISH: &str = "bearish (call OI down, put OI up)";
pub const PC_RATIO_BEARISH: &str = "bearish (P/C ratio > 1)";
pub const PC_RATIO_BULLISH: &str = "bullish (P/C ratio < 1)";
pub const FOREIGN_BULLISH: &str = "bullish (foreign investors net-buy calls)";
pub const FOREIGN_BEARISH: &str = "bearish (foreign investors net-sell calls)";

const BULLISH_LABELS: [&str; 3] = [OI_BULLISH, PC_RATIO_BULLISH, FOREIGN_BULLISH];
const FACTOR_COUNT: usize = 3;

/// Per-factor labels for the option-market figures, plus an overall verdict.
///
/// The OI-delta and foreign-position factors may contribute no label; the P/C
/// ratio always contributes one (a ratio of exactly 1 reads bullish). The
/// bearish tally is `3 - bullish`, not a count of bearish labels, so a single
/// bearish factor with the others silent still yields a bearish verdict.
pub fn analyze_chips(inputs: &ChipInputs) -> ChipAnalysis {
    let mut signals = Vec::with_capacity(FACTOR_COUNT);

    if inputs.call_oi_delta > 0 && inputs.put_oi_delta < 0 {
        signals.push(OI_BULLISH.to_string());
    } else if inputs.call_oi_delta < 0 && inputs.put_oi_delta > 0 {
        signals.push(OI_BEARISH.to_string());
    }

    if inputs.put_call_ratio > 1.0 {
        signals.push(PC_RATIO_BEARISH.to_string());
    } else {
        signals.push(PC_RATIO_BULLISH.to_string());
    }

    if inputs.foreign_net_call > 0 {
        signals.push(FOREIGN_BULLISH.to_string());
    } else if inputs.foreign_net_call < 0 {
        signals.push(FOREIGN_BEARISH.to_string());
    }

    let bullish = signals
        .iter()
        .filter(|s| BULLISH_LABELS.contains(&s.as_str()))
        .count();
    let bearish = FACTOR_COUNT - bullish;

    let verdict = if bullish >= 2 {
        Verdict::Bullish
    } else if bearish >= 2 {
        Verdict::Bearish
    } else {
        Verdict::Neutral
    };

    ChipAnalysis { signals, verdict }
}

pub fn verdict_line(verdict: Verdict) -> String {
    format!("Overall: {}", verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(call: i64, put: i64, ratio: f64, foreign: i64) -> ChipInputs {
        ChipInputs {
            call_oi_delta: call,
            put_oi_delta: put,
            put_call_ratio: ratio,
            foreign_net_call: foreign,
        }
    }

    #[test]
    fn all_bullish_factors() {
        let result = analyze_chips(&inputs(5, -3, 0.8, 10));
        assert_eq!(result.signals, vec![OI_BULLISH, PC_RATIO_BULLISH, FOREIGN_BULLISH]);
        assert_eq!(result.verdict, Verdict::Bullish);
    }

    #[test]
    fn lone_bearish_ratio_still_reads_bearish() {
        let result = analyze_chips(&inputs(0, 0, 1.5, 0));
        assert_eq!(result.signals, vec![PC_RATIO_BEARISH]);
        assert_eq!(result.verdict, Verdict::Bearish);
    }

    #[test]
    fn ratio_of_one_is_bullish() {
        let result = analyze_chips(&inputs(0, 0, 1.0, 0));
        assert_eq!(result.signals, vec![PC_RATIO_BULLISH]);
        // one bullish label, 3 - 1 = 2 bearish
        assert_eq!(result.verdict, Verdict::Bearish);
    }

    #[test]
    fn all_bearish_factors() {
        let result = analyze_chips(&inputs(-5, 3, 1.2, -10));
        assert_eq!(result.signals, vec![OI_BEARISH, PC_RATIO_BEARISH, FOREIGN_BEARISH]);
        assert_eq!(result.verdict, Verdict::Bearish);
    }

    #[test]
    fn mixed_factors() {
        let result = analyze_chips(&inputs(5, -3, 1.2, -10));
        assert_eq!(result.signals, vec![OI_BULLISH, PC_RATIO_BEARISH, FOREIGN_BEARISH]);
        assert_eq!(result.verdict, Verdict::Bearish);

        let result = analyze_chips(&inputs(-5, 3, 0.7, 10));
        assert_eq!(result.signals, vec![OI_BEARISH, PC_RATIO_BULLISH, FOREIGN_BULLISH]);
        assert_eq!(result.verdict, Verdict::Bullish);
    }

    #[test]
    fn oi_moving_together_adds_no_label() {
        let result = analyze_chips(&inputs(5, 3, 0.9, 0));
        assert_eq!(result.signals, vec![PC_RATIO_BULLISH]);
    }

    #[test]
    fn verdict_line_format() {
        assert_eq!(verdict_line(Verdict::Neutral), "Overall: neutral");
    }
}
