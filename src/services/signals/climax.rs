//! Buying/selling climax candle classifier.
//!
//! A climax needs a volume spike over the rolling average plus a fresh
//! short-term extreme, then a rejection shape: a long wick, a shooting star
//! or hammer, or (selling side only) an engulfing reversal.

use crate::types::Bar;

/// Thresholds for climax detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimaxConfig {
    /// Bars before the current one used for the fresh high/low test.
    pub lookback: usize,
    /// Volume must exceed this multiple of the average.
    pub volume_multiplier: f64,
    /// Minimum wick fraction of the range for a basic climax.
    pub wick_ratio: f64,
    /// Minimum wick fraction for shooting-star/hammer shapes.
    pub pattern_wick_ratio: f64,
    /// Maximum body fraction for shooting-star/hammer shapes.
    pub pattern_body_ratio: f64,
}

impl Default for ClimaxConfig {
    fn default() -> Self {
        Self {
            lookback: 5,
            volume_multiplier: 2.5,
            wick_ratio: 0.5,
            pattern_wick_ratio: 0.6,
            pattern_body_ratio: 0.2,
        }
    }
}

/// Climax flags for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClimaxReading {
    pub is_buying_climax: bool,
    pub is_selling_climax: bool,
}

/// Classify bar `i` of `bars` against its average volume.
pub fn classify(
    bars: &[Bar],
    i: usize,
    avg_volume: Option<f64>,
    config: &ClimaxConfig,
) -> ClimaxReading {
    if i == 0 || i < config.lookback || i >= bars.len() {
        return ClimaxReading::default();
    }
    let Some(avg) = avg_volume else {
        return ClimaxReading::default();
    };

    let bar = &bars[i];
    let range = bar.range();
    if range <= 0.0 || bar.volume <= config.volume_multiplier * avg {
        return ClimaxReading::default();
    }

    let prior = &bars[i - config.lookback..i];
    let prior_high = prior.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let prior_low = prior.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);

    let upper = bar.upper_wick() / range;
    let lower = bar.lower_wick() / range;
    let body = bar.body() / range;

    let is_buying_climax = bar.high > prior_high
        && bar.close < bar.high
        && (upper > config.wick_ratio
            || (upper > config.pattern_wick_ratio && body < config.pattern_body_ratio));

    let is_selling_climax = bar.low < prior_low
        && ((bar.close > bar.low
            && (lower > config.wick_ratio
                || (lower > config.pattern_wick_ratio && body < config.pattern_body_ratio)))
            || is_engulfing_reversal(&bars[i - 1], bar));

    ClimaxReading {
        is_buying_climax,
        is_selling_climax,
    }
}

/// Opens below the previous close, closes above the previous open, and is a
/// green candle.
fn is_engulfing_reversal(prev: &Bar, bar: &Bar) -> bool {
    bar.open < prev.close && bar.close > prev.open && bar.open < bar.close
}

/// Classify every bar of a series.
pub fn detect_climaxes(
    bars: &[Bar],
    avg_volume: &[Option<f64>],
    config: &ClimaxConfig,
) -> Vec<ClimaxReading> {
    (0..bars.len())
        .map(|i| classify(bars, i, avg_volume.get(i).copied().flatten(), config))
        .collect()
}
