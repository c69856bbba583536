//! Darvas signal engine.
//!
//! Pure, synchronous transforms over one symbol's bars: rolling indicators,
//! the box state machine, the climax classifier and the confirmation layer,
//! combined into one [`SignalRecord`] per bar.

pub mod climax;
pub mod confirmation;
pub mod darvas;
pub mod indicators;
pub mod ma;
pub mod resample;

pub use climax::{ClimaxConfig, ClimaxReading};
pub use confirmation::{confirm, BarContext, Confirmation};
pub use darvas::{BoxEngine, BoxReading, BoxState, DEFAULT_BOX_PERIOD};
pub use ma::ma_status;
pub use resample::to_weekly;

use crate::services::signals::indicators::{average_volume, sma, sma::value_at};
use crate::types::{closes, volumes, Bar, ConfirmationPolicy, SignalRecord};
use chrono::{FixedOffset, Offset, Utc};

/// Engine parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub box_period: usize,
    /// Window of the average volume used for confirmation and climax.
    pub volume_period: usize,
    pub fast_ma: usize,
    pub slow_ma: usize,
    pub policy: ConfirmationPolicy,
    pub climax: ClimaxConfig,
    /// Market time zone used to date bars.
    pub offset: FixedOffset,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            box_period: DEFAULT_BOX_PERIOD,
            volume_period: 20,
            fast_ma: 20,
            slow_ma: 50,
            policy: ConfirmationPolicy::default(),
            climax: ClimaxConfig::default(),
            offset: Utc.fix(),
        }
    }
}

/// Runs the full pipeline over a bar series.
#[derive(Debug, Clone, Default)]
pub struct SignalEngine {
    config: EngineConfig,
}

impl SignalEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Same engine with a different confirmation policy.
    pub fn with_policy(&self, policy: ConfirmationPolicy) -> Self {
        Self::new(EngineConfig {
            policy,
            ..self.config
        })
    }

    /// One record per bar, aligned with `bars`.
    pub fn analyze(&self, bars: &[Bar]) -> Vec<SignalRecord> {
        let cfg = &self.config;
        let close_series = closes(bars);
        let avg_volume = average_volume(&volumes(bars), cfg.volume_period);
        let fast = sma(&close_series, cfg.fast_ma);
        let slow = sma(&close_series, cfg.slow_ma);

        let mut boxes = BoxEngine::new(cfg.box_period);

        bars.iter()
            .enumerate()
            .map(|(i, bar)| {
                let reading = boxes.step(bars, i);
                let ctx = BarContext {
                    close: bar.close,
                    volume: bar.volume,
                    avg_volume: value_at(&avg_volume, i),
                    sma20: value_at(&fast, i),
                    sma50: value_at(&slow, i),
                };
                let confirmed = confirm(cfg.policy, &reading, &ctx);
                let climax = climax::classify(bars, i, ctx.avg_volume, &cfg.climax);

                SignalRecord {
                    date: bar.date(cfg.offset),
                    time: bar.time,
                    close: bar.close,
                    volume: bar.volume,
                    top: reading.top,
                    bottom: reading.bottom,
                    avg_volume: ctx.avg_volume,
                    sma20: ctx.sma20,
                    sma50: ctx.sma50,
                    is_basic_buy: reading.is_basic_buy,
                    is_basic_sell: reading.is_basic_sell,
                    is_confirmed_buy: confirmed.is_confirmed_buy,
                    is_confirmed_sell: confirmed.is_confirmed_sell,
                    is_buying_climax: climax.is_buying_climax,
                    is_selling_climax: climax.is_selling_climax,
                }
            })
            .collect()
    }

    /// Record of the most recent bar, if any.
    pub fn latest(&self, bars: &[Bar]) -> Option<SignalRecord> {
        self.analyze(bars).pop()
    }

    /// Weekly bars derived from daily ones in this engine's time zone.
    pub fn weekly(&self, daily: &[Bar]) -> Vec<Bar> {
        to_weekly(daily, self.config.offset)
    }
}
