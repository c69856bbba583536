//! Turns basic box breakouts into confirmed signals.

use crate::services::signals::darvas::BoxReading;
use crate::types::ConfirmationPolicy;

/// Indicator context for one bar. Absent values never satisfy a condition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarContext {
    pub close: f64,
    pub volume: f64,
    pub avg_volume: Option<f64>,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
}

impl BarContext {
    pub fn is_high_volume(&self) -> bool {
        self.avg_volume.is_some_and(|avg| self.volume > avg)
    }

    /// close > SMA20 > SMA50.
    pub fn is_uptrend(&self) -> bool {
        match (self.sma20, self.sma50) {
            (Some(fast), Some(slow)) => self.close > fast && fast > slow,
            _ => false,
        }
    }

    pub fn is_below_fast_ma(&self) -> bool {
        self.sma20.is_some_and(|fast| self.close < fast)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Confirmation {
    pub is_confirmed_buy: bool,
    pub is_confirmed_sell: bool,
}

/// Apply `policy` to a box reading.
pub fn confirm(policy: ConfirmationPolicy, reading: &BoxReading, ctx: &BarContext) -> Confirmation {
    match policy {
        // sells are not volume-gated
        ConfirmationPolicy::VolumeOnly => Confirmation {
            is_confirmed_buy: reading.is_basic_buy && ctx.is_high_volume(),
            is_confirmed_sell: reading.is_basic_sell,
        },
        ConfirmationPolicy::TrendAndVolume => Confirmation {
            is_confirmed_buy: reading.is_basic_buy && ctx.is_uptrend() && ctx.is_high_volume(),
            is_confirmed_sell: reading.is_basic_sell && ctx.is_below_fast_ma(),
        },
    }
}
