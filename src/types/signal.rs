use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a basic box breakout is turned into a confirmed signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationPolicy {
    /// Buy needs volume above its average; sell needs nothing.
    #[default]
    VolumeOnly,
    /// Buy needs close > SMA20 > SMA50 plus high volume; sell needs close < SMA20.
    TrendAndVolume,
}

impl ConfirmationPolicy {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "volume" | "volume_only" | "pure" => Some(Self::VolumeOnly),
            "trend" | "trend_and_volume" | "ma" => Some(Self::TrendAndVolume),
            _ => None,
        }
    }

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::VolumeOnly => "Darvas + volume",
            Self::TrendAndVolume => "Darvas + MA trend + volume",
        }
    }
}

/// A Darvas box, fixed at the bar that formed it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DarvasBox {
    pub top: f64,
    pub bottom: f64,
    /// Index of the bar that triggered formation.
    pub valid_from: usize,
}

/// Per-bar output of the signal engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRecord {
    pub date: NaiveDate,
    pub time: i64,
    pub close: f64,
    pub volume: f64,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub avg_volume: Option<f64>,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub is_basic_buy: bool,
    pub is_basic_sell: bool,
    pub is_confirmed_buy: bool,
    pub is_confirmed_sell: bool,
    pub is_buying_climax: bool,
    pub is_selling_climax: bool,
}

impl SignalRecord {
    /// Volume strictly above its rolling average, false while the average is absent.
    pub fn is_high_volume(&self) -> bool {
        self.avg_volume.is_some_and(|avg| self.volume > avg)
    }

    /// Whether the record carries anything worth dispatching.
    pub fn is_actionable(&self) -> bool {
        self.is_confirmed_buy
            || self.is_confirmed_sell
            || self.is_buying_climax
            || self.is_selling_climax
    }
}

/// Position of the last close relative to its moving averages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaStatus {
    pub close: f64,
    pub ma10: Option<f64>,
    pub ma20: Option<f64>,
    pub ma50: Option<f64>,
    pub below_ma10: bool,
    pub below_ma20: bool,
    pub below_ma50: bool,
}

impl MaStatus {
    pub fn below_all(&self) -> bool {
        self.below_ma10 && self.below_ma20 && self.below_ma50
    }

    /// close > MA10 > MA20 > MA50 with every average defined.
    pub fn is_bullish(&self) -> bool {
        match (self.ma10, self.ma20, self.ma50) {
            (Some(ma10), Some(ma20), Some(ma50)) => {
                self.close > ma10 && ma10 > ma20 && ma20 > ma50
            }
            _ => false,
        }
    }
}
