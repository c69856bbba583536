use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Series resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Resolution {
    #[default]
    #[serde(rename = "1D")]
    Daily,
    #[serde(rename = "1W")]
    Weekly,
}

impl Resolution {
    /// Get the resolution from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "1D" | "D" => Some(Resolution::Daily),
            "1W" | "W" => Some(Resolution::Weekly),
            _ => None,
        }
    }

    /// Query-string value used by the history endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Daily => "1D",
            Resolution::Weekly => "1W",
        }
    }

    /// Label used in alert text.
    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Daily => "day",
            Resolution::Weekly => "week",
        }
    }
}

/// One OHLCV observation. `time` is epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Calendar date of the bar in the given market time zone.
    ///
    /// Timestamps outside chrono's range fall back to the epoch date.
    pub fn date(&self, offset: FixedOffset) -> NaiveDate {
        DateTime::from_timestamp(self.time, 0)
            .unwrap_or_default()
            .with_timezone(&offset)
            .date_naive()
    }

    /// High minus low.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Absolute distance between open and close.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }
}

/// Column views over a bar slice, the shape the indicator functions take.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

pub fn volumes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.volume).collect()
}
