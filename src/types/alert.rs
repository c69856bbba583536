//! Structured alerts handed to a notifier. Formatting belongs to the notifier.

use crate::types::{ConfirmationPolicy, MaStatus, Resolution, SignalRecord};
use serde::Serialize;

/// How hard a moving-average breakdown is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MaSeverity {
    /// Below MA10 and MA20 on both daily and weekly series.
    Full,
    /// Below MA10 and MA20 daily, below MA10 weekly but still above weekly MA20.
    Partial,
}

/// Weekly context attached to the per-symbol overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySnapshot {
    pub volume: f64,
    pub avg_volume: Option<f64>,
    pub latest: SignalRecord,
}

/// Something the scanner wants delivered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    /// Latest bar carries a confirmed signal or a climax note.
    Signal {
        symbol: String,
        resolution: Resolution,
        policy: ConfirmationPolicy,
        record: SignalRecord,
    },
    /// Per-symbol summary of the daily and weekly state.
    Overview {
        symbol: String,
        daily: SignalRecord,
        weekly: Option<WeeklySnapshot>,
    },
    /// Close fell below its short moving averages.
    MaBreakdown {
        symbol: String,
        severity: MaSeverity,
        daily: MaStatus,
        weekly: MaStatus,
    },
}

impl Alert {
    pub fn symbol(&self) -> &str {
        match self {
            Alert::Signal { symbol, .. }
            | Alert::Overview { symbol, .. }
            | Alert::MaBreakdown { symbol, .. } => symbol,
        }
    }

    /// Darvas-derived alerts go to the dedicated room.
    pub fn is_darvas(&self) -> bool {
        !matches!(self, Alert::MaBreakdown { .. })
    }
}
