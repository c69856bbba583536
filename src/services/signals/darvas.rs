//! Darvas box state machine.
//!
//! A run holds at most one box. It forms at the first bar whose high beats
//! the previous high while that previous high was itself the peak of the
//! lookback window, so the box is recognised one bar after the peak. Once
//! formed it is never reset or closed for the rest of the run.

use crate::types::{Bar, DarvasBox};

/// Default lookback window for box formation.
pub const DEFAULT_BOX_PERIOD: usize = 5;

/// Box engine state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxState {
    NoBox,
    Active(DarvasBox),
}

/// Box levels and basic breakout flags for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxReading {
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub is_basic_buy: bool,
    pub is_basic_sell: bool,
}

/// Walks a bar series one index at a time.
#[derive(Debug, Clone)]
pub struct BoxEngine {
    period: usize,
    state: BoxState,
}

impl BoxEngine {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            state: BoxState::NoBox,
        }
    }

    pub fn state(&self) -> BoxState {
        self.state
    }

    pub fn active_box(&self) -> Option<DarvasBox> {
        match self.state {
            BoxState::Active(b) => Some(b),
            BoxState::NoBox => None,
        }
    }

    /// Evaluate bar `i`. Indices must be fed in increasing order.
    pub fn step(&mut self, bars: &[Bar], i: usize) -> BoxReading {
        let Some(bar) = bars.get(i) else {
            return BoxReading::default();
        };
        if self.state == BoxState::NoBox {
            if let Some(formed) = self.try_form(bars, i) {
                self.state = BoxState::Active(formed);
            }
        }

        match self.state {
            BoxState::Active(b) if i >= b.valid_from => {
                let close = bar.close;
                BoxReading {
                    top: Some(b.top),
                    bottom: Some(b.bottom),
                    is_basic_buy: close > b.top,
                    is_basic_sell: close < b.bottom,
                }
            }
            _ => BoxReading::default(),
        }
    }

    fn try_form(&self, bars: &[Bar], i: usize) -> Option<DarvasBox> {
        if self.period == 0 || i < self.period || i >= bars.len() {
            return None;
        }

        let window = &bars[i - self.period..i];
        let (top, bottom) = window
            .iter()
            .fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), b| {
                (hi.max(b.high), lo.min(b.low))
            });

        let prev_high = bars[i - 1].high;
        if bars[i].high > prev_high && prev_high == top {
            Some(DarvasBox {
                top,
                bottom,
                valid_from: i,
            })
        } else {
            None
        }
    }
}

impl Default for BoxEngine {
    fn default() -> Self {
        Self::new(DEFAULT_BOX_PERIOD)
    }
}

/// Run the box engine over a whole series.
pub fn detect_boxes(bars: &[Bar], period: usize) -> Vec<BoxReading> {
    let mut engine = BoxEngine::new(period);
    (0..bars.len()).map(|i| engine.step(bars, i)).collect()
}
