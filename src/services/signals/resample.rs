//! Daily to weekly resampling.
//!
//! This is a first-bar-of-week sampler, not an OHLC aggregation: each ISO
//! week is represented by the raw OHLCV of the first daily bar that falls in
//! it. Weekly high/low are therefore NOT the true extremes of the week, and
//! weekly volume is a single session's volume.

use crate::types::Bar;
use chrono::{Datelike, FixedOffset};

/// ISO-8601 `(year, week)` of a bar in the market time zone.
pub fn iso_week(bar: &Bar, offset: FixedOffset) -> (i32, u32) {
    let week = bar.date(offset).iso_week();
    (week.year(), week.week())
}

/// Keep the first bar of every ISO week, preserving order.
pub fn to_weekly(daily: &[Bar], offset: FixedOffset) -> Vec<Bar> {
    let mut weekly = Vec::new();
    let mut last_week = None;

    for bar in daily {
        let week = iso_week(bar, offset);
        if last_week != Some(week) {
            weekly.push(*bar);
            last_week = Some(week);
        }
    }

    weekly
}
