//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use darvas_scan::Bar;

pub const DAY: i64 = 86_400;

/// UTC midnight timestamps of the first `n` weekdays starting Monday 2024-01-01.
pub fn weekdays(n: usize) -> Vec<i64> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp();
    (0..)
        .filter(|d: &i64| d % 7 < 5)
        .take(n)
        .map(|d| start + d * DAY)
        .collect()
}

/// Quiet bar: range 9.5..10.5, close 10, volume 1000.
pub fn quiet(time: i64) -> Bar {
    Bar::new(time, 10.0, 10.5, 9.5, 10.0, 1_000.0)
}

/// `n` quiet bars with a box forming at index 5 (top 10.5, bottom 9.5)
/// and a high-volume close above the box at `breakout`.
pub fn breakout_series(n: usize, breakout: usize) -> Vec<Bar> {
    weekdays(n)
        .into_iter()
        .enumerate()
        .map(|(i, t)| match i {
            5 => Bar::new(t, 10.0, 10.8, 9.6, 10.2, 1_000.0),
            i if i == breakout => Bar::new(t, 10.3, 11.8, 10.2, 11.5, 3_000.0),
            _ => quiet(t),
        })
        .collect()
}

/// Steady decline, one bar per weekday.
pub fn declining_series(n: usize) -> Vec<Bar> {
    weekdays(n)
        .into_iter()
        .enumerate()
        .map(|(i, t)| {
            let close = 100.0 - i as f64 * 0.2;
            Bar::new(t, close + 0.1, close + 0.3, close - 0.2, close, 1_000.0)
        })
        .collect()
}

/// Quiet series whose last bar spikes to a long upper wick on 3x volume and
/// closes back inside the box: a buying climax with no breakout.
pub fn climax_series(n: usize) -> Vec<Bar> {
    let mut bars = breakout_series(n, usize::MAX);
    if let Some(last) = bars.last_mut() {
        *last = Bar::new(last.time, 10.0, 14.0, 9.8, 10.2, 3_000.0);
    }
    bars
}
