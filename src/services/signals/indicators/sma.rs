//! Simple Moving Average (SMA) over closing prices.

use super::rolling_mean;

/// Price averages are kept to 4 decimals.
pub const PRICE_DECIMALS: u32 = 4;

/// Rolling SMA of `values`, `None` for the first `period - 1` entries.
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_mean(values, period, PRICE_DECIMALS)
}

/// Value of an SMA series at `index`, flattening out-of-range and absent.
pub fn value_at(series: &[Option<f64>], index: usize) -> Option<f64> {
    series.get(index).copied().flatten()
}
