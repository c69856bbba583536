//! Rolling indicators over plain value slices.
//!
//! Every function returns a series aligned 1:1 with its input, with `None`
//! wherever the window has not filled yet.

pub mod sma;
pub mod volume;

pub use sma::sma;
pub use volume::average_volume;

/// Round to a fixed number of decimals.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Rolling mean with a running sum, rounded to `decimals`.
pub(crate) fn rolling_mean(values: &[f64], period: usize, decimals: u32) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for (i, value) in values.iter().enumerate() {
        sum += value;
        if i >= period {
            sum -= values[i - period];
        }

        if i + 1 < period {
            out.push(None);
        } else {
            out.push(Some(round_to(sum / period as f64, decimals)));
        }
    }

    out
}
