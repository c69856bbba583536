//! Rolling average volume.

use super::rolling_mean;

/// Volume averages are kept to 2 decimals.
pub const VOLUME_DECIMALS: u32 = 2;

/// Rolling average of `volumes` over `period` bars, O(n) running sum.
pub fn average_volume(volumes: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_mean(volumes, period, VOLUME_DECIMALS)
}
