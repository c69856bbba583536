//! Close position relative to the 10/20/50 moving averages.

use crate::services::signals::indicators::sma::{sma, value_at};
use crate::types::MaStatus;

/// MA status of the last close, `None` for an empty series.
pub fn ma_status(closes: &[f64]) -> Option<MaStatus> {
    let last = closes.len().checked_sub(1)?;
    let close = closes[last];

    let ma10 = value_at(&sma(closes, 10), last);
    let ma20 = value_at(&sma(closes, 20), last);
    let ma50 = value_at(&sma(closes, 50), last);
    let below = |ma: Option<f64>| ma.is_some_and(|m| close < m);

    Some(MaStatus {
        close,
        ma10,
        ma20,
        ma50,
        below_ma10: below(ma10),
        below_ma20: below(ma20),
        below_ma50: below(ma50),
    })
}
