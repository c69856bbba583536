//! Market-data sources.

pub mod history;

pub use history::HistoryClient;

use crate::error::Result;
use crate::services::dates::DateRange;
use crate::types::{Bar, Resolution};

/// Anything that can produce a symbol's OHLCV history.
#[allow(async_fn_in_trait)]
pub trait HistorySource {
    /// Bars for `symbol` inside `range`, oldest first.
    async fn fetch_history(
        &self,
        symbol: &str,
        resolution: Resolution,
        range: DateRange,
    ) -> Result<Vec<Bar>>;
}
