//! TradingView-style history endpoint client.
//!
//! `GET {base}/tradingview/history?symbol=..&resolution=..&from=..&to=..`
//! answers with parallel arrays: `{s, t, o, h, l, c, v}`. Any status other
//! than `"ok"` is a failed fetch for that symbol.

use crate::config::HistoryConfig;
use crate::error::{AppError, Result};
use crate::services::dates::DateRange;
use crate::sources::HistorySource;
use crate::types::{Bar, Resolution};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Raw history response.
#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    pub s: String,
    #[serde(default)]
    pub t: Vec<i64>,
    #[serde(default)]
    pub o: Vec<Option<f64>>,
    #[serde(default)]
    pub h: Vec<Option<f64>>,
    #[serde(default)]
    pub l: Vec<Option<f64>>,
    #[serde(default)]
    pub c: Vec<Option<f64>>,
    #[serde(default)]
    pub v: Vec<Option<f64>>,
}

impl HistoryResponse {
    /// Zip the parallel arrays into bars.
    ///
    /// Arrays of unequal length are cut to the shortest; entries with a
    /// missing price are skipped and a missing volume counts as zero.
    pub fn into_bars(self, symbol: &str) -> Result<Vec<Bar>> {
        if self.s != "ok" {
            return Err(AppError::fetch(symbol, format!("API error: {}", self.s)));
        }

        let len = [self.o.len(), self.h.len(), self.l.len(), self.c.len(), self.v.len()]
            .into_iter()
            .fold(self.t.len(), usize::min);
        if len < self.t.len() {
            warn!(
                "{}: history arrays have unequal lengths, keeping {} of {} bars",
                symbol,
                len,
                self.t.len()
            );
        }

        let mut bars = Vec::with_capacity(len);
        for i in 0..len {
            let (Some(open), Some(high), Some(low), Some(close)) =
                (self.o[i], self.h[i], self.l[i], self.c[i])
            else {
                continue;
            };
            bars.push(Bar::new(
                self.t[i],
                open,
                high,
                low,
                close,
                self.v[i].unwrap_or(0.0),
            ));
        }

        Ok(bars)
    }
}

/// History API client.
pub struct HistoryClient {
    client: Client,
    base_url: String,
}

impl HistoryClient {
    /// Create a new client from config.
    pub fn new(config: &HistoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the request URL for one symbol and window.
    pub fn history_url(&self, symbol: &str, resolution: Resolution, range: DateRange) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/tradingview/history", self.base_url))
            .map_err(|e| AppError::Config(format!("invalid history base url: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("symbol", symbol)
            .append_pair("resolution", resolution.as_str())
            .append_pair("from", &range.from.to_string())
            .append_pair("to", &range.to.to_string());
        Ok(url)
    }
}

impl HistorySource for HistoryClient {
    async fn fetch_history(
        &self,
        symbol: &str,
        resolution: Resolution,
        range: DateRange,
    ) -> Result<Vec<Bar>> {
        let url = self.history_url(symbol, resolution, range)?;
        debug!("Fetching history: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::fetch(symbol, format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::fetch(
                symbol,
                format!("HTTP {}", response.status()),
            ));
        }

        let data: HistoryResponse = response
            .json()
            .await
            .map_err(|e| AppError::fetch(symbol, format!("Parse error: {}", e)))?;

        let bars = data.into_bars(symbol)?;
        debug!("{}: {} bars", symbol, bars.len());
        Ok(bars)
    }
}
