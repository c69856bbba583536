//! Watch-list scan.
//!
//! For every watched symbol: fetch three months of daily bars and one year of
//! daily bars resampled to weekly, run the signal engine on both, and hand the
//! latest records to the notifier. A symbol that fails to fetch is logged and
//! skipped. A watch-list that cannot be read, or a configuration error, aborts
//! the run.

use crate::error::Result;
use crate::notify::Notifier;
use crate::services::dates::DateRange;
use crate::services::signals::{ma_status, SignalEngine};
use crate::services::watchlist::WatchlistStore;
use crate::sources::HistorySource;
use crate::types::{closes, Alert, Bar, MaSeverity, Resolution, WeeklySnapshot};
use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

/// Outcome of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub scanned: usize,
    pub failed: Vec<String>,
    pub alerts_sent: usize,
    pub alerts_failed: usize,
}

pub struct Scanner<W, H, N> {
    watchlist: W,
    history: H,
    notifier: N,
    engine: SignalEngine,
    ma_breakdown: bool,
}

impl<W, H, N> Scanner<W, H, N>
where
    W: WatchlistStore,
    H: HistorySource,
    N: Notifier,
{
    pub fn new(watchlist: W, history: H, notifier: N, engine: SignalEngine) -> Self {
        Self {
            watchlist,
            history,
            notifier,
            engine,
            ma_breakdown: true,
        }
    }

    /// Toggle the moving-average breakdown check.
    pub fn with_ma_breakdown(mut self, enabled: bool) -> Self {
        self.ma_breakdown = enabled;
        self
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Scan every watched symbol as of `today`.
    pub async fn run(&self, today: NaiveDate) -> Result<ScanSummary> {
        let symbols = self.watchlist.symbols()?;
        info!("Scanning {} symbols as of {}", symbols.len(), today);

        let mut summary = ScanSummary::default();
        for symbol in symbols {
            info!("Processing {}", symbol);
            let alerts = match self.scan_symbol(&symbol, today).await {
                Ok(alerts) => alerts,
                Err(e) if !e.is_recoverable() => {
                    error!("Aborting scan at {}: {}", symbol, e);
                    return Err(e);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", symbol, e);
                    summary.failed.push(symbol);
                    continue;
                }
            };
            summary.scanned += 1;

            for alert in &alerts {
                match self.notifier.notify(alert).await {
                    Ok(()) => summary.alerts_sent += 1,
                    Err(e) => {
                        warn!("Failed to deliver alert for {}: {}", symbol, e);
                        summary.alerts_failed += 1;
                    }
                }
            }
        }

        info!(
            "Scan finished: {} scanned, {} failed, {} alerts sent",
            summary.scanned,
            summary.failed.len(),
            summary.alerts_sent
        );
        Ok(summary)
    }

    /// Alerts for one symbol, without delivering them.
    pub async fn scan_symbol(&self, symbol: &str, today: NaiveDate) -> Result<Vec<Alert>> {
        let offset = self.engine.config().offset;
        let daily = self
            .history
            .fetch_history(symbol, Resolution::Daily, DateRange::three_months(today, offset))
            .await?;

        let Some(latest) = self.engine.latest(&daily) else {
            debug!("{}: no daily bars", symbol);
            return Ok(Vec::new());
        };

        let mut alerts = Vec::new();
        if latest.is_actionable() {
            alerts.push(Alert::Signal {
                symbol: symbol.to_string(),
                resolution: Resolution::Daily,
                policy: self.engine.config().policy,
                record: latest.clone(),
            });
        }

        let weekly = self.weekly_bars(symbol, today).await;
        let snapshot = weekly
            .as_deref()
            .and_then(|bars| self.engine.latest(bars))
            .map(|record| WeeklySnapshot {
                volume: record.volume,
                avg_volume: record.avg_volume,
                latest: record,
            });

        alerts.push(Alert::Overview {
            symbol: symbol.to_string(),
            daily: latest,
            weekly: snapshot,
        });

        if self.ma_breakdown {
            if let Some(alert) = self.ma_breakdown_alert(symbol, &daily, weekly.as_deref()) {
                alerts.push(alert);
            }
        }

        Ok(alerts)
    }

    /// One year of daily bars resampled to weeks; `None` if the fetch fails.
    async fn weekly_bars(&self, symbol: &str, today: NaiveDate) -> Option<Vec<Bar>> {
        let offset = self.engine.config().offset;
        match self
            .history
            .fetch_history(symbol, Resolution::Daily, DateRange::one_year(today, offset))
            .await
        {
            Ok(daily) => Some(self.engine.weekly(&daily)),
            Err(e) => {
                warn!("{}: weekly history unavailable: {}", symbol, e);
                None
            }
        }
    }

    fn ma_breakdown_alert(&self, symbol: &str, daily: &[Bar], weekly: Option<&[Bar]>) -> Option<Alert> {
        let daily_status = ma_status(&closes(daily))?;
        if !(daily_status.below_ma10 && daily_status.below_ma20) {
            return None;
        }

        let weekly_status = ma_status(&closes(weekly?))?;
        let severity = match (weekly_status.below_ma10, weekly_status.below_ma20) {
            (true, true) => MaSeverity::Full,
            (true, false) => MaSeverity::Partial,
            _ => return None,
        };

        Some(Alert::MaBreakdown {
            symbol: symbol.to_string(),
            severity,
            daily: daily_status,
            weekly: weekly_status,
        })
    }
}
