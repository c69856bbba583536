//! Watch-list scans against in-memory fakes.

mod common;

use chrono::NaiveDate;
use common::{breakout_series, climax_series, declining_series, weekdays, DAY};
use darvas_scan::config::HistoryConfig;
use darvas_scan::notify::Notifier;
use darvas_scan::services::{DateRange, SqliteWatchlist, WatchlistStore};
use darvas_scan::sources::{HistoryClient, HistorySource};
use darvas_scan::{
    Alert, AppError, Bar, MaSeverity, Resolution, Result, Scanner, SignalEngine,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Serves canned bars. Windows longer than ~6 months are served from `yearly`.
#[derive(Default)]
struct FakeHistory {
    daily: HashMap<String, Vec<Bar>>,
    yearly: HashMap<String, Vec<Bar>>,
    requests: Arc<Mutex<Vec<(String, Resolution, DateRange)>>>,
}

impl FakeHistory {
    fn with_daily(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.daily.insert(symbol.to_string(), bars);
        self
    }

    fn with_yearly(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.yearly.insert(symbol.to_string(), bars);
        self
    }
}

impl HistorySource for FakeHistory {
    async fn fetch_history(
        &self,
        symbol: &str,
        resolution: Resolution,
        range: DateRange,
    ) -> Result<Vec<Bar>> {
        self.requests
            .lock()
            .unwrap()
            .push((symbol.to_string(), resolution, range));

        let source = if range.to - range.from > 180 * DAY {
            &self.yearly
        } else {
            &self.daily
        };
        source
            .get(symbol)
            .cloned()
            .ok_or_else(|| AppError::fetch(symbol, "no_data"))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingNotifier {
    fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    async fn notify(&self, alert: &Alert) -> Result<()> {
        self.alerts.lock().unwrap().push(alert.clone());
        Ok(())
    }
}

struct FailingNotifier;

impl Notifier for FailingNotifier {
    async fn notify(&self, _alert: &Alert) -> Result<()> {
        Err(AppError::Notify("chat unavailable".to_string()))
    }
}

struct BrokenWatchlist;

impl WatchlistStore for BrokenWatchlist {
    fn symbols(&self) -> Result<Vec<String>> {
        Err(rusqlite::Error::InvalidQuery.into())
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

fn watch(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}

/// Weekly closes: 40 weeks at 100, 9 weeks at 120, then a dip to 112.
/// The last close sits below its 10-week average but above its 20-week one.
fn pullback_year() -> Vec<Bar> {
    weekdays(250)
        .into_iter()
        .enumerate()
        .map(|(i, t)| {
            let close = match i / 5 {
                w if w < 40 => 100.0,
                w if w < 49 => 120.0,
                _ => 112.0,
            };
            Bar::new(t, close, close + 1.0, close - 1.0, close, 1_000.0)
        })
        .collect()
}

fn kinds(alerts: &[Alert]) -> Vec<&'static str> {
    alerts
        .iter()
        .map(|a| match a {
            Alert::Signal { .. } => "signal",
            Alert::Overview { .. } => "overview",
            Alert::MaBreakdown { .. } => "ma",
        })
        .collect()
}

#[tokio::test]
async fn test_breakout_sends_signal_and_overview() {
    let history = FakeHistory::default()
        .with_daily("VNM", breakout_series(23, 22))
        .with_yearly("VNM", breakout_series(30, 22));
    let scanner = Scanner::new(
        watch(&["VNM"]),
        history,
        RecordingNotifier::default(),
        SignalEngine::default(),
    );

    let summary = scanner.run(today()).await.unwrap();
    assert_eq!(summary.scanned, 1);
    assert!(summary.failed.is_empty());
    assert_eq!(summary.alerts_sent, 2);

    let alerts = scanner.notifier().alerts();
    assert_eq!(kinds(&alerts), vec!["signal", "overview"]);
    match &alerts[0] {
        Alert::Signal {
            symbol,
            resolution,
            record,
            ..
        } => {
            assert_eq!(symbol, "VNM");
            assert_eq!(*resolution, Resolution::Daily);
            assert!(record.is_confirmed_buy);
            assert_eq!(record.close, 11.5);
        }
        other => panic!("unexpected alert: {other:?}"),
    }
    match &alerts[1] {
        Alert::Overview { weekly, .. } => {
            let weekly = weekly.as_ref().expect("weekly snapshot");
            assert_eq!(weekly.volume, 1_000.0);
            assert_eq!(weekly.avg_volume, None);
        }
        other => panic!("unexpected alert: {other:?}"),
    }
}

#[tokio::test]
async fn test_quiet_symbol_gets_overview_only() {
    let history = FakeHistory::default()
        .with_daily("FPT", breakout_series(20, usize::MAX))
        .with_yearly("FPT", breakout_series(20, usize::MAX));
    let scanner = Scanner::new(
        watch(&["FPT"]),
        history,
        RecordingNotifier::default(),
        SignalEngine::default(),
    );

    scanner.run(today()).await.unwrap();
    assert_eq!(kinds(&scanner.notifier().alerts()), vec!["overview"]);
}

#[tokio::test]
async fn test_failed_symbol_is_skipped() {
    let history = FakeHistory::default()
        .with_daily("VNM", breakout_series(20, usize::MAX))
        .with_yearly("VNM", breakout_series(20, usize::MAX));
    let scanner = Scanner::new(
        watch(&["BAD", "VNM"]),
        history,
        RecordingNotifier::default(),
        SignalEngine::default(),
    );

    let summary = scanner.run(today()).await.unwrap();
    assert_eq!(summary.scanned, 1);
    assert_eq!(summary.failed, vec!["BAD".to_string()]);

    let alerts = scanner.notifier().alerts();
    assert!(alerts.iter().all(|a| a.symbol() == "VNM"));
}

#[tokio::test]
async fn test_unreadable_watchlist_aborts_scan() {
    let scanner = Scanner::new(
        BrokenWatchlist,
        FakeHistory::default(),
        RecordingNotifier::default(),
        SignalEngine::default(),
    );

    let err = scanner.run(today()).await.unwrap_err();
    assert!(matches!(err, AppError::Store(_)));
    assert!(!err.is_recoverable());
    assert!(scanner.notifier().alerts().is_empty());
}

#[tokio::test]
async fn test_weekly_fetch_failure_leaves_snapshot_empty() {
    let history = FakeHistory::default().with_daily("HPG", declining_series(60));
    let scanner = Scanner::new(
        watch(&["HPG"]),
        history,
        RecordingNotifier::default(),
        SignalEngine::default(),
    );

    let summary = scanner.run(today()).await.unwrap();
    assert_eq!(summary.scanned, 1);

    let alerts = scanner.notifier().alerts();
    assert_eq!(kinds(&alerts), vec!["overview"]);
    assert!(matches!(&alerts[0], Alert::Overview { weekly: None, .. }));
}

#[tokio::test]
async fn test_full_ma_breakdown() {
    let history = FakeHistory::default()
        .with_daily("HPG", declining_series(60))
        .with_yearly("HPG", declining_series(260));
    let scanner = Scanner::new(
        watch(&["HPG"]),
        history,
        RecordingNotifier::default(),
        SignalEngine::default(),
    );

    scanner.run(today()).await.unwrap();
    let alerts = scanner.notifier().alerts();
    assert_eq!(kinds(&alerts), vec!["overview", "ma"]);
    match &alerts[1] {
        Alert::MaBreakdown {
            severity,
            daily,
            weekly,
            ..
        } => {
            assert_eq!(*severity, MaSeverity::Full);
            assert!(daily.below_ma10 && daily.below_ma20);
            assert!(weekly.below_all());
        }
        other => panic!("unexpected alert: {other:?}"),
    }
}

#[tokio::test]
async fn test_partial_ma_breakdown() {
    let history = FakeHistory::default()
        .with_daily("HPG", declining_series(60))
        .with_yearly("HPG", pullback_year());
    let scanner = Scanner::new(
        watch(&["HPG"]),
        history,
        RecordingNotifier::default(),
        SignalEngine::default(),
    );

    scanner.run(today()).await.unwrap();
    let alerts = scanner.notifier().alerts();
    match alerts.last() {
        Some(Alert::MaBreakdown {
            severity, weekly, ..
        }) => {
            assert_eq!(*severity, MaSeverity::Partial);
            assert!(weekly.below_ma10);
            assert!(!weekly.below_ma20);
        }
        other => panic!("unexpected alert: {other:?}"),
    }
}

#[tokio::test]
async fn test_ma_breakdown_can_be_disabled() {
    let history = FakeHistory::default()
        .with_daily("HPG", declining_series(60))
        .with_yearly("HPG", declining_series(260));
    let scanner = Scanner::new(
        watch(&["HPG"]),
        history,
        RecordingNotifier::default(),
        SignalEngine::default(),
    )
    .with_ma_breakdown(false);

    scanner.run(today()).await.unwrap();
    assert_eq!(kinds(&scanner.notifier().alerts()), vec!["overview"]);
}

#[tokio::test]
async fn test_delivery_failures_are_counted() {
    let history = FakeHistory::default()
        .with_daily("VNM", breakout_series(20, usize::MAX))
        .with_yearly("VNM", breakout_series(20, usize::MAX));
    let scanner = Scanner::new(
        watch(&["VNM"]),
        history,
        FailingNotifier,
        SignalEngine::default(),
    );

    let summary = scanner.run(today()).await.unwrap();
    assert_eq!(summary.scanned, 1);
    assert_eq!(summary.alerts_sent, 0);
    assert_eq!(summary.alerts_failed, 1);
}

#[tokio::test]
async fn test_fetch_windows() {
    let history = FakeHistory::default()
        .with_daily("VNM", breakout_series(20, usize::MAX))
        .with_yearly("VNM", breakout_series(20, usize::MAX));
    let requests = Arc::clone(&history.requests);
    let scanner = Scanner::new(
        watch(&["VNM"]),
        history,
        RecordingNotifier::default(),
        SignalEngine::default(),
    );
    scanner.scan_symbol("VNM", today()).await.unwrap();

    let midnight = |y, m, d| {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp()
    };
    let requests = requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![
            (
                "VNM".to_string(),
                Resolution::Daily,
                DateRange {
                    from: midnight(2024, 3, 3),
                    to: midnight(2024, 6, 3),
                },
            ),
            (
                "VNM".to_string(),
                Resolution::Daily,
                DateRange {
                    from: midnight(2023, 6, 3),
                    to: midnight(2024, 6, 3),
                },
            ),
        ]
    );
}

#[tokio::test]
async fn test_sqlite_watchlist_drives_scan() {
    let store = SqliteWatchlist::new_in_memory().unwrap();
    store.add_symbol("vnm", 1).unwrap();

    let history = FakeHistory::default()
        .with_daily("VNM", breakout_series(20, usize::MAX))
        .with_yearly("VNM", breakout_series(20, usize::MAX));
    let scanner = Scanner::new(
        store,
        history,
        RecordingNotifier::default(),
        SignalEngine::default(),
    );

    let summary = scanner.run(today()).await.unwrap();
    assert_eq!(summary.scanned, 1);
    assert_eq!(scanner.notifier().alerts()[0].symbol(), "VNM");
}

#[tokio::test]
async fn test_climax_without_breakout_sends_signal() {
    let history = FakeHistory::default()
        .with_daily("SSI", climax_series(24))
        .with_yearly("SSI", breakout_series(20, usize::MAX));
    let scanner = Scanner::new(
        watch(&["SSI"]),
        history,
        RecordingNotifier::default(),
        SignalEngine::default(),
    );

    scanner.run(today()).await.unwrap();
    let alerts = scanner.notifier().alerts();
    assert_eq!(kinds(&alerts), vec!["signal", "overview"]);
    match &alerts[0] {
        Alert::Signal { record, .. } => {
            assert!(record.is_buying_climax);
            assert!(!record.is_confirmed_buy && !record.is_confirmed_sell);
            assert!(!record.is_basic_buy);
        }
        other => panic!("unexpected alert: {other:?}"),
    }
}

#[tokio::test]
async fn test_bad_history_url_aborts_scan() {
    let history = HistoryClient::new(&HistoryConfig {
        base_url: "not a url".to_string(),
        ..Default::default()
    })
    .unwrap();
    let scanner = Scanner::new(
        watch(&["VNM", "FPT"]),
        history,
        RecordingNotifier::default(),
        SignalEngine::default(),
    );

    let err = scanner.run(today()).await.unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
    assert!(scanner.notifier().alerts().is_empty());
}
