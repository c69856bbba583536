use anyhow::Context;
use chrono::Utc;
use darvas_scan::config::Config;
use darvas_scan::notify::TelegramNotifier;
use darvas_scan::services::{Scanner, SignalEngine, SqliteWatchlist};
use darvas_scan::sources::HistoryClient;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "darvas_scan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    let today = config
        .as_of
        .map(|dt| dt.date())
        .unwrap_or_else(|| Utc::now().with_timezone(&config.offset()).date_naive());
    info!(
        "Starting Darvas scan ({}), box period {}, as of {}",
        config.policy.name(),
        config.box_period,
        today
    );

    let watchlist = SqliteWatchlist::new(&config.watchlist_path)
        .with_context(|| format!("opening watch-list at {}", config.watchlist_path))?;
    let history = HistoryClient::new(&config.history).context("building history client")?;
    let notifier = TelegramNotifier::new(config.telegram.clone()).context("building notifier")?;

    let scanner = Scanner::new(
        watchlist,
        history,
        notifier,
        SignalEngine::new(config.engine()),
    )
    .with_ma_breakdown(config.ma_breakdown);

    let summary = scanner.run(today).await.context("scan aborted")?;
    if !summary.failed.is_empty() {
        info!("Symbols skipped: {}", summary.failed.join(", "));
    }

    Ok(())
}
