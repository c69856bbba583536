use crate::services::dates::parse_dmy;
use crate::services::signals::{ClimaxConfig, EngineConfig, DEFAULT_BOX_PERIOD};
use crate::types::ConfirmationPolicy;
use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};
use std::env;
use tracing::warn;

/// Market-data endpoint configuration.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Base URL; requests go to `{base_url}/tradingview/history`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.24hmoney.vn".to_string(),
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (compatible; Darvas-Scan/1.0)".to_string(),
        }
    }
}

/// Telegram delivery configuration.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API base URL.
    pub api_url: String,
    /// Bot used for moving-average alerts.
    pub bot_token: Option<String>,
    /// Bot used for Darvas alerts.
    pub darvas_bot_token: Option<String>,
    /// Chat that receives every alert.
    pub chat_id: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.telegram.org".to_string(),
            bot_token: None,
            darvas_bot_token: None,
            chat_id: None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub history: HistoryConfig,
    pub telegram: TelegramConfig,
    /// SQLite file holding the watch-list.
    pub watchlist_path: String,
    /// Market time zone as hours east of UTC.
    pub utc_offset_hours: i32,
    /// Darvas box lookback window.
    pub box_period: usize,
    /// Average-volume window.
    pub volume_period: usize,
    /// Confirmation policy for box breakouts.
    pub policy: ConfirmationPolicy,
    /// Scan as of this local time instead of now.
    pub as_of: Option<NaiveDateTime>,
    /// Also run the moving-average breakdown check.
    pub ma_breakdown: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            telegram: TelegramConfig::default(),
            watchlist_path: "watchlist.db".to_string(),
            utc_offset_hours: 7,
            box_period: DEFAULT_BOX_PERIOD,
            volume_period: 20,
            policy: ConfirmationPolicy::VolumeOnly,
            as_of: None,
            ma_breakdown: true,
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

fn flag(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| v == "true" || v == "1")
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let policy = env::var("CONFIRMATION_POLICY")
            .ok()
            .and_then(|v| {
                let policy = ConfirmationPolicy::from_str(&v);
                if policy.is_none() {
                    warn!("Unknown CONFIRMATION_POLICY {:?}, using default", v);
                }
                policy
            })
            .unwrap_or(defaults.policy);

        let as_of = env::var("SCAN_AS_OF").ok().and_then(|v| {
            let parsed = parse_dmy(&v);
            if parsed.is_none() {
                warn!("Ignoring invalid SCAN_AS_OF {:?}, expected dd/mm/yyyy", v);
            }
            parsed
        });

        Self {
            history: HistoryConfig {
                base_url: env::var("HISTORY_BASE_URL").unwrap_or(defaults.history.base_url),
                timeout_secs: parsed("HISTORY_TIMEOUT_SECS").unwrap_or(defaults.history.timeout_secs),
                user_agent: env::var("HISTORY_USER_AGENT").unwrap_or(defaults.history.user_agent),
            },
            telegram: TelegramConfig {
                api_url: env::var("TELEGRAM_API_URL").unwrap_or(defaults.telegram.api_url),
                bot_token: env::var("TELEGRAM_BOT_TOKEN").ok().filter(|v| !v.is_empty()),
                darvas_bot_token: env::var("TELEGRAM_BOT_TOKEN_DARVAS")
                    .ok()
                    .filter(|v| !v.is_empty()),
                chat_id: env::var("TELEGRAM_CHAT_ID").ok().filter(|v| !v.is_empty()),
            },
            watchlist_path: env::var("WATCHLIST_DB_PATH").unwrap_or(defaults.watchlist_path),
            utc_offset_hours: parsed("MARKET_UTC_OFFSET_HOURS").unwrap_or(defaults.utc_offset_hours),
            box_period: parsed("BOX_PERIOD").unwrap_or(defaults.box_period),
            volume_period: parsed("VOLUME_PERIOD").unwrap_or(defaults.volume_period),
            policy,
            as_of,
            ma_breakdown: flag("SCAN_MA_BREAKDOWN").unwrap_or(defaults.ma_breakdown),
        }
    }

    /// Market time zone; out-of-range offsets fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        self.utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                warn!("Invalid UTC offset {}h, using UTC", self.utc_offset_hours);
                Utc.fix()
            })
    }

    /// Signal engine parameters.
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            box_period: self.box_period,
            volume_period: self.volume_period,
            policy: self.policy,
            climax: ClimaxConfig::default(),
            offset: self.offset(),
            ..EngineConfig::default()
        }
    }
}
