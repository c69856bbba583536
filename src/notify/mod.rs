//! Alert delivery.

pub mod format;
pub mod telegram;

pub use format::format_alert;
pub use telegram::TelegramNotifier;

use crate::error::Result;
use crate::types::Alert;

/// Chat room an alert is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Room {
    /// Moving-average alerts.
    General,
    /// Darvas box, climax and overview alerts.
    Darvas,
}

impl Room {
    pub fn for_alert(alert: &Alert) -> Self {
        if alert.is_darvas() {
            Room::Darvas
        } else {
            Room::General
        }
    }
}

/// Delivers alerts somewhere. Implementations own formatting and transport.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn notify(&self, alert: &Alert) -> Result<()>;
}
