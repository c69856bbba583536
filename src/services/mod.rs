pub mod dates;
pub mod scanner;
pub mod signals;
pub mod watchlist;

pub use dates::DateRange;
pub use scanner::{ScanSummary, Scanner};
pub use signals::{EngineConfig, SignalEngine};
pub use watchlist::{SqliteWatchlist, WatchlistStore};
