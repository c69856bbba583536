//! Darvas box breakout and climax candle scanner.

pub mod config;
pub mod error;
pub mod notify;
pub mod services;
pub mod sources;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use services::{Scanner, SignalEngine};
pub use types::*;
