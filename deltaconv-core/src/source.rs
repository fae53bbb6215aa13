//! Record source trait and structured error types.
//!
//! The RecordSource trait abstracts over where records come from (the Binance
//! web endpoints, or a scripted fake in tests) so the windowed fetcher never
//! touches HTTP directly.

use crate::record::RecordPage;
use crate::window::Window;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Structured error types for fetch and export operations.
///
/// Every variant is fatal: nothing in this crate retries or resumes.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("The given {field} time format is wrong. Format YYYY-MM-DD HH:MM:SS is required.")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("{0} does not exist in the local time zone")]
    NonexistentLocalTime(NaiveDateTime),

    #[error("a start time is required in trading mode")]
    MissingStart,

    #[error("invalid cookie segment '{0}': expected name=value")]
    InvalidCookie(String),

    #[error("invalid header value for '{name}'")]
    InvalidHeader { name: &'static str },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("response format changed: {0}")]
    Decode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("export error: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Direction filter for trade queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Wire value for the `direction` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

/// Optional filters applied to every trade window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeFilter {
    /// Market symbol, e.g. `ETHBTC`.
    pub symbol: Option<String>,
    pub side: Option<Side>,
}

/// Which half of the money log to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeKind {
    Deposit,
    Withdrawal,
}

impl ExchangeKind {
    /// Wire value for the `direction` form field of the money log endpoint.
    pub fn direction(&self) -> u8 {
        match self {
            ExchangeKind::Deposit => 0,
            ExchangeKind::Withdrawal => 1,
        }
    }
}

/// A remote source of transaction records.
///
/// Each call is exactly one request. Implementations must not retry; the
/// caller treats any error as fatal for the whole export.
pub trait RecordSource {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch the trades that fall inside `window`.
    fn trades(&self, window: &Window, filter: &TradeFilter) -> Result<RecordPage, FetchError>;

    /// Fetch the full deposit or withdrawal log, optionally for a single coin.
    fn exchanges(&self, kind: ExchangeKind, coin: Option<&str>) -> Result<RecordPage, FetchError>;
}
