//! deltaconv core: export trade, deposit, and withdrawal history from the
//! Binance website.
//!
//! The website only serves trade history three months at a time, so long
//! ranges are split into 28-day windows and fetched one after another:
//! - `window`: the window plan for a range
//! - `fetch`: the sequential, fail-fast windowed fetcher
//! - `source` / `binance`: the record source trait and its HTTP implementation
//! - `session` / `config`: browser credentials and connection settings
//! - `export`: semicolon-delimited CSV output

pub mod binance;
pub mod config;
pub mod export;
pub mod fetch;
pub mod mode;
pub mod record;
pub mod session;
pub mod source;
pub mod timestamp;
pub mod window;

pub use binance::BinanceConnection;
pub use config::ConnectionConfig;
pub use export::{export_csv, write_records};
pub use fetch::{fetch_deposits, fetch_trades, fetch_withdrawals};
pub use mode::{ExportRequest, Mode, TimeRange};
pub use record::{Record, RecordPage};
pub use session::Session;
pub use source::{ExchangeKind, FetchError, RecordSource, Side, TradeFilter};
pub use timestamp::{parse_timestamp, TimeBasis};
pub use window::{Window, WindowPlan, WINDOW_DAYS};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: errors and plain data types can cross threads, so a
    /// caller may run an export on a worker thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<FetchError>();
        require_sync::<FetchError>();
        require_send::<Window>();
        require_sync::<Window>();
        require_send::<WindowPlan>();
        require_send::<RecordPage>();
        require_sync::<RecordPage>();
        require_send::<Session>();
        require_sync::<Session>();
        require_send::<ConnectionConfig>();
        require_sync::<ConnectionConfig>();
        require_send::<BinanceConnection>();
        require_sync::<BinanceConnection>();
    }

    /// The fetcher only needs `&dyn RecordSource`, so any source works as a
    /// trait object.
    #[test]
    fn record_source_is_object_safe() {
        fn _takes_dyn(source: &dyn RecordSource) -> &str {
            source.name()
        }
    }
}
