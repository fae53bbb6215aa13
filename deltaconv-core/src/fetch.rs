//! Windowed fetcher. Walks a long range window by window and concatenates the
//! records each window returns.

use crate::record::Record;
use crate::source::{ExchangeKind, FetchError, RecordSource, TradeFilter};
use crate::window::WindowPlan;
use chrono::NaiveDateTime;
use tracing::info;

/// Fetch every trade between `start` and `end`.
///
/// One request per window, strictly sequential. Records are returned in
/// request order and, within a window, in the server's order. The first
/// failing window aborts the whole fetch and the records gathered so far are
/// dropped.
pub fn fetch_trades(
    source: &dyn RecordSource,
    start: NaiveDateTime,
    end: NaiveDateTime,
    filter: &TradeFilter,
) -> Result<Vec<Record>, FetchError> {
    info!("Get trades from {start} to {end}");

    let mut trades = Vec::new();
    for window in WindowPlan::new(start, end)? {
        let page = source.trades(&window, filter)?;
        trades.extend(page.data);
    }

    info!(source = source.name(), "Found {} trades", trades.len());
    Ok(trades)
}

/// Fetch the whole deposit log.
pub fn fetch_deposits(
    source: &dyn RecordSource,
    coin: Option<&str>,
) -> Result<Vec<Record>, FetchError> {
    info!("Get all deposits");
    fetch_exchanges(source, ExchangeKind::Deposit, coin)
}

/// Fetch the whole withdrawal log.
pub fn fetch_withdrawals(
    source: &dyn RecordSource,
    coin: Option<&str>,
) -> Result<Vec<Record>, FetchError> {
    info!("Get all withdrawals");
    fetch_exchanges(source, ExchangeKind::Withdrawal, coin)
}

fn fetch_exchanges(
    source: &dyn RecordSource,
    kind: ExchangeKind,
    coin: Option<&str>,
) -> Result<Vec<Record>, FetchError> {
    let page = source.exchanges(kind, coin)?;
    info!("Found {} transactions", page.data.len());
    Ok(page.data)
}
