//! Export modes and their dispatch.

use crate::fetch::{fetch_deposits, fetch_trades, fetch_withdrawals};
use crate::record::Record;
use crate::source::{FetchError, RecordSource, TradeFilter};
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// What to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Trading,
    Deposit,
    Withdrawal,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Trading, Mode::Deposit, Mode::Withdrawal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Trading => "trading",
            Mode::Deposit => "deposit",
            Mode::Withdrawal => "withdrawal",
        }
    }

    /// Run the mode against a source.
    ///
    /// Trading fetches the windowed trade history for the request's range;
    /// deposit and withdrawal ignore the range and fetch the full log.
    pub fn run(
        &self,
        source: &dyn RecordSource,
        request: &ExportRequest,
    ) -> Result<Vec<Record>, FetchError> {
        match self {
            Mode::Trading => {
                let range = request.range.ok_or(FetchError::MissingStart)?;
                fetch_trades(source, range.start, range.end, &request.filter)
            }
            Mode::Deposit => fetch_deposits(source, request.coin.as_deref()),
            Mode::Withdrawal => fetch_withdrawals(source, request.coin.as_deref()),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown mode '{s}'. Valid: trading, deposit, withdrawal"))
    }
}

/// Overall trade history range, already parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Parameters shared by all modes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRequest {
    /// Required for trading, ignored otherwise.
    pub range: Option<TimeRange>,
    pub filter: TradeFilter,
    /// Coin filter for the money log.
    pub coin: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_roundtrip() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn unknown_mode_lists_choices() {
        let err = "margin".parse::<Mode>().unwrap_err();
        assert!(err.contains("trading, deposit, withdrawal"));
    }
}
