//! Binance web connection.
//!
//! Talks to the two private endpoints the Binance website itself uses for the
//! trade history and money log pages. They are undocumented and authenticated
//! with the browser session (CSRF token plus cookies), not with API keys.
//!
//! Every call is a single blocking POST. There is no retry: a failure in any
//! request is returned as-is and the caller aborts the export.

use crate::config::ConnectionConfig;
use crate::record::RecordPage;
use crate::session::Session;
use crate::source::{ExchangeKind, FetchError, RecordSource, TradeFilter};
use crate::timestamp::TimeBasis;
use crate::window::Window;
use tracing::{debug, info, warn};

pub const TRADES_PATH: &str = "/exchange/private/userTrades";
pub const MONEY_LOG_PATH: &str = "/user/getMoneyLog.html";

/// Authenticated connection to the Binance website.
pub struct BinanceConnection {
    client: reqwest::blocking::Client,
    config: ConnectionConfig,
    time_basis: TimeBasis,
}

impl BinanceConnection {
    pub fn new(
        session: &Session,
        config: ConnectionConfig,
        time_basis: TimeBasis,
    ) -> Result<Self, FetchError> {
        config.validate()?;

        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(session.headers(&config)?)
            .redirect(reqwest::redirect::Policy::limited(10));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
            time_basis,
        })
    }

    /// Form body for one trade window.
    pub fn trade_form(
        &self,
        window: &Window,
        filter: &TradeFilter,
    ) -> Result<Vec<(&'static str, String)>, FetchError> {
        Ok(vec![
            ("start", self.time_basis.epoch_millis(window.start)?.to_string()),
            ("end", self.time_basis.epoch_millis(window.end)?.to_string()),
            ("rows", self.config.page_size.to_string()),
            (
                "direction",
                filter.side.map(|s| s.as_str()).unwrap_or("").to_string(),
            ),
            ("baseAsset", String::new()),
            ("quoteAsset", String::new()),
            ("symbol", filter.symbol.clone().unwrap_or_default()),
        ])
    }

    /// Form body for the money log. `rows = 0` asks for everything at once.
    pub fn money_log_form(kind: ExchangeKind, coin: Option<&str>) -> Vec<(&'static str, String)> {
        vec![
            ("coin", coin.unwrap_or("").to_string()),
            ("direction", kind.direction().to_string()),
            ("rows", "0".to_string()),
            ("page", "1".to_string()),
            ("status", String::new()),
        ]
    }

    fn post(&self, path: &str, form: &[(&'static str, String)]) -> Result<RecordPage, FetchError> {
        let url = self.config.endpoint(path);
        debug!(%url, "POST");

        let resp = self.client.post(&url).form(form).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { status, url });
        }

        let body = resp.text()?;
        let page = RecordPage::from_json(&body)?;
        if page.is_truncated() {
            warn!(
                pages = page.pages.unwrap_or_default(),
                rows = page.data.len(),
                %url,
                "response has more pages than were fetched"
            );
        }
        Ok(page)
    }
}

impl RecordSource for BinanceConnection {
    fn name(&self) -> &str {
        "binance_web"
    }

    fn trades(&self, window: &Window, filter: &TradeFilter) -> Result<RecordPage, FetchError> {
        info!("Get trades from {} to {}", window.start, window.end);
        let form = self.trade_form(window, filter)?;
        self.post(TRADES_PATH, &form)
    }

    fn exchanges(&self, kind: ExchangeKind, coin: Option<&str>) -> Result<RecordPage, FetchError> {
        let form = Self::money_log_form(kind, coin);
        self.post(MONEY_LOG_PATH, &form)
    }
}
