//! deltaconv CLI: export Binance trade, deposit, and withdrawal history to CSV.
//!
//! The Binance website only lets you export three months of trade history at
//! a time. This tool replays a logged-in browser session (cookies plus the
//! `csrftoken` header) against the site's own endpoints and walks the range in
//! 28-day windows, writing everything to one semicolon-delimited file.
//!
//! Modes:
//! - `trading`: trade history between `--start` and `--end`
//! - `deposit`: full deposit log
//! - `withdrawal`: full withdrawal log

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use deltaconv_core::{
    export_csv, parse_timestamp, BinanceConnection, ConnectionConfig, ExportRequest, Mode,
    Session, Side, TimeBasis, TimeRange, TradeFilter,
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "deltaconv",
    about = "Export Binance trade, deposit, and withdrawal history to CSV",
    long_about = "Retrieves detailed trading information from the Binance website without \
                  the restrictions of the public API. Works around the three-month limit on \
                  trade history exports by querying in 28-day windows."
)]
struct Cli {
    /// File whose first line holds the cookies of a logged-in Binance session.
    #[arg(long)]
    cookies: PathBuf,

    /// The csrftoken HTTP header of that session.
    #[arg(long)]
    token: String,

    /// CSV file to write (semicolon-delimited).
    #[arg(long)]
    output: PathBuf,

    /// What to export: trading, deposit, or withdrawal.
    #[arg(long)]
    mode: Mode,

    /// Start of the trade history range, YYYY-MM-DD HH:MM:SS. Required in trading mode.
    #[arg(long, help_heading = "Trade history")]
    start: Option<String>,

    /// End of the trade history range, YYYY-MM-DD HH:MM:SS. Defaults to now.
    #[arg(long, help_heading = "Trade history")]
    end: Option<String>,

    /// Trade symbol (trading mode, e.g. ETHBTC) or coin (deposit/withdrawal, e.g. BTC).
    #[arg(long)]
    symbol: Option<String>,

    /// Only trades on this side.
    #[arg(long, value_enum, help_heading = "Trade history")]
    side: Option<SideArg>,

    /// Interpret --start/--end as UTC instead of local time.
    #[arg(long, default_value_t = false)]
    utc: bool,

    /// TOML file with connection settings (base_url, page_size, user_agent, ...).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SideArg {
    Buy,
    Sell,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Buy => Side::Buy,
            SideArg::Sell => Side::Sell,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    run(cli)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new("[%Y-%m-%d %H:%M:%S]".to_string()))
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal())
        .with_writer(std::io::stdout)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mode = cli.mode;
    let time_basis = if cli.utc {
        TimeBasis::Utc
    } else {
        TimeBasis::Local
    };

    let request = build_request(&cli, mode, time_basis)?;

    let config = match &cli.config {
        Some(path) => ConnectionConfig::from_file(path)?,
        None => ConnectionConfig::default(),
    };
    let session = Session::from_cookie_file(&cli.token, &cli.cookies)
        .with_context(|| format!("failed to read cookies from {}", cli.cookies.display()))?;
    let connection = BinanceConnection::new(&session, config, time_basis)?;

    info!("Export mode: {mode}");
    let records = mode.run(&connection, &request)?;

    write_output(&cli.output, &records)
}

/// Validate the arguments for `mode` and parse the time range.
fn build_request(cli: &Cli, mode: Mode, time_basis: TimeBasis) -> Result<ExportRequest> {
    let mut request = ExportRequest::default();

    match mode {
        Mode::Trading => {
            let Some(start) = cli.start.as_deref() else {
                bail!("The --start time is required in \"trading\" mode.");
            };
            let start = parse_timestamp("start", start)?;
            let end = match cli.end.as_deref() {
                Some(end) => parse_timestamp("end", end)?,
                None => time_basis.now(),
            };
            if start > end {
                bail!("--start ({start}) must not be after --end ({end})");
            }
            request.range = Some(TimeRange { start, end });
            request.filter = TradeFilter {
                symbol: cli.symbol.clone(),
                side: cli.side.map(Side::from),
            };
        }
        Mode::Deposit | Mode::Withdrawal => {
            request.coin = cli.symbol.clone();
        }
    }

    Ok(request)
}

fn write_output(path: &Path, records: &[deltaconv_core::Record]) -> Result<()> {
    let written = export_csv(path, records)
        .with_context(|| format!("failed to write CSV {}", path.display()))?;
    if written {
        info!("Wrote {} records to {}", records.len(), path.display());
    } else {
        info!("No records found, {} was not written", path.display());
    }
    Ok(())
}
