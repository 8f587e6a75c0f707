//! Ticker CLI: market data and technical indicators from Yahoo Finance.
//!
//! Commands:
//! - `quote`, `chart`, `search`, `news`, `summary`, `options`
//! - `insights`, `recommendations`, `screener`
//! - `indicator`: SMA, EMA, RSI, MACD, or Bollinger Bands over a symbol's closes
//!
//! Output is pretty JSON by default; `--table` switches to ASCII tables and
//! `--compact` to single-line JSON.

mod logging;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use ticker_core::config::AppConfig;
use ticker_core::data::{MarketDataProvider, SearchOptions, YahooProvider};
use ticker_core::domain::{OptionSide, ScreenerQuery, DEFAULT_SUMMARY_MODULES};
use ticker_core::format::{render, OutputOptions};
use ticker_core::indicators::{calculate, IndicatorOverrides, IndicatorSpec};
use ticker_core::range::{parse_date, HistoryRequest, Interval, Period, RangeOptions};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "ticker",
    version,
    about = "Ticker CLI: quotes, charts, news, and technical indicators from Yahoo Finance"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as an ASCII table instead of JSON.
    #[arg(long, global = true)]
    table: bool,

    /// Single-line JSON instead of pretty-printed.
    #[arg(long, global = true)]
    compact: bool,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Current quotes for one or more symbols.
    Quote {
        /// Symbols (e.g., AAPL MSFT).
        #[arg(required = true)]
        symbols: Vec<String>,
    },
    /// Historical OHLCV bars.
    Chart {
        symbol: String,

        /// Preset period: 1d, 5d, 1w, 1mo, 3mo, 6mo, 1y, 2y, 5y. Defaults to 1mo.
        #[arg(short, long)]
        period: Option<Period>,

        /// Start date (YYYY-MM-DD).
        #[arg(short, long, value_parser = parse_date)]
        start: Option<NaiveDate>,

        /// End date (YYYY-MM-DD). Requires --start.
        #[arg(short, long, value_parser = parse_date)]
        end: Option<NaiveDate>,

        /// Bar interval: 1m, 5m, 15m, 30m, 1h, 1d, 1w, 1mo. Defaults from the period.
        #[arg(short, long)]
        interval: Option<Interval>,
    },
    /// Search for symbols.
    Search {
        query: String,

        /// Include up to 10 quote matches.
        #[arg(long)]
        quotes: bool,

        /// Include up to 5 news articles.
        #[arg(long)]
        news: bool,
    },
    /// Quote summary modules.
    Summary {
        symbol: String,

        /// Comma-separated modules. Defaults to summaryProfile,summaryDetail,defaultKeyStatistics.
        #[arg(short, long, value_delimiter = ',')]
        modules: Vec<String>,
    },
    /// News articles for a symbol.
    News {
        symbol: String,

        /// Number of articles.
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Technical outlook, key levels, and company snapshot.
    Insights { symbol: String },
    /// Option chain for the nearest (or given) expiration.
    Options {
        symbol: String,

        /// Expiration date (YYYY-MM-DD).
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Show only calls.
        #[arg(long)]
        calls: bool,

        /// Show only puts.
        #[arg(long)]
        puts: bool,
    },
    /// Symbols similar to the given one.
    Recommendations { symbol: String },
    /// Predefined stock screens.
    Screener {
        /// most_actives, day_gainers, day_losers, undervalued_growth_stocks,
        /// undervalued_large_caps, growth_technology_stocks, top_mutual_funds.
        #[arg(short, long, default_value = "most_actives")]
        query: ScreenerQuery,
    },
    /// Technical indicator over daily closes. Available: sma, ema, rsi, macd, bb.
    Indicator {
        symbol: String,

        /// sma, ema, rsi, macd, or bb (also: bollinger, bollingerbands).
        name: String,

        /// Preset period of history. Defaults to 3mo.
        #[arg(short, long)]
        period: Option<Period>,

        /// Start date (YYYY-MM-DD).
        #[arg(short, long, value_parser = parse_date)]
        start: Option<NaiveDate>,

        /// End date (YYYY-MM-DD). Requires --start.
        #[arg(short, long, value_parser = parse_date)]
        end: Option<NaiveDate>,

        /// Window for SMA/EMA/RSI/BB (default: 20, RSI 14).
        #[arg(long, allow_negative_numbers = true)]
        length: Option<i64>,

        /// MACD short EMA (default: 12).
        #[arg(long, allow_negative_numbers = true)]
        short: Option<i64>,

        /// MACD long EMA (default: 26).
        #[arg(long, allow_negative_numbers = true)]
        long: Option<i64>,

        /// MACD signal EMA (default: 9).
        #[arg(long, allow_negative_numbers = true)]
        signal: Option<i64>,

        /// Bollinger band width in standard deviations (default: 2).
        #[arg(long, allow_negative_numbers = true)]
        stddev: Option<f64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let output = OutputOptions {
        table: cli.table || config.output.table,
        pretty: config.output.pretty && !cli.compact,
    };
    let provider = YahooProvider::new(&config.provider)?;
    debug!(provider = provider.name(), ?output, "starting");

    let today = Local::now().date_naive();
    let text = execute(cli.command, &provider, &config, output, today)?;
    println!("{}", text.trim_end());
    Ok(())
}

/// Run one command against `provider` and render its output.
fn execute(
    command: Commands,
    provider: &dyn MarketDataProvider,
    config: &AppConfig,
    output: OutputOptions,
    today: NaiveDate,
) -> Result<String> {
    let text = match command {
        Commands::Quote { symbols } => {
            let quotes = provider
                .quotes(&symbols)
                .with_context(|| format!("fetching quotes for {}", symbols.join(", ")))?;
            render(&quotes, output)?
        }
        Commands::Chart {
            symbol,
            period,
            start,
            end,
            interval,
        } => {
            let opts = RangeOptions {
                period,
                start,
                end,
                interval,
            };
            let request = HistoryRequest::resolve(&symbol, opts, config.chart.period, today)?;
            let series = provider
                .chart(&request)
                .with_context(|| format!("fetching chart for {symbol}"))?;
            render(&series, output)?
        }
        Commands::Search {
            query,
            quotes,
            news,
        } => {
            let options = SearchOptions {
                include_quotes: quotes,
                include_news: news,
            };
            let result = provider
                .search(&query, options)
                .with_context(|| format!("searching for '{query}'"))?;
            render(&result, output)?
        }
        Commands::Summary { symbol, modules } => {
            let modules = if modules.is_empty() {
                DEFAULT_SUMMARY_MODULES.iter().map(|m| m.to_string()).collect()
            } else {
                modules
            };
            let summary = provider
                .summary(&symbol, &modules)
                .with_context(|| format!("fetching summary for {symbol}"))?;
            render(&summary, output)?
        }
        Commands::News { symbol, limit } => {
            let news = provider
                .news(&symbol, limit)
                .with_context(|| format!("fetching news for {symbol}"))?;
            render(&news, output)?
        }
        Commands::Insights { symbol } => {
            let insights = provider
                .insights(&symbol)
                .with_context(|| format!("fetching insights for {symbol}"))?;
            render(&insights, output)?
        }
        Commands::Options {
            symbol,
            date,
            calls,
            puts,
        } => {
            let chain = provider
                .options(&symbol, date)
                .with_context(|| format!("fetching options for {symbol}"))?
                .filter(OptionSide::from_flags(calls, puts));
            render(&chain, output)?
        }
        Commands::Recommendations { symbol } => {
            let recs = provider
                .recommendations(&symbol)
                .with_context(|| format!("fetching recommendations for {symbol}"))?;
            render(&recs, output)?
        }
        Commands::Screener { query } => {
            let result = provider
                .screener(query)
                .with_context(|| format!("running screener {query}"))?;
            render(&result, output)?
        }
        Commands::Indicator {
            symbol,
            name,
            period,
            start,
            end,
            length,
            short,
            long,
            signal,
            stddev,
        } => {
            let overrides = IndicatorOverrides {
                length,
                short,
                long,
                signal,
                stddev,
            };
            // Reject bad names and parameters before touching the network.
            let spec = IndicatorSpec::resolve(name.parse()?, &overrides)?;
            debug!(?spec, "resolved indicator");

            let opts = RangeOptions {
                period,
                start,
                end,
                interval: Some(Interval::OneDay),
            };
            let request = HistoryRequest::resolve(&symbol, opts, config.indicator.period, today)?;
            let series = provider
                .chart(&request)
                .with_context(|| format!("fetching history for {symbol}"))?;

            let result = calculate(&name, &series.data, &overrides)?.with_symbol(symbol);
            render(&result, output)?
        }
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::sync::Mutex;
    use ticker_core::data::DataError;
    use ticker_core::domain::{
        Bar, ChartSeries, Insights, NewsResult, OptionChain, OptionContract, QuoteList,
        Recommendations, ScreenerResult, SearchResult, Summary,
    };

    /// Serves a fixed close series and records chart requests.
    struct StubProvider {
        closes: Vec<f64>,
        requests: Mutex<Vec<HistoryRequest>>,
    }

    impl StubProvider {
        fn new(closes: Vec<f64>) -> Self {
            Self {
                closes,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn chart_requests(&self) -> Vec<HistoryRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl MarketDataProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn quotes(&self, symbols: &[String]) -> Result<QuoteList, DataError> {
            Err(DataError::SymbolNotFound {
                symbol: symbols.join(","),
            })
        }

        fn chart(&self, request: &HistoryRequest) -> Result<ChartSeries, DataError> {
            self.requests.lock().unwrap().push(request.clone());
            let data = self
                .closes
                .iter()
                .enumerate()
                .map(|(i, &close)| Bar {
                    date: request.start + chrono::Days::new(i as u64),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 1000,
                    adj_close: None,
                })
                .collect();
            Ok(ChartSeries {
                symbol: request.symbol.clone(),
                period: request.period,
                interval: request.interval,
                start: request.start,
                end: request.end,
                data,
            })
        }

        fn search(
            &self,
            _query: &str,
            _options: SearchOptions,
        ) -> Result<SearchResult, DataError> {
            Err(DataError::RateLimited)
        }

        fn news(&self, _symbol: &str, _limit: usize) -> Result<NewsResult, DataError> {
            Err(DataError::RateLimited)
        }

        fn options(
            &self,
            symbol: &str,
            _expiration: Option<NaiveDate>,
        ) -> Result<OptionChain, DataError> {
            let contract = OptionContract {
                contract_symbol: format!("{symbol}C"),
                strike: 100.0,
                last_price: 1.0,
                change: 0.0,
                bid: 0.9,
                ask: 1.1,
                volume: 10,
                open_interest: 20,
                implied_volatility: 30.0,
                in_the_money: false,
                expiration_date: None,
            };
            Ok(OptionChain {
                symbol: symbol.to_string(),
                expiration_date: None,
                underlying_price: Some(99.0),
                calls: Some(vec![contract.clone()]),
                puts: Some(vec![contract]),
            })
        }

        fn summary(&self, symbol: &str, modules: &[String]) -> Result<Summary, DataError> {
            assert_eq!(modules.len(), 3);
            Ok(Summary {
                symbol: symbol.to_string(),
                ..Default::default()
            })
        }

        fn recommendations(&self, symbol: &str) -> Result<Recommendations, DataError> {
            Ok(Recommendations::empty(symbol))
        }

        fn screener(&self, query: ScreenerQuery) -> Result<ScreenerResult, DataError> {
            Ok(ScreenerResult::empty(query))
        }

        fn insights(&self, symbol: &str) -> Result<Insights, DataError> {
            Ok(Insights::empty(symbol))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
    }

    fn compact() -> OutputOptions {
        OutputOptions {
            table: false,
            pretty: false,
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ticker").chain(args.iter().copied())).unwrap()
    }

    fn run_args(provider: &StubProvider, args: &[&str], output: OutputOptions) -> Result<String> {
        execute(parse(args).command, provider, &AppConfig::default(), output, today())
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn indicator_command_renders_result_json() {
        let provider = StubProvider::new((100..130).map(f64::from).collect());
        let args = ["indicator", "AAPL", "sma", "--length", "5"];
        let text = run_args(&provider, &args, compact()).unwrap();

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["indicator"], "SMA");
        assert_eq!(json["config"], serde_json::json!({"length": 5}));
        assert_eq!(json["data"].as_array().unwrap().len(), 30);
        assert!(json["data"][3].get("value").is_none());
        assert_eq!(json["data"][29]["value"], 127.0);

        let requests = provider.chart_requests();
        assert_eq!(requests[0].period, Some(Period::ThreeMonths));
        assert_eq!(requests[0].interval, Interval::OneDay);
    }

    #[test]
    fn unknown_indicator_fails_before_fetching() {
        let provider = StubProvider::new(vec![1.0; 5]);
        let err = run_args(&provider, &["indicator", "AAPL", "bogus"], compact()).unwrap_err();

        assert!(err.to_string().contains("unknown indicator 'bogus'"));
        assert!(provider.chart_requests().is_empty());
    }

    #[test]
    fn negative_length_is_rejected() {
        let provider = StubProvider::new(vec![1.0; 5]);
        let args = ["indicator", "AAPL", "ema", "--length", "-3"];
        let err = run_args(&provider, &args, compact()).unwrap_err();
        assert!(err.to_string().contains("length"));
    }

    #[test]
    fn chart_uses_configured_default_period() {
        let provider = StubProvider::new(vec![1.0, 2.0]);
        run_args(&provider, &["chart", "MSFT"], compact()).unwrap();

        let req = &provider.chart_requests()[0];
        assert_eq!(req.period, Some(Period::OneMonth));
        assert_eq!(req.start, NaiveDate::from_ymd_opt(2024, 5, 28).unwrap());
    }

    #[test]
    fn provider_errors_carry_context() {
        let provider = StubProvider::new(Vec::new());
        let err = run_args(&provider, &["quote", "ZZZZ"], compact()).unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "fetching quotes for ZZZZ: symbol not found: ZZZZ"
        );
    }

    #[test]
    fn options_side_flags_filter_the_chain() {
        let provider = StubProvider::new(Vec::new());
        let text = run_args(&provider, &["options", "AAPL", "--puts"], compact()).unwrap();

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(json.get("calls").is_none());
        assert_eq!(json["puts"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn summary_defaults_modules() {
        let provider = StubProvider::new(Vec::new());
        run_args(&provider, &["summary", "AAPL"], compact()).unwrap();
    }

    #[test]
    fn screener_query_is_validated_by_clap() {
        let parsed = Cli::try_parse_from(["ticker", "screener", "-q", "hot_stocks"]);
        assert!(parsed.is_err());

        let cli = parse(&["--table", "screener", "-q", "day_losers"]);
        assert!(cli.table);
        let provider = StubProvider::new(Vec::new());
        let output = OutputOptions {
            table: true,
            pretty: true,
        };
        let text = execute(cli.command, &provider, &AppConfig::default(), output, today())
            .unwrap();
        assert!(text.starts_with("Screener Results: day_losers"));
    }
}
