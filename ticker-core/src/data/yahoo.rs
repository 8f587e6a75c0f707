//! Yahoo Finance data provider.
//!
//! Blocking HTTP against Yahoo's public JSON endpoints. Each request is made
//! once: a failed call surfaces as a `DataError` and the command aborts. The
//! exceptions are insights, recommendations, and screener, which degrade to
//! an empty payload.
//!
//! Response parsing lives in `payload` so it can be tested without a network.

use super::payload::{
    parse_chart, parse_insights, parse_news, parse_options, parse_quotes, parse_recommendations,
    parse_screener, parse_search, parse_summary, ChartResponse, FinanceResponse, OptionsResponse,
    QuoteResponse, RawInsights, RawRecommendation, RawScreen, SearchResponse, SummaryResponse,
};
use super::provider::{DataError, MarketDataProvider, SearchOptions};
use crate::config::ProviderConfig;
use crate::domain::{
    ChartSeries, Insights, NewsResult, OptionChain, QuoteList, Recommendations, ScreenerQuery,
    ScreenerResult, SearchResult, Summary,
};
use crate::range::HistoryRequest;
use chrono::{NaiveDate, NaiveTime, Utc};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const SEARCH_QUOTES_COUNT: usize = 10;
const SEARCH_NEWS_COUNT: usize = 5;
const SCREENER_COUNT: usize = 100;

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    base_url: Url,
}

impl YahooProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, DataError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| DataError::Other(format!("invalid base URL '{}': {e}", config.base_url)))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// `base_url` + path segments (each percent-encoded) + query.
    fn endpoint(&self, path: &[&str], params: &[(&str, String)]) -> Result<Url, DataError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DataError::Other(format!("base URL '{}' cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(path);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    /// One GET, status-checked and deserialized. `target` names the symbol or
    /// query in error messages.
    fn get_json<T: DeserializeOwned>(&self, url: Url, target: &str) -> Result<T, DataError> {
        debug!(%url, "GET");
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        check_status(resp.status(), target)?;

        resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {target}: {e}"))
        })
    }
}

/// Map a non-success HTTP status onto the error taxonomy.
pub fn check_status(status: StatusCode, target: &str) -> Result<(), DataError> {
    if status.is_success() {
        return Ok(());
    }
    Err(match status {
        StatusCode::UNAUTHORIZED => {
            DataError::AuthenticationRequired("Yahoo Finance requires authentication".into())
        }
        StatusCode::NOT_FOUND => DataError::SymbolNotFound {
            symbol: target.to_string(),
        },
        StatusCode::TOO_MANY_REQUESTS => DataError::RateLimited,
        other => DataError::Http {
            status: other.as_u16(),
            target: target.to_string(),
        },
    })
}

fn unix_start(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

fn unix_end(date: NaiveDate) -> i64 {
    unix_start(date) + 86_399
}

/// Log and swallow a provider failure for the families that tolerate one.
fn degrade<T>(
    family: &str,
    target: &str,
    result: Result<T, DataError>,
    empty: impl FnOnce() -> T,
) -> T {
    result.unwrap_or_else(|e| {
        warn!(family, target, error = %e, "provider call failed, returning empty result");
        empty()
    })
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn quotes(&self, symbols: &[String]) -> Result<QuoteList, DataError> {
        let joined = symbols.join(",");
        let url = self.endpoint(&["v7", "finance", "quote"], &[("symbols", joined.clone())])?;
        let resp: QuoteResponse = self.get_json(url, &joined)?;
        parse_quotes(symbols, resp, Utc::now())
    }

    fn chart(&self, request: &HistoryRequest) -> Result<ChartSeries, DataError> {
        let url = self.endpoint(
            &["v8", "finance", "chart", request.symbol.as_str()],
            &[
                ("period1", unix_start(request.start).to_string()),
                ("period2", unix_end(request.end).to_string()),
                ("interval", request.interval.provider_code().to_string()),
                ("includeAdjustedClose", "true".to_string()),
            ],
        )?;
        let resp: ChartResponse = self.get_json(url, &request.symbol)?;
        parse_chart(request, resp)
    }

    fn search(&self, query: &str, options: SearchOptions) -> Result<SearchResult, DataError> {
        let mut params = vec![("q", query.to_string())];
        if options.include_quotes {
            params.push(("quotesCount", SEARCH_QUOTES_COUNT.to_string()));
        }
        let news_count = if options.include_news {
            SEARCH_NEWS_COUNT
        } else {
            0
        };
        params.push(("newsCount", news_count.to_string()));
        let url = self.endpoint(&["v1", "finance", "search"], &params)?;
        let resp: SearchResponse = self.get_json(url, query)?;
        Ok(parse_search(query, resp, options.include_news))
    }

    fn news(&self, symbol: &str, limit: usize) -> Result<NewsResult, DataError> {
        let url = self.endpoint(
            &["v1", "finance", "search"],
            &[
                ("q", symbol.to_string()),
                ("quotesCount", "0".to_string()),
                ("newsCount", limit.to_string()),
            ],
        )?;
        let resp: SearchResponse = self.get_json(url, symbol)?;
        Ok(parse_news(symbol, resp, limit))
    }

    fn options(
        &self,
        symbol: &str,
        expiration: Option<NaiveDate>,
    ) -> Result<OptionChain, DataError> {
        let params: Vec<_> = expiration
            .map(|d| ("date", unix_start(d).to_string()))
            .into_iter()
            .collect();
        let url = self.endpoint(&["v7", "finance", "options", symbol], &params)?;
        let resp: OptionsResponse = self.get_json(url, symbol)?;
        parse_options(symbol, resp)
    }

    fn summary(&self, symbol: &str, modules: &[String]) -> Result<Summary, DataError> {
        let url = self.endpoint(
            &["v10", "finance", "quoteSummary", symbol],
            &[("modules", modules.join(","))],
        )?;
        let resp: SummaryResponse = self.get_json(url, symbol)?;
        parse_summary(symbol, resp)
    }

    fn recommendations(&self, symbol: &str) -> Result<Recommendations, DataError> {
        let fetched = self
            .endpoint(&["v6", "finance", "recommendationsbysymbol", symbol], &[])
            .and_then(|url| self.get_json::<FinanceResponse<Vec<RawRecommendation>>>(url, symbol))
            .and_then(|resp| parse_recommendations(symbol, resp));
        Ok(degrade("recommendations", symbol, fetched, || {
            Recommendations::empty(symbol)
        }))
    }

    fn screener(&self, query: ScreenerQuery) -> Result<ScreenerResult, DataError> {
        let fetched = self
            .endpoint(
                &["v1", "finance", "screener", "predefined", "saved"],
                &[
                    ("scrIds", query.as_str().to_string()),
                    ("count", SCREENER_COUNT.to_string()),
                ],
            )
            .and_then(|url| self.get_json::<FinanceResponse<Vec<RawScreen>>>(url, query.as_str()))
            .and_then(|resp| parse_screener(query, resp));
        Ok(degrade("screener", query.as_str(), fetched, || {
            ScreenerResult::empty(query)
        }))
    }

    fn insights(&self, symbol: &str) -> Result<Insights, DataError> {
        let fetched = self
            .endpoint(
                &["ws", "insights", "v2", "finance", "insights"],
                &[("symbol", symbol.to_string())],
            )
            .and_then(|url| self.get_json::<FinanceResponse<RawInsights>>(url, symbol))
            .and_then(|resp| parse_insights(symbol, resp));
        Ok(degrade("insights", symbol, fetched, || Insights::empty(symbol)))
    }
}
