//! Yahoo Finance JSON payloads and their conversion into domain types.
//!
//! Everything here is transport-free: the `parse_*` functions take an already
//! deserialized response so they can be exercised from fixture JSON.
//!
//! Yahoo has no official API and changes its response shapes without notice.
//! Fields are optional wherever the live API has been seen to omit them.

use super::provider::DataError;
use crate::domain::{
    AnalystView, Bar, ChartSeries, CompanySnapshot, FinancialData, Insights, KeyTechnicals,
    NewsItem, NewsResult, OptionChain, OptionContract, Quote, QuoteList, RecommendedSymbol,
    Recommendations, ScreenerQuery, ScreenerQuote, ScreenerResult, SearchMatch, SearchResult,
    Summary, SummaryDetail, SummaryProfile, TechnicalOutlook,
};
use crate::range::HistoryRequest;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

// ─── Shared envelope ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct YahooError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl YahooError {
    fn into_data_error(self, symbol: &str) -> DataError {
        if self.code.eq_ignore_ascii_case("Not Found") {
            DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            }
        } else {
            DataError::ResponseFormatChanged(format!("{}: {}", self.code, self.description))
        }
    }
}

/// The `{ "result": ..., "error": ... }` wrapper most endpoints use.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub result: Option<T>,
    pub error: Option<YahooError>,
}

impl<T> Envelope<T> {
    fn into_result(self, symbol: &str) -> Result<T, DataError> {
        if let Some(err) = self.error {
            return Err(err.into_data_error(symbol));
        }
        self.result
            .ok_or_else(|| DataError::ResponseFormatChanged("empty result with no error".into()))
    }
}

fn first<T>(items: Vec<T>, symbol: &str) -> Result<T, DataError> {
    items.into_iter().next().ok_or_else(|| DataError::SymbolNotFound {
        symbol: symbol.to_string(),
    })
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

fn date_from_timestamp(secs: i64) -> Option<NaiveDate> {
    timestamp(secs).map(|dt| dt.date_naive())
}

/// `{ "raw": 1.5, "fmt": "1.50" }` as used by the quoteSummary modules.
/// Missing values come back as `{}`.
#[derive(Debug, Default, Deserialize)]
pub struct RawNumber {
    #[serde(default)]
    pub raw: Option<f64>,
}

fn raw(v: &Option<RawNumber>) -> Option<f64> {
    v.as_ref().and_then(|n| n.raw)
}

// ─── Chart ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Envelope<Vec<ChartData>>,
}

#[derive(Debug, Deserialize)]
pub struct ChartData {
    pub timestamp: Option<Vec<i64>>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<ChartQuote>,
    pub adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
pub struct AdjCloseData {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

/// Build the bar series for `request`.
///
/// Rows with a missing open or close are non-trading rows and are dropped.
/// A missing high or low becomes NaN, a missing volume 0. A window with no
/// timestamps at all yields an empty series.
pub fn parse_chart(request: &HistoryRequest, resp: ChartResponse) -> Result<ChartSeries, DataError> {
    let symbol = request.symbol.as_str();
    let data = first(resp.chart.into_result(symbol)?, symbol)?;

    let timestamps = data.timestamp.unwrap_or_default();
    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();
    let adj_closes = data
        .indicators
        .adjclose
        .and_then(|v| v.into_iter().next())
        .map(|a| a.adjclose);

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let (Some(open), Some(close)) = (
            quote.open.get(i).copied().flatten(),
            quote.close.get(i).copied().flatten(),
        ) else {
            continue;
        };
        let date = date_from_timestamp(ts)
            .ok_or_else(|| DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}")))?;

        bars.push(Bar {
            date,
            open,
            high: quote.high.get(i).copied().flatten().unwrap_or(f64::NAN),
            low: quote.low.get(i).copied().flatten().unwrap_or(f64::NAN),
            close,
            volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
            adj_close: adj_closes.as_ref().and_then(|v| v.get(i).copied().flatten()),
        });
    }

    let dropped = timestamps.len() - bars.len();
    let insane = bars.iter().filter(|b| !b.is_sane()).count();
    debug!(symbol, bars = bars.len(), dropped, insane, "parsed chart");

    Ok(ChartSeries {
        symbol: symbol.to_string(),
        period: request.period,
        interval: request.interval,
        start: request.start,
        end: request.end,
        data: bars,
    })
}

// ─── Quotes ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub quote_response: Envelope<Vec<RawQuote>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuote {
    #[serde(default)]
    pub symbol: String,
    pub short_name: Option<String>,
    pub regular_market_price: Option<f64>,
    pub regular_market_previous_close: Option<f64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub regular_market_volume: Option<u64>,
    pub average_daily_volume3_month: Option<u64>,
    pub market_cap: Option<f64>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<f64>,
    pub regular_market_open: Option<f64>,
    pub regular_market_day_high: Option<f64>,
    pub regular_market_day_low: Option<f64>,
    pub regular_market_time: Option<i64>,
}

/// Quotes in the order the provider returned them. `now` stamps quotes that
/// carry no market time.
pub fn parse_quotes(
    symbols: &[String],
    resp: QuoteResponse,
    now: DateTime<Utc>,
) -> Result<QuoteList, DataError> {
    let joined = symbols.join(",");
    let raw = resp.quote_response.into_result(&joined)?;
    if raw.is_empty() {
        return Err(DataError::SymbolNotFound { symbol: joined });
    }

    let quotes = raw
        .into_iter()
        .map(|q| {
            let price = q.regular_market_price.unwrap_or(0.0);
            let previous_close = q.regular_market_previous_close.unwrap_or(0.0);
            let (change, change_percent) = Quote::change_from(price, previous_close);
            Quote {
                symbol: q.symbol,
                short_name: q.short_name,
                price,
                change,
                change_percent,
                bid: q.bid,
                ask: q.ask,
                volume: q.regular_market_volume,
                avg_volume: q.average_daily_volume3_month,
                market_cap: q.market_cap,
                pe: q.trailing_pe,
                open: q.regular_market_open,
                high: q.regular_market_day_high,
                low: q.regular_market_day_low,
                previous_close,
                timestamp: q.regular_market_time.and_then(timestamp).unwrap_or(now),
            }
        })
        .collect();

    Ok(QuoteList { quotes })
}

// ─── Search / news ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub quotes: Vec<RawSearchQuote>,
    #[serde(default)]
    pub news: Vec<RawNews>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchQuote {
    #[serde(default)]
    pub symbol: String,
    pub shortname: Option<String>,
    pub longname: Option<String>,
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub quote_type: String,
    pub score: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNews {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub link: String,
    pub provider_publish_time: Option<i64>,
    pub thumbnail: Option<RawThumbnail>,
    #[serde(default)]
    pub related_tickers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawThumbnail {
    #[serde(default)]
    pub resolutions: Vec<RawResolution>,
}

#[derive(Debug, Deserialize)]
pub struct RawResolution {
    pub url: String,
}

impl From<RawNews> for NewsItem {
    fn from(n: RawNews) -> Self {
        NewsItem {
            title: n.title,
            publisher: n.publisher,
            link: n.link,
            published: n.provider_publish_time.and_then(timestamp),
            thumbnail: n
                .thumbnail
                .and_then(|t| t.resolutions.into_iter().next())
                .map(|r| r.url),
            related_tickers: n.related_tickers,
        }
    }
}

/// Symbol matches, plus news when `include_news` was requested.
pub fn parse_search(query: &str, resp: SearchResponse, include_news: bool) -> SearchResult {
    let quotes = resp
        .quotes
        .into_iter()
        .map(|q| SearchMatch {
            symbol: q.symbol,
            name: q.shortname.or(q.longname).unwrap_or_default(),
            exchange: q.exchange,
            quote_type: q.quote_type,
            score: q.score,
        })
        .collect();

    SearchResult {
        query: query.to_string(),
        quotes,
        news: include_news.then(|| resp.news.into_iter().map(NewsItem::from).collect()),
    }
}

/// News articles for `symbol`, capped at `limit`.
pub fn parse_news(symbol: &str, resp: SearchResponse, limit: usize) -> NewsResult {
    NewsResult {
        symbol: symbol.to_string(),
        news: resp
            .news
            .into_iter()
            .take(limit)
            .map(NewsItem::from)
            .collect(),
    }
}

// ─── Options ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub option_chain: Envelope<Vec<RawOptionChain>>,
}

#[derive(Debug, Deserialize)]
pub struct RawOptionChain {
    pub quote: Option<RawUnderlying>,
    #[serde(default)]
    pub options: Vec<RawExpiration>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUnderlying {
    pub regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExpiration {
    pub expiration_date: Option<i64>,
    #[serde(default)]
    pub calls: Vec<RawContract>,
    #[serde(default)]
    pub puts: Vec<RawContract>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContract {
    #[serde(default)]
    pub contract_symbol: String,
    pub strike: Option<f64>,
    pub last_price: Option<f64>,
    pub change: Option<f64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub volume: Option<u64>,
    pub open_interest: Option<u64>,
    pub implied_volatility: Option<f64>,
    pub in_the_money: Option<bool>,
}

impl RawContract {
    fn into_contract(self, expiration_date: Option<NaiveDate>) -> OptionContract {
        OptionContract {
            contract_symbol: self.contract_symbol,
            strike: self.strike.unwrap_or(0.0),
            last_price: self.last_price.unwrap_or(0.0),
            change: self.change.unwrap_or(0.0),
            bid: self.bid.unwrap_or(0.0),
            ask: self.ask.unwrap_or(0.0),
            volume: self.volume.unwrap_or(0),
            open_interest: self.open_interest.unwrap_or(0),
            implied_volatility: self.implied_volatility.unwrap_or(0.0) * 100.0,
            in_the_money: self.in_the_money.unwrap_or(false),
            expiration_date,
        }
    }
}

/// The first expiration block of the chain. Implied volatility is reported
/// in percent.
pub fn parse_options(symbol: &str, resp: OptionsResponse) -> Result<OptionChain, DataError> {
    let chain = first(resp.option_chain.into_result(symbol)?, symbol)?;
    let underlying_price = chain.quote.and_then(|q| q.regular_market_price);

    let Some(block) = chain.options.into_iter().next() else {
        return Ok(OptionChain {
            symbol: symbol.to_string(),
            expiration_date: None,
            underlying_price,
            calls: Some(Vec::new()),
            puts: Some(Vec::new()),
        });
    };

    let expiration_date = block.expiration_date.and_then(date_from_timestamp);
    let convert = |contracts: Vec<RawContract>| {
        contracts
            .into_iter()
            .map(|c| c.into_contract(expiration_date))
            .collect::<Vec<_>>()
    };

    Ok(OptionChain {
        symbol: symbol.to_string(),
        expiration_date,
        underlying_price,
        calls: Some(convert(block.calls)),
        puts: Some(convert(block.puts)),
    })
}

// ─── Quote summary ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub quote_summary: Envelope<Vec<RawSummary>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSummary {
    pub summary_profile: Option<RawProfile>,
    pub summary_detail: Option<RawDetail>,
    pub financial_data: Option<RawFinancialData>,
    pub default_key_statistics: Option<Value>,
    pub earnings: Option<Value>,
    pub financials: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub long_business_summary: Option<String>,
    pub website: Option<String>,
    pub full_time_employees: Option<u64>,
    pub country: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDetail {
    pub previous_close: Option<RawNumber>,
    pub open: Option<RawNumber>,
    pub day_low: Option<RawNumber>,
    pub day_high: Option<RawNumber>,
    pub fifty_two_week_low: Option<RawNumber>,
    pub fifty_two_week_high: Option<RawNumber>,
    pub volume: Option<RawNumber>,
    pub average_volume: Option<RawNumber>,
    pub market_cap: Option<RawNumber>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<RawNumber>,
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<RawNumber>,
    pub dividend_yield: Option<RawNumber>,
    pub beta: Option<RawNumber>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFinancialData {
    pub total_revenue: Option<RawNumber>,
    pub gross_profits: Option<RawNumber>,
    pub ebitda: Option<RawNumber>,
    pub operating_cashflow: Option<RawNumber>,
    pub free_cashflow: Option<RawNumber>,
    pub debt_to_equity: Option<RawNumber>,
    pub return_on_equity: Option<RawNumber>,
    pub return_on_assets: Option<RawNumber>,
}

pub fn parse_summary(symbol: &str, resp: SummaryResponse) -> Result<Summary, DataError> {
    let s = first(resp.quote_summary.into_result(symbol)?, symbol)?;

    Ok(Summary {
        symbol: symbol.to_string(),
        summary_profile: s.summary_profile.map(|p| SummaryProfile {
            sector: p.sector,
            industry: p.industry,
            description: p.long_business_summary,
            website: p.website,
            employees: p.full_time_employees,
            country: p.country,
            city: p.city,
        }),
        summary_detail: s.summary_detail.map(|d| SummaryDetail {
            previous_close: raw(&d.previous_close),
            open: raw(&d.open),
            day_low: raw(&d.day_low),
            day_high: raw(&d.day_high),
            fifty_two_week_low: raw(&d.fifty_two_week_low),
            fifty_two_week_high: raw(&d.fifty_two_week_high),
            volume: raw(&d.volume),
            average_volume: raw(&d.average_volume),
            market_cap: raw(&d.market_cap),
            pe_ratio: raw(&d.trailing_pe),
            forward_pe: raw(&d.forward_pe),
            dividend_yield: raw(&d.dividend_yield),
            beta: raw(&d.beta),
        }),
        financial_data: s.financial_data.map(|f| FinancialData {
            total_revenue: raw(&f.total_revenue),
            gross_profits: raw(&f.gross_profits),
            ebitda: raw(&f.ebitda),
            operating_cashflow: raw(&f.operating_cashflow),
            free_cashflow: raw(&f.free_cashflow),
            debt_to_equity: raw(&f.debt_to_equity),
            return_on_equity: raw(&f.return_on_equity),
            return_on_assets: raw(&f.return_on_assets),
        }),
        default_key_statistics: s.default_key_statistics,
        earnings: s.earnings,
        financials: s.financials,
    })
}

// ─── Recommendations / screener ──────────────────────────────────────

/// `{ "finance": { "result": ..., "error": ... } }`
#[derive(Debug, Deserialize)]
pub struct FinanceResponse<T> {
    pub finance: Envelope<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecommendation {
    #[serde(default)]
    pub recommended_symbols: Vec<RawRecommendedSymbol>,
}

#[derive(Debug, Deserialize)]
pub struct RawRecommendedSymbol {
    #[serde(default)]
    pub symbol: String,
    pub score: Option<f64>,
}

pub fn parse_recommendations(
    symbol: &str,
    resp: FinanceResponse<Vec<RawRecommendation>>,
) -> Result<Recommendations, DataError> {
    let recommended_symbols = resp
        .finance
        .into_result(symbol)?
        .into_iter()
        .next()
        .map(|r| r.recommended_symbols)
        .unwrap_or_default()
        .into_iter()
        .map(|r| RecommendedSymbol {
            symbol: r.symbol,
            score: r.score.unwrap_or(0.0),
        })
        .collect();

    Ok(Recommendations {
        symbol: symbol.to_string(),
        recommended_symbols,
    })
}

#[derive(Debug, Deserialize)]
pub struct RawScreen {
    pub total: Option<u64>,
    #[serde(default)]
    pub quotes: Vec<RawScreenerQuote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScreenerQuote {
    #[serde(default)]
    pub symbol: String,
    pub short_name: Option<String>,
    pub regular_market_price: Option<f64>,
    pub regular_market_change: Option<f64>,
    pub regular_market_change_percent: Option<f64>,
    pub regular_market_volume: Option<u64>,
    pub market_cap: Option<f64>,
}

pub fn parse_screener(
    query: ScreenerQuery,
    resp: FinanceResponse<Vec<RawScreen>>,
) -> Result<ScreenerResult, DataError> {
    let Some(screen) = resp.finance.into_result(query.as_str())?.into_iter().next() else {
        return Ok(ScreenerResult::empty(query));
    };

    let quotes = screen
        .quotes
        .into_iter()
        .map(|q| ScreenerQuote {
            name: q.short_name.unwrap_or_else(|| q.symbol.clone()),
            symbol: q.symbol,
            price: q.regular_market_price.unwrap_or(0.0),
            change: q.regular_market_change.unwrap_or(0.0),
            change_percent: q.regular_market_change_percent.unwrap_or(0.0),
            volume: q.regular_market_volume.unwrap_or(0),
            market_cap: q.market_cap,
        })
        .collect();

    Ok(ScreenerResult {
        query,
        quotes,
        total_results: screen.total,
    })
}

// ─── Insights ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInsights {
    pub instrument_info: Option<RawInstrumentInfo>,
    pub company_snapshot: Option<RawCompanySnapshot>,
    pub recommendation: Option<RawAnalystView>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInstrumentInfo {
    pub technical_events: Option<RawTechnicalEvents>,
    pub key_technicals: Option<RawKeyTechnicals>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTechnicalEvents {
    pub provider: Option<String>,
    pub short_term_outlook: Option<RawOutlook>,
    pub intermediate_term_outlook: Option<RawOutlook>,
    pub long_term_outlook: Option<RawOutlook>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOutlook {
    pub direction: Option<String>,
    pub score_description: Option<String>,
}

impl RawOutlook {
    /// "Bullish (Strong Bullish Evidence)", or whichever half is present.
    fn describe(self) -> Option<String> {
        match (self.direction, self.score_description) {
            (Some(d), Some(s)) => Some(format!("{d} ({s})")),
            (d, s) => d.or(s),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawKeyTechnicals {
    pub support: Option<f64>,
    pub resistance: Option<f64>,
    pub stop_loss: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCompanySnapshot {
    pub sector_info: Option<String>,
    pub company: Option<RawCompanyScores>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCompanyScores {
    pub innovativeness: Option<f64>,
    pub hiring: Option<f64>,
    pub sustainability: Option<f64>,
    pub insider_sentiments: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalystView {
    pub rating: Option<String>,
    pub target_price: Option<f64>,
    pub provider: Option<String>,
}

pub fn parse_insights(
    symbol: &str,
    resp: FinanceResponse<RawInsights>,
) -> Result<Insights, DataError> {
    let raw = resp.finance.into_result(symbol)?;
    let (technical_events, key_technicals) = match raw.instrument_info {
        Some(info) => (
            info.technical_events.map(|t| TechnicalOutlook {
                provider: t.provider,
                short_term: t.short_term_outlook.and_then(RawOutlook::describe),
                mid_term: t.intermediate_term_outlook.and_then(RawOutlook::describe),
                long_term: t.long_term_outlook.and_then(RawOutlook::describe),
            }),
            info.key_technicals.map(|k| KeyTechnicals {
                support: k.support,
                resistance: k.resistance,
                stop_loss: k.stop_loss,
            }),
        ),
        None => (None, None),
    };

    Ok(Insights {
        symbol: symbol.to_string(),
        technical_events,
        key_technicals,
        recommendation: raw.recommendation.map(|r| AnalystView {
            rating: r.rating,
            target_price: r.target_price,
            provider: r.provider,
        }),
        company_snapshot: raw.company_snapshot.map(|c| {
            let scores = c.company;
            CompanySnapshot {
                sector: c.sector_info,
                innovativeness: scores.as_ref().and_then(|s| s.innovativeness),
                hiring: scores.as_ref().and_then(|s| s.hiring),
                sustainability: scores.as_ref().and_then(|s| s.sustainability),
                insider_sentiments: scores.as_ref().and_then(|s| s.insider_sentiments),
            }
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{Interval, Period};

    fn request() -> HistoryRequest {
        HistoryRequest {
            symbol: "AAPL".into(),
            period: Some(Period::OneMonth),
            interval: Interval::OneDay,
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        }
    }

    #[test]
    fn chart_drops_rows_without_open_or_close() {
        let json = r#"{"chart":{"result":[{
            "timestamp":[1704205800,1704292200,1704378600,1704465000],
            "indicators":{
                "quote":[{
                    "open":[185.0,null,182.0,181.0],
                    "high":[188.0,null,183.0,null],
                    "low":[183.0,null,180.0,180.0],
                    "close":[185.5,null,null,181.5],
                    "volume":[1000,null,2000,null]
                }],
                "adjclose":[{"adjclose":[185.1,null,null,181.2]}]
            }
        }],"error":null}}"#;
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        let series = parse_chart(&request(), resp).unwrap();

        assert_eq!(series.symbol, "AAPL");
        assert_eq!(series.data.len(), 2);
        assert_eq!(series.data[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(series.data[0].close, 185.5);
        assert_eq!(series.data[0].adj_close, Some(185.1));
        assert!(series.data[1].high.is_nan());
        assert_eq!(series.data[1].volume, 0);
        assert_eq!(series.period, Some(Period::OneMonth));
    }

    #[test]
    fn chart_without_timestamps_is_empty() {
        let json = r#"{"chart":{"result":[{"indicators":{"quote":[{}]}}],"error":null}}"#;
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        assert!(parse_chart(&request(), resp).unwrap().data.is_empty());
    }

    #[test]
    fn chart_not_found_maps_to_symbol_error() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        let err = parse_chart(&request(), resp).unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { symbol } if symbol == "AAPL"));
    }

    #[test]
    fn quote_change_is_derived_from_previous_close() {
        let json = r#"{"quoteResponse":{"result":[{
            "symbol":"AAPL","shortName":"Apple Inc.",
            "regularMarketPrice":110.0,"regularMarketPreviousClose":100.0,
            "regularMarketVolume":5000,"trailingPE":28.5,
            "regularMarketTime":1704205800
        }],"error":null}}"#;
        let resp: QuoteResponse = serde_json::from_str(json).unwrap();
        let list = parse_quotes(&["AAPL".into()], resp, Utc::now()).unwrap();
        let q = &list.quotes[0];

        assert_eq!(q.change, 10.0);
        assert_eq!(q.change_percent, 10.0);
        assert_eq!(q.pe, Some(28.5));
        assert_eq!(q.volume, Some(5000));
        assert_eq!(q.timestamp.timestamp(), 1704205800);
    }

    #[test]
    fn quote_with_zero_previous_close_has_zero_percent() {
        let json = r#"{"quoteResponse":{"result":[{"symbol":"NEW","regularMarketPrice":5.0}],"error":null}}"#;
        let resp: QuoteResponse = serde_json::from_str(json).unwrap();
        let now = Utc::now();
        let list = parse_quotes(&["NEW".into()], resp, now).unwrap();
        assert_eq!(list.quotes[0].change, 5.0);
        assert_eq!(list.quotes[0].change_percent, 0.0);
        assert_eq!(list.quotes[0].timestamp, now);
    }

    #[test]
    fn empty_quote_result_is_not_found() {
        let json = r#"{"quoteResponse":{"result":[],"error":null}}"#;
        let resp: QuoteResponse = serde_json::from_str(json).unwrap();
        let err = parse_quotes(&["ZZZZ".into()], resp, Utc::now()).unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    const SEARCH: &str = r#"{
        "quotes":[{"symbol":"AAPL","shortname":"Apple Inc.","exchange":"NMS","quoteType":"EQUITY","score":20000.0},
                  {"symbol":"APLE","longname":"Apple Hospitality REIT","exchange":"NYQ","quoteType":"EQUITY"}],
        "news":[{"title":"Apple rises","publisher":"Wire","link":"https://example.com/a",
                 "providerPublishTime":1704205800,
                 "thumbnail":{"resolutions":[{"url":"https://example.com/t.jpg"}]},
                 "relatedTickers":["AAPL"]},
                {"title":"Second","publisher":"Wire","link":"https://example.com/b"}]
    }"#;

    #[test]
    fn search_falls_back_to_long_name() {
        let resp: SearchResponse = serde_json::from_str(SEARCH).unwrap();
        let result = parse_search("apple", resp, false);
        assert_eq!(result.quotes.len(), 2);
        assert_eq!(result.quotes[1].name, "Apple Hospitality REIT");
        assert_eq!(result.quotes[0].quote_type, "EQUITY");
        assert!(result.news.is_none());
    }

    #[test]
    fn news_is_limited_and_keeps_thumbnail() {
        let resp: SearchResponse = serde_json::from_str(SEARCH).unwrap();
        let result = parse_news("AAPL", resp, 1);
        assert_eq!(result.news.len(), 1);
        let item = &result.news[0];
        assert_eq!(item.thumbnail.as_deref(), Some("https://example.com/t.jpg"));
        assert_eq!(item.published.map(|t| t.timestamp()), Some(1704205800));
        assert_eq!(item.related_tickers, vec!["AAPL".to_string()]);
    }

    #[test]
    fn options_report_volatility_in_percent() {
        let json = r#"{"optionChain":{"result":[{
            "quote":{"regularMarketPrice":190.0},
            "options":[{"expirationDate":1705622400,
                "calls":[{"contractSymbol":"AAPL240119C00190000","strike":190.0,"lastPrice":2.5,
                          "bid":2.4,"ask":2.6,"volume":100,"openInterest":500,
                          "impliedVolatility":0.25,"inTheMoney":false}],
                "puts":[{"contractSymbol":"AAPL240119P00190000","strike":190.0}]}]
        }],"error":null}}"#;
        let resp: OptionsResponse = serde_json::from_str(json).unwrap();
        let chain = parse_options("AAPL", resp).unwrap();

        assert_eq!(chain.expiration_date, NaiveDate::from_ymd_opt(2024, 1, 19));
        assert_eq!(chain.underlying_price, Some(190.0));
        let calls = chain.calls.unwrap();
        assert_eq!(calls[0].implied_volatility, 25.0);
        assert_eq!(calls[0].open_interest, 500);
        let puts = chain.puts.unwrap();
        assert_eq!(puts[0].bid, 0.0);
        assert!(!puts[0].in_the_money);
    }

    #[test]
    fn summary_unwraps_raw_numbers() {
        let json = r#"{"quoteSummary":{"result":[{
            "summaryProfile":{"sector":"Technology","fullTimeEmployees":161000,"longBusinessSummary":"Makes phones."},
            "summaryDetail":{"marketCap":{"raw":3.0e12,"fmt":"3T"},"trailingPE":{"raw":29.1},"beta":{}},
            "defaultKeyStatistics":{"sharesOutstanding":{"raw":15500000000}}
        }],"error":null}}"#;
        let resp: SummaryResponse = serde_json::from_str(json).unwrap();
        let summary = parse_summary("AAPL", resp).unwrap();

        let detail = summary.summary_detail.unwrap();
        assert_eq!(detail.market_cap, Some(3.0e12));
        assert_eq!(detail.pe_ratio, Some(29.1));
        assert_eq!(detail.beta, None);
        let profile = summary.summary_profile.unwrap();
        assert_eq!(profile.description.as_deref(), Some("Makes phones."));
        assert_eq!(profile.employees, Some(161000));
        assert!(summary.default_key_statistics.is_some());
        assert!(summary.financial_data.is_none());
    }

    #[test]
    fn recommendations_default_missing_scores() {
        let json = r#"{"finance":{"result":[{"symbol":"AAPL","recommendedSymbols":[
            {"symbol":"MSFT","score":0.3},{"symbol":"GOOG"}]}],"error":null}}"#;
        let resp: FinanceResponse<Vec<RawRecommendation>> = serde_json::from_str(json).unwrap();
        let recs = parse_recommendations("AAPL", resp).unwrap();
        assert_eq!(recs.recommended_symbols.len(), 2);
        assert_eq!(recs.recommended_symbols[1].score, 0.0);
    }

    #[test]
    fn screener_uses_symbol_when_name_missing() {
        let json = r#"{"finance":{"result":[{"total":2,"quotes":[
            {"symbol":"NVDA","shortName":"NVIDIA","regularMarketPrice":480.0,"regularMarketChangePercent":2.5,"regularMarketVolume":40000000},
            {"symbol":"XYZ"}]}],"error":null}}"#;
        let resp: FinanceResponse<Vec<RawScreen>> = serde_json::from_str(json).unwrap();
        let result = parse_screener(ScreenerQuery::DayGainers, resp).unwrap();
        assert_eq!(result.total_results, Some(2));
        assert_eq!(result.quotes[0].name, "NVIDIA");
        assert_eq!(result.quotes[1].name, "XYZ");
        assert_eq!(result.quotes[1].price, 0.0);
    }

    #[test]
    fn insights_describe_outlooks() {
        let json = r#"{"finance":{"result":{
            "symbol":"AAPL",
            "instrumentInfo":{
                "technicalEvents":{"provider":"Trading Central",
                    "shortTermOutlook":{"direction":"Bearish","scoreDescription":"Weak Bearish Evidence"},
                    "longTermOutlook":{"direction":"Bullish"}},
                "keyTechnicals":{"support":180.0,"resistance":200.0}},
            "companySnapshot":{"sectorInfo":"Technology","company":{"innovativeness":0.9,"hiring":0.4}},
            "recommendation":{"rating":"BUY","targetPrice":220.0}
        },"error":null}}"#;
        let resp: FinanceResponse<RawInsights> = serde_json::from_str(json).unwrap();
        let insights = parse_insights("AAPL", resp).unwrap();

        let outlook = insights.technical_events.unwrap();
        assert_eq!(outlook.short_term.as_deref(), Some("Bearish (Weak Bearish Evidence)"));
        assert_eq!(outlook.mid_term, None);
        assert_eq!(outlook.long_term.as_deref(), Some("Bullish"));
        assert_eq!(insights.key_technicals.unwrap().stop_loss, None);
        let snapshot = insights.company_snapshot.unwrap();
        assert_eq!(snapshot.sector.as_deref(), Some("Technology"));
        assert_eq!(snapshot.innovativeness, Some(0.9));
        assert_eq!(insights.recommendation.unwrap().target_price, Some(220.0));
    }
}
