//! Table layouts for every command's output type.

use super::cells::{self, large_number, number, percent, truncate, volume};
use super::table::{Align, Table};
use super::TableRender;
use crate::domain::{
    ChartSeries, Insights, NewsItem, NewsResult, OptionChain, OptionContract, QuoteList,
    Recommendations, ScreenerResult, SearchResult, Summary, SummaryValue,
};
use crate::indicators::{IndicatorKind, IndicatorResult, PointValues};

const SCREENER_ROWS: usize = 30;
const OPTION_ROWS: usize = 20;

impl TableRender for QuoteList {
    fn render_table(&self) -> String {
        let mut table = Table::titled("Stock Quotes")
            .column("Symbol", Align::Left)
            .column("Name", Align::Left)
            .column("Price", Align::Right)
            .column("Change", Align::Right)
            .column("Change %", Align::Right)
            .column("Volume", Align::Right)
            .column("Market Cap", Align::Right);
        for q in &self.quotes {
            table.row(vec![
                q.symbol.clone(),
                truncate(&cells::text(q.short_name.as_deref()), 20),
                number(Some(q.price)),
                number(Some(q.change)),
                percent(Some(q.change_percent)),
                volume(q.volume.map(|v| v as f64)),
                volume(q.market_cap),
            ]);
        }
        table.render()
    }
}

impl TableRender for ChartSeries {
    fn render_table(&self) -> String {
        let mut table = Table::titled(format!(
            "{} ({} to {}, {})",
            self.symbol, self.start, self.end, self.interval
        ))
        .column("Date", Align::Left)
        .column("Open", Align::Right)
        .column("High", Align::Right)
        .column("Low", Align::Right)
        .column("Close", Align::Right)
        .column("Volume", Align::Right);
        for bar in &self.data {
            table.row(vec![
                bar.date.to_string(),
                number(Some(bar.open)),
                number(Some(bar.high)),
                number(Some(bar.low)),
                number(Some(bar.close)),
                volume(Some(bar.volume as f64)),
            ]);
        }
        table.render()
    }
}

fn news_table(title: &str, news: &[NewsItem]) -> String {
    let mut table = Table::titled(title)
        .column("Title", Align::Left)
        .column("Publisher", Align::Left)
        .column("Date", Align::Left)
        .column("Related", Align::Left);
    for item in news {
        let related = if item.related_tickers.is_empty() {
            "-".to_string()
        } else {
            item.related_tickers
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.row(vec![
            truncate(&item.title, 50),
            truncate(&item.publisher, 20),
            item.published
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| cells::NA.to_string()),
            related,
        ]);
    }
    table.render()
}

impl TableRender for SearchResult {
    fn render_table(&self) -> String {
        let mut table = Table::titled(format!("Search Results: {}", self.query))
            .column("Symbol", Align::Left)
            .column("Name", Align::Left)
            .column("Exchange", Align::Left)
            .column("Type", Align::Left)
            .column("Score", Align::Right);
        for m in &self.quotes {
            table.row(vec![
                m.symbol.clone(),
                truncate(&cells::text(Some(&m.name)), 30),
                cells::text(Some(&m.exchange)),
                cells::text(Some(&m.quote_type)),
                number(m.score),
            ]);
        }
        let mut out = table.render();
        if let Some(news) = &self.news {
            out.push('\n');
            out.push_str(&news_table("News", news));
        }
        out
    }
}

impl TableRender for NewsResult {
    fn render_table(&self) -> String {
        news_table(&format!("News: {}", self.symbol), &self.news)
    }
}

impl TableRender for Summary {
    fn render_table(&self) -> String {
        let mut table = Table::titled(format!("Quote Summary: {}", self.symbol))
            .column("Field", Align::Left)
            .column("Value", Align::Left);
        for (label, value) in self.fields() {
            let value = match value {
                SummaryValue::Number(n) => large_number(n),
                SummaryValue::Text(s) => s,
            };
            table.row(vec![label.to_string(), value]);
        }
        table.render()
    }
}

impl TableRender for Insights {
    fn render_table(&self) -> String {
        if self.is_empty() {
            return format!("No insights available for {}\n", self.symbol);
        }

        let mut sections = Vec::new();
        let metric_table = |title: String| {
            Table::titled(title)
                .column("Metric", Align::Left)
                .column("Value", Align::Left)
        };
        let text = |v: &Option<String>| cells::text(v.as_deref());

        if self.technical_events.is_some() || self.key_technicals.is_some() {
            let mut table = metric_table(format!("Technical Analysis: {}", self.symbol));
            if let Some(t) = &self.technical_events {
                table.row(vec!["Provider".into(), text(&t.provider)]);
                table.row(vec!["Short Term".into(), text(&t.short_term)]);
                table.row(vec!["Mid Term".into(), text(&t.mid_term)]);
                table.row(vec!["Long Term".into(), text(&t.long_term)]);
            }
            if let Some(k) = &self.key_technicals {
                table.row(vec!["Support".into(), number(k.support)]);
                table.row(vec!["Resistance".into(), number(k.resistance)]);
                table.row(vec!["Stop Loss".into(), number(k.stop_loss)]);
            }
            sections.push(table.render());
        }

        if let Some(r) = &self.recommendation {
            let mut table = metric_table("Recommendation".into());
            table.row(vec!["Rating".into(), text(&r.rating)]);
            table.row(vec!["Target Price".into(), number(r.target_price)]);
            table.row(vec!["Provider".into(), text(&r.provider)]);
            sections.push(table.render());
        }

        if let Some(c) = &self.company_snapshot {
            let mut table = metric_table("Company Snapshot".into());
            table.row(vec!["Sector".into(), text(&c.sector)]);
            table.row(vec!["Innovativeness".into(), number(c.innovativeness)]);
            table.row(vec!["Hiring".into(), number(c.hiring)]);
            table.row(vec!["Sustainability".into(), number(c.sustainability)]);
            table.row(vec!["Insider Sentiment".into(), number(c.insider_sentiments)]);
            sections.push(table.render());
        }

        sections.join("\n")
    }
}

fn contracts_table(title: &str, contracts: &[OptionContract]) -> String {
    let mut table = Table::titled(title)
        .column("Strike", Align::Right)
        .column("Bid", Align::Right)
        .column("Ask", Align::Right)
        .column("Last", Align::Right)
        .column("Change", Align::Right)
        .column("Vol", Align::Right)
        .column("OI", Align::Right)
        .column("IV", Align::Right)
        .column("ITM", Align::Center);
    for c in contracts.iter().take(OPTION_ROWS) {
        table.row(vec![
            number(Some(c.strike)),
            number(Some(c.bid)),
            number(Some(c.ask)),
            number(Some(c.last_price)),
            number(Some(c.change)),
            volume(Some(c.volume as f64)),
            volume(Some(c.open_interest as f64)),
            format!("{:.1}%", c.implied_volatility),
            if c.in_the_money { "✓" } else { "" }.to_string(),
        ]);
    }
    let mut out = table.render();
    if contracts.len() > OPTION_ROWS {
        out.push_str(&format!(
            "... and {} more contracts\n",
            contracts.len() - OPTION_ROWS
        ));
    }
    out
}

impl TableRender for OptionChain {
    fn render_table(&self) -> String {
        let mut header = Table::titled(format!("Options Chain: {}", self.symbol))
            .column("Field", Align::Left)
            .column("Value", Align::Left);
        header.row(vec![
            "Expiration".into(),
            self.expiration_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| cells::NA.to_string()),
        ]);
        header.row(vec!["Underlying Price".into(), number(self.underlying_price)]);

        let mut sections = vec![header.render()];
        if let Some(calls) = &self.calls {
            sections.push(contracts_table("Calls", calls));
        }
        if let Some(puts) = &self.puts {
            sections.push(contracts_table("Puts", puts));
        }
        sections.join("\n")
    }
}

impl TableRender for Recommendations {
    fn render_table(&self) -> String {
        let mut table = Table::titled(format!("Similar Symbols: {}", self.symbol))
            .column("Symbol", Align::Left)
            .column("Score", Align::Right);
        for r in &self.recommended_symbols {
            table.row(vec![r.symbol.clone(), format!("{:.4}", r.score)]);
        }
        table.render()
    }
}

impl TableRender for ScreenerResult {
    fn render_table(&self) -> String {
        let mut table = Table::titled(format!("Screener Results: {}", self.query))
            .column("Symbol", Align::Left)
            .column("Name", Align::Left)
            .column("Price", Align::Right)
            .column("Change", Align::Right)
            .column("Change %", Align::Right)
            .column("Volume", Align::Right)
            .column("Market Cap", Align::Right);
        for q in self.quotes.iter().take(SCREENER_ROWS) {
            table.row(vec![
                q.symbol.clone(),
                truncate(&cells::text(Some(&q.name)), 20),
                number(Some(q.price)),
                number(Some(q.change)),
                percent(Some(q.change_percent)),
                volume(Some(q.volume as f64)),
                volume(q.market_cap),
            ]);
        }
        let mut out = table.render();
        if self.quotes.len() > SCREENER_ROWS {
            out.push_str(&format!(
                "\n... and {} more results\n",
                self.quotes.len() - SCREENER_ROWS
            ));
        }
        out
    }
}

impl TableRender for IndicatorResult {
    fn render_table(&self) -> String {
        let tag = self.indicator.tag();
        let params = self
            .config
            .param_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        let title = format!("{tag} ({params}): {}", self.symbol);

        let headers = match self.indicator {
            IndicatorKind::Macd => vec!["MACD", "Signal", "Histogram"],
            IndicatorKind::Bollinger => vec!["Upper", "Middle", "Lower"],
            _ => vec![tag],
        };
        let mut table = Table::titled(title).column("Date", Align::Left);
        for h in headers {
            table = table.column(h, Align::Right);
        }

        for point in &self.data {
            let mut row = vec![point.date.to_string()];
            match point.values {
                PointValues::Single { value } => row.push(number(value)),
                PointValues::Macd {
                    macd,
                    signal,
                    histogram,
                } => row.extend([number(macd), number(signal), number(histogram)]),
                PointValues::Bands {
                    upper,
                    middle,
                    lower,
                } => row.extend([number(upper), number(middle), number(lower)]),
            }
            table.row(row);
        }
        table.render()
    }
}
