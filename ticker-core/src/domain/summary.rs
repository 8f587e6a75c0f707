//! Quote summary: company profile, trading detail, and fundamentals.

use serde::Serialize;
use serde_json::Value;

/// Modules requested when the caller names none.
pub const DEFAULT_SUMMARY_MODULES: [&str; 3] =
    ["summaryProfile", "summaryDetail", "defaultKeyStatistics"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_pe: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_profits: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_cashflow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_cashflow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_to_equity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_on_equity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_on_assets: Option<f64>,
}

/// Quote summary for one symbol. Modules the provider did not return are `None`;
/// modules without a typed shape are carried as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_profile: Option<SummaryProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_detail: Option<SummaryDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_data: Option<FinancialData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_key_statistics: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financials: Option<Value>,
}

/// A labelled numeric-or-text summary field, for key/value displays.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryValue {
    Number(f64),
    Text(String),
}

impl Summary {
    /// Key fields in display order, skipping anything the provider left out.
    pub fn fields(&self) -> Vec<(&'static str, SummaryValue)> {
        let mut out = Vec::new();
        let mut num = |label: &'static str, v: Option<f64>| {
            if let Some(v) = v {
                out.push((label, SummaryValue::Number(v)));
            }
        };

        if let Some(d) = &self.summary_detail {
            num("Previous Close", d.previous_close);
            num("Open", d.open);
            num("Day Low", d.day_low);
            num("Day High", d.day_high);
            num("52 Week Low", d.fifty_two_week_low);
            num("52 Week High", d.fifty_two_week_high);
            num("Volume", d.volume);
            num("Avg Volume", d.average_volume);
            num("Market Cap", d.market_cap);
            num("PE Ratio (TTM)", d.pe_ratio);
            num("Forward PE", d.forward_pe);
            num("Dividend Yield", d.dividend_yield);
            num("Beta", d.beta);
        }

        if let Some(f) = &self.financial_data {
            num("Revenue", f.total_revenue);
            num("Gross Profit", f.gross_profits);
            num("EBITDA", f.ebitda);
            num("Operating Cash Flow", f.operating_cashflow);
            num("Free Cash Flow", f.free_cashflow);
            num("Debt to Equity", f.debt_to_equity);
            num("Return on Equity", f.return_on_equity);
            num("Return on Assets", f.return_on_assets);
        }

        if let Some(p) = &self.summary_profile {
            let text = [
                ("Sector", &p.sector),
                ("Industry", &p.industry),
                ("Website", &p.website),
                ("Country", &p.country),
            ];
            for (label, v) in text {
                if let Some(v) = v {
                    out.push((label, SummaryValue::Text(v.clone())));
                }
            }
            if let Some(n) = p.employees {
                out.push(("Employees", SummaryValue::Number(n as f64)));
            }
        }

        out
    }
}
