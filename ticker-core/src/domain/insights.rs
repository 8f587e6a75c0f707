//! Research insights: technical outlook, key levels, analyst view, company snapshot.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalOutlook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_term: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyTechnicals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resistance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innovativeness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hiring: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sustainability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insider_sentiments: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_events: Option<TechnicalOutlook>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_technicals: Option<KeyTechnicals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<AnalystView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_snapshot: Option<CompanySnapshot>,
}

impl Insights {
    pub fn empty(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.technical_events.is_none()
            && self.key_technicals.is_none()
            && self.recommendation.is_none()
            && self.company_snapshot.is_none()
    }
}
