//! Output rendering: JSON (pretty or compact) or ASCII tables.

pub mod cells;
pub mod table;
mod views;

pub use table::{Align, Table};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// How command output is rendered. Also the `[output]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputOptions {
    /// ASCII table instead of JSON.
    pub table: bool,
    /// Indented JSON. Ignored for tables.
    pub pretty: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            table: false,
            pretty: true,
        }
    }
}

/// Types with a human-readable table layout.
pub trait TableRender {
    fn render_table(&self) -> String;
}

/// Render `value` according to `options`.
pub fn render<T>(value: &T, options: OutputOptions) -> Result<String, FormatError>
where
    T: Serialize + TableRender + ?Sized,
{
    if options.table {
        return Ok(value.render_table());
    }
    let json = if options.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecommendedSymbol, Recommendations};

    fn sample() -> Recommendations {
        Recommendations {
            symbol: "AAPL".into(),
            recommended_symbols: vec![RecommendedSymbol {
                symbol: "MSFT".into(),
                score: 0.25,
            }],
        }
    }

    #[test]
    fn compact_json() {
        let out = render(
            &sample(),
            OutputOptions {
                table: false,
                pretty: false,
            },
        )
        .unwrap();
        assert_eq!(
            out,
            r#"{"symbol":"AAPL","recommendedSymbols":[{"symbol":"MSFT","score":0.25}]}"#
        );
    }

    #[test]
    fn pretty_json_is_indented() {
        let out = render(&sample(), OutputOptions::default()).unwrap();
        assert!(out.contains("\n  \"symbol\": \"AAPL\""));
    }

    #[test]
    fn table_flag_wins() {
        let out = render(
            &sample(),
            OutputOptions {
                table: true,
                pretty: true,
            },
        )
        .unwrap();
        assert!(out.starts_with("Similar Symbols: AAPL\n+"));
    }
}
