use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// Typed view over a costs response body. Every field is lenient so that
/// new or missing keys on the server side never break decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CostsPage {
    #[serde(default)]
    pub data: Vec<CostBucket>,
    #[serde(default)]
    pub has_more: Option<bool>,
    #[serde(default)]
    pub next_page: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CostBucket {
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub results: Vec<CostResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CostResult {
    #[serde(default)]
    pub amount: Option<CostAmount>,
    #[serde(default)]
    pub line_item: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CostAmount {
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub currency: String,
}

impl CostsPage {
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }

    /// Sums every result amount, keyed by lowercase currency code.
    pub fn total_by_currency(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::<String, f64>::new();
        let amounts = self
            .data
            .iter()
            .flat_map(|bucket| bucket.results.iter())
            .filter_map(|result| result.amount.as_ref());
        for amount in amounts {
            *totals
                .entry(amount.currency.trim().to_ascii_lowercase())
                .or_default() += amount.value;
        }
        totals
    }
}
