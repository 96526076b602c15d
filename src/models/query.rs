//! Inventory search query document.
//!
//! Serializes to the JSON document the inventory API expects in its `query`
//! URL parameter. Field names and constants follow the upstream protocol.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AppError;

/// Listings requested per page; the API serves at most one page per query.
pub const PAGE_SIZE: u32 = 50;

/// Listing condition filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    New,
    Used,
}

impl Condition {
    /// Wire value, always lowercase.
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::Used => "used",
        }
    }
}

impl FromStr for Condition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Condition::New),
            "used" => Ok(Condition::Used),
            other => Err(AppError::config(format!(
                "invalid condition '{other}', expected \"new\" or \"used\""
            ))),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level query document.
#[derive(Debug, Serialize)]
pub struct InventoryQuery {
    query: SearchTerms,
    offset: u32,
    count: u32,
    #[serde(rename = "outsideOffset")]
    outside_offset: u32,
    #[serde(rename = "outsideSearch")]
    outside_search: bool,
}

/// Search terms scoping the query to a market, region and model.
#[derive(Debug, Serialize)]
struct SearchTerms {
    model: String,
    condition: &'static str,
    options: SearchOptions,
    arrangeby: &'static str,
    order: &'static str,
    market: String,
    language: &'static str,
    super_region: &'static str,
}

#[derive(Debug, Serialize)]
struct SearchOptions {
    #[serde(rename = "FleetSalesRegions")]
    fleet_sales_regions: Vec<String>,

    /// Trim filter, omitted entirely when no trims were requested
    #[serde(rename = "TRIM", skip_serializing_if = "Option::is_none")]
    trim: Option<Vec<String>>,
}

impl InventoryQuery {
    /// Build a single-page query, most relevant results first.
    pub fn new(
        market: &str,
        region: &str,
        model: &str,
        trim: Option<&[String]>,
        condition: Condition,
    ) -> Self {
        Self {
            query: SearchTerms {
                model: model.to_lowercase(),
                condition: condition.as_str(),
                options: SearchOptions {
                    fleet_sales_regions: vec![region.to_string()],
                    trim: trim.map(<[String]>::to_vec),
                },
                arrangeby: "Relevance",
                order: "desc",
                market: market.to_string(),
                language: "en",
                super_region: "north america",
            },
            offset: 0,
            count: PAGE_SIZE,
            outside_offset: 0,
            outside_search: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_fixes_page_size_and_ordering() {
        let query = InventoryQuery::new("AU", "Victoria", "m3", None, Condition::New);
        let value = serde_json::to_value(&query).unwrap();

        assert_eq!(value["count"], 50);
        assert_eq!(value["offset"], 0);
        assert_eq!(value["outsideOffset"], 0);
        assert_eq!(value["outsideSearch"], false);
        assert_eq!(value["query"]["arrangeby"], "Relevance");
        assert_eq!(value["query"]["order"], "desc");
        assert_eq!(value["query"]["language"], "en");
        assert_eq!(value["query"]["super_region"], "north america");
    }

    #[test]
    fn query_normalizes_model_and_condition() {
        let query = InventoryQuery::new("AU", "Victoria", "M3", None, Condition::Used);
        let value = serde_json::to_value(&query).unwrap();

        assert_eq!(value["query"]["model"], "m3");
        assert_eq!(value["query"]["condition"], "used");
    }

    #[test]
    fn query_scopes_to_market_and_region() {
        let query = InventoryQuery::new("AU", "Victoria", "my", None, Condition::New);
        let value = serde_json::to_value(&query).unwrap();

        assert_eq!(value["query"]["market"], "AU");
        assert_eq!(
            value["query"]["options"]["FleetSalesRegions"],
            serde_json::json!(["Victoria"])
        );
    }

    #[test]
    fn trim_filter_only_present_when_given() {
        let without = InventoryQuery::new("AU", "Victoria", "m3", None, Condition::New);
        let value = serde_json::to_value(&without).unwrap();
        assert!(value["query"]["options"].get("TRIM").is_none());

        let trims = vec!["LRAWD".to_string(), "PAWD".to_string()];
        let with = InventoryQuery::new("AU", "Victoria", "m3", Some(&trims), Condition::New);
        let value = serde_json::to_value(&with).unwrap();
        assert_eq!(
            value["query"]["options"]["TRIM"],
            serde_json::json!(["LRAWD", "PAWD"])
        );
    }

    #[test]
    fn condition_parses_case_insensitively() {
        assert_eq!("NEW".parse::<Condition>().unwrap(), Condition::New);
        assert_eq!("Used".parse::<Condition>().unwrap(), Condition::Used);
        assert!("demo".parse::<Condition>().is_err());
    }
}
