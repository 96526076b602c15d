//! Inventory search client.
//!
//! Issues one filtered query against the inventory API and returns the raw
//! result page. No retry and no caching; each call reflects live upstream
//! state and may return different data every time.

use reqwest::Client;

use crate::error::Result;
use crate::models::{Condition, InventoryQuery, InventoryResults};

/// Production search endpoint.
pub const API_URL: &str = "https://www.tesla.com/inventory/api/v1/inventory-results";

/// Client for the inventory search API, scoped to one market and sub-region.
pub struct InventoryClient {
    client: Client,
    base_url: String,
    market: String,
    region: String,
}

impl InventoryClient {
    /// Create a client against the production endpoint.
    pub fn new(client: Client, market: impl Into<String>, region: impl Into<String>) -> Self {
        Self::with_base_url(client, API_URL, market, region)
    }

    /// Create a client against a non-default endpoint.
    pub fn with_base_url(
        client: Client,
        base_url: impl Into<String>,
        market: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            market: market.into(),
            region: region.into(),
        }
    }

    /// Fetch the latest available stock for a model.
    ///
    /// `trim` narrows results to the given trim codes when present.
    pub async fn fetch(
        &self,
        model: &str,
        trim: Option<&[String]>,
        condition: Condition,
    ) -> Result<InventoryResults> {
        let request = self.build_request(model, trim, condition)?;

        log::info!("Getting latest inventory..");
        log::debug!("GET {}", request.url());

        let results: InventoryResults = self
            .client
            .execute(request)
            .await?
            .error_for_status()?
            .json()
            .await?;

        log::info!("{} vehicles listed", results.total_matches_found);

        Ok(results)
    }

    /// Build the GET request carrying the query document as a URL parameter.
    fn build_request(
        &self,
        model: &str,
        trim: Option<&[String]>,
        condition: Condition,
    ) -> Result<reqwest::Request> {
        let query = InventoryQuery::new(&self.market, &self.region, model, trim, condition);
        let query_json = serde_json::to_string(&query)?;

        let request = self
            .client
            .get(&self.base_url)
            .query(&[("query", query_json.as_str())])
            .build()?;

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> InventoryClient {
        InventoryClient::with_base_url(
            Client::new(),
            "http://localhost:9999/inventory-results",
            "AU",
            "Victoria",
        )
    }

    #[test]
    fn request_carries_encoded_query_document() {
        let request = client()
            .build_request("M3", None, Condition::New)
            .unwrap();

        let url = request.url().to_string();
        assert!(url.starts_with("http://localhost:9999/inventory-results?query="));
        assert!(url.contains("%22model%22%3A%22m3%22"));
        assert!(url.contains("%22market%22%3A%22AU%22"));
    }

    #[test]
    fn request_includes_trim_filter_when_given() {
        let trims = vec!["LRAWD".to_string()];
        let request = client()
            .build_request("m3", Some(&trims), Condition::New)
            .unwrap();

        let url = request.url().to_string();
        assert!(url.contains("%22TRIM%22%3A%5B%22LRAWD%22%5D"));
    }
}
