//! HTTP client for the financial-data provider used to backfill missing
//! per-ticker fundamentals. All response fields are optional; the provider
//! regularly omits metrics for thinly covered tickers.

use dashboard_core::DashboardError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const BASE_URL: &str = "https://api.openbb.co/v1";

/// Per-request timeout; provider lookups are best-effort and must not hang
/// the batch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quote {
    pub price: Option<f64>,
    pub prev_close: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ratios {
    pub pe_ratio: Option<f64>,
    pub forward_pe: Option<f64>,
    pub profit_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub gross_margin: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrowthProfile {
    pub revenue_growth: Option<f64>,
    pub earnings_growth: Option<f64>,
}

#[derive(Clone)]
pub struct FundamentalsClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl FundamentalsClient {
    pub fn new(api_key: String) -> Self {
        let base_url =
            std::env::var("FUNDAMENTALS_BASE_URL").unwrap_or_else(|_| BASE_URL.to_string());
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key,
            base_url,
            client,
        }
    }

    pub async fn get_quote(&self, ticker: &str) -> Result<Quote, DashboardError> {
        self.get_json(&format!("quote/{}", ticker)).await
    }

    pub async fn get_ratios(&self, ticker: &str) -> Result<Ratios, DashboardError> {
        self.get_json(&format!("ratios/{}", ticker)).await
    }

    pub async fn get_growth_profile(&self, ticker: &str) -> Result<GrowthProfile, DashboardError> {
        self.get_json(&format!("growth/{}", ticker)).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, DashboardError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| DashboardError::Api(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Api(format!("{}: HTTP {}", path, status)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DashboardError::Api(format!("{}: {}", path, e)))
    }
}
