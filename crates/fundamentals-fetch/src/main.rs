//! fundamentals-fetch: Batch-fetches supplementary per-ticker fundamentals
//! from the data provider and caches them as JSON for later backfill into
//! the analysis workbook.
//!
//! Usage:
//!   cargo run -p fundamentals-fetch -- --tickers SNOW NET DDOG
//!   cargo run -p fundamentals-fetch -- --out reports/equity/fundamentals.json

use chrono::Utc;
use fundamentals_client::FundamentalsClient;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Watchlist with stale or missing quarterly data.
const DEFAULT_TICKERS: &[&str] = &[
    "AMPL", "DKNG", "DOCN", "DOCU", "DT", "EA", "ETSY", "EXPE", "FROG", "FSLY",
    "FTNT", "GLBE", "GME", "GTLB", "NET", "NFLX", "NOW", "OKTA", "OSTK", "PAYC",
    "ROKU", "S", "SHOP", "SNAP", "SNOW", "SPOT", "SQ", "TEAM", "TTD", "TWLO",
    "U", "UBER", "W", "WDAY", "ZI", "ZM", "ZS",
];

const DEFAULT_OUT: &str = "reports/equity/fundamentals.json";

/// Cached fundamentals for one ticker. Fields the provider could not supply
/// stay null in the cache file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TickerFundamentals {
    ticker: String,
    timestamp: String,
    price: Option<f64>,
    prev_close: Option<f64>,
    trailing_pe: Option<f64>,
    forward_pe: Option<f64>,
    profit_margin: Option<f64>,
    operating_margin: Option<f64>,
    gross_margin: Option<f64>,
    revenue_growth: Option<f64>,
    earnings_growth: Option<f64>,
}

impl TickerFundamentals {
    fn populated_fields(&self) -> usize {
        [
            self.price,
            self.prev_close,
            self.trailing_pe,
            self.forward_pe,
            self.profit_margin,
            self.operating_margin,
            self.gross_margin,
            self.revenue_growth,
            self.earnings_growth,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}

/// Best-effort fetch: a failed provider call logs and leaves its fields null
/// rather than aborting the batch.
async fn fetch_ticker(client: &FundamentalsClient, ticker: &str) -> TickerFundamentals {
    let mut data = TickerFundamentals {
        ticker: ticker.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        price: None,
        prev_close: None,
        trailing_pe: None,
        forward_pe: None,
        profit_margin: None,
        operating_margin: None,
        gross_margin: None,
        revenue_growth: None,
        earnings_growth: None,
    };

    match client.get_quote(ticker).await {
        Ok(quote) => {
            data.price = quote.price;
            data.prev_close = quote.prev_close;
        }
        Err(e) => tracing::warn!("{}: quote fetch failed: {}", ticker, e),
    }

    match client.get_ratios(ticker).await {
        Ok(ratios) => {
            data.trailing_pe = ratios.pe_ratio;
            data.forward_pe = ratios.forward_pe;
            data.profit_margin = ratios.profit_margin;
            data.operating_margin = ratios.operating_margin;
            data.gross_margin = ratios.gross_margin;
        }
        Err(e) => tracing::warn!("{}: ratios fetch failed: {}", ticker, e),
    }

    match client.get_growth_profile(ticker).await {
        Ok(growth) => {
            data.revenue_growth = growth.revenue_growth;
            data.earnings_growth = growth.earnings_growth;
        }
        Err(e) => tracing::warn!("{}: growth fetch failed: {}", ticker, e),
    }

    data
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fundamentals_fetch=info,fundamentals_client=warn".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let tickers: Vec<String> = if let Some(idx) = args.iter().position(|a| a == "--tickers") {
        args[idx + 1..]
            .iter()
            .take_while(|a| !a.starts_with("--"))
            .map(|s| s.to_uppercase())
            .collect()
    } else {
        DEFAULT_TICKERS.iter().map(|s| s.to_string()).collect()
    };

    let out_path = PathBuf::from(
        args.iter()
            .position(|a| a == "--out")
            .and_then(|i| args.get(i + 1))
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_OUT),
    );

    let api_key =
        std::env::var("FUNDAMENTALS_API_KEY").expect("FUNDAMENTALS_API_KEY must be set");
    let client = FundamentalsClient::new(api_key);

    tracing::info!("Fetching fundamentals for {} tickers...", tickers.len());

    let mut results = Vec::with_capacity(tickers.len());
    for (i, ticker) in tickers.iter().enumerate() {
        let data = fetch_ticker(&client, ticker).await;
        tracing::info!(
            "[{}/{}] {}: {} fields",
            i + 1,
            tickers.len(),
            ticker,
            data.populated_fields()
        );
        results.push(data);
    }

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&out_path, serde_json::to_string_pretty(&results)?)?;
    tracing::info!("Saved {} records to {}", results.len(), out_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populated_field_count() {
        let mut data = TickerFundamentals {
            ticker: "ZM".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            price: Some(70.0),
            prev_close: None,
            trailing_pe: Some(22.0),
            forward_pe: None,
            profit_margin: None,
            operating_margin: None,
            gross_margin: None,
            revenue_growth: None,
            earnings_growth: None,
        };
        assert_eq!(data.populated_fields(), 2);
        data.revenue_growth = Some(0.03);
        assert_eq!(data.populated_fields(), 3);
    }

    #[test]
    fn test_cache_record_serializes_nulls() {
        let data = TickerFundamentals {
            ticker: "NET".to_string(),
            timestamp: "2025-06-01T00:00:00Z".to_string(),
            price: Some(80.25),
            prev_close: None,
            trailing_pe: None,
            forward_pe: None,
            profit_margin: None,
            operating_margin: None,
            gross_margin: None,
            revenue_growth: None,
            earnings_growth: None,
        };
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains(r#""price":80.25"#));
        assert!(json.contains(r#""prev_close":null"#));
    }
}
