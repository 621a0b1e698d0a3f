use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ApiClient, ApiError};
use crate::simulator::{AssetType, SimulationAsset};

/// Catalog asset as returned by `/tickers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    #[serde(rename = "_id")]
    pub id: String,
    pub ticker: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub asset_type: Option<AssetType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub current_price: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub dividend_yield: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl From<&Ticker> for SimulationAsset {
    fn from(ticker: &Ticker) -> Self {
        SimulationAsset {
            id: ticker.id.clone(),
            ticker: ticker.ticker.clone(),
            company_name: Some(ticker.company_name.clone()).filter(|n| !n.is_empty()),
            asset_type: ticker.asset_type,
            dividend_yield: ticker.dividend_yield.unwrap_or(Decimal::ZERO),
        }
    }
}

/// Pick the catalog entry whose ticker is exactly `symbol`
pub fn find_exact<'a>(candidates: &'a [Ticker], symbol: &str) -> Option<&'a Ticker> {
    candidates
        .iter()
        .find(|t| t.ticker.eq_ignore_ascii_case(symbol.trim()))
}

impl ApiClient {
    /// Autocomplete search over the catalog (`GET /tickers/search?q=`)
    pub async fn search_tickers(&self, query: &str) -> Result<Vec<Ticker>, ApiError> {
        info!("Searching tickers matching '{}'", query);
        let url = self.endpoint("tickers/search", &[("q", query.trim())])?;
        self.send_json(self.request(reqwest::Method::GET, url)).await
    }
}
