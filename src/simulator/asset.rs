use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Asset classes known to the Flowest catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AssetType {
    #[serde(rename = "Ação")]
    Acao, // Brazilian stocks
    #[serde(rename = "FII")]
    Fii, // Real estate investment funds
    #[serde(rename = "ETF")]
    Etf,
    #[serde(rename = "BDR")]
    Bdr, // Brazilian depositary receipts
    #[serde(rename = "Cripto")]
    Cripto,
    #[serde(rename = "Stock")]
    Stock, // Foreign stocks
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Acao => "Ação",
            AssetType::Fii => "FII",
            AssetType::Etf => "ETF",
            AssetType::Bdr => "BDR",
            AssetType::Cripto => "Cripto",
            AssetType::Stock => "Stock",
        }
    }

    /// Guess the asset class of a B3 ticker from its numeric suffix.
    /// Units and FIIs end in 11, BDRs in 32-35, common/preferred shares in 3-6.
    pub fn detect_from_ticker(ticker: &str) -> Option<Self> {
        let upper = ticker.trim().to_ascii_uppercase();
        if upper.len() < 5 || !upper.is_ascii() {
            return None;
        }

        match &upper[upper.len() - 2..] {
            "11" => Some(AssetType::Fii),
            "32" | "33" | "34" | "35" => Some(AssetType::Bdr),
            _ if upper.ends_with(['3', '4', '5', '6']) => Some(AssetType::Acao),
            _ => None,
        }
    }
}

impl FromStr for AssetType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ação" | "acao" | "acoes" | "ações" => Ok(AssetType::Acao),
            "fii" => Ok(AssetType::Fii),
            "etf" => Ok(AssetType::Etf),
            "bdr" => Ok(AssetType::Bdr),
            "cripto" | "crypto" => Ok(AssetType::Cripto),
            "stock" => Ok(AssetType::Stock),
            _ => Err(()),
        }
    }
}

/// The subset of a catalog asset a simulation needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationAsset {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default)]
    pub asset_type: Option<AssetType>,
    /// Annual dividend yield, in percent
    #[serde(default, with = "rust_decimal::serde::float")]
    pub dividend_yield: Decimal,
}

impl SimulationAsset {
    /// Asset typed in by hand, outside the catalog. It has no id, so it is
    /// identified by ticker only.
    pub fn manual(ticker: &str, dividend_yield: Decimal) -> Self {
        let ticker = ticker.trim().to_ascii_uppercase();
        Self {
            id: String::new(),
            asset_type: AssetType::detect_from_ticker(&ticker),
            ticker,
            company_name: None,
            dividend_yield,
        }
    }

    /// Two assets are the same when their catalog ids match; assets without
    /// an id fall back to a case-insensitive ticker comparison.
    pub fn same_asset(&self, other: &SimulationAsset) -> bool {
        if !self.id.is_empty() && !other.id.is_empty() {
            self.id == other.id
        } else {
            self.ticker.eq_ignore_ascii_case(&other.ticker)
        }
    }

    /// Whether `key` names this asset, by id or ticker.
    pub fn matches_key(&self, key: &str) -> bool {
        (!self.id.is_empty() && self.id == key) || self.ticker.eq_ignore_ascii_case(key.trim())
    }
}
