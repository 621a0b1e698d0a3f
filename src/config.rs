//! User configuration
//!
//! Read from `$XDG_CONFIG_HOME/flowest/config.toml` (or `FLOWEST_CONFIG`),
//! then overridden by `FLOWEST_API_URL`, `FLOWEST_TOKEN` and
//! `FLOWEST_USER_ID`. A missing file is not an error.

use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::simulator::SimulationParameters;

const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub defaults: SimulationDefaults,
}

/// Backend connection. The token is the bearer credential issued at login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Parameters used when neither the command line nor a simulation file
/// sets them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationDefaults {
    pub monthly_contribution: Decimal,
    pub income_goal: Decimal,
    pub horizon_years: i32,
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        let params = SimulationParameters::default();
        Self {
            monthly_contribution: params.monthly_contribution,
            income_goal: params.income_goal_monthly,
            horizon_years: params.horizon_years,
        }
    }
}

impl SimulationDefaults {
    pub fn parameters(&self) -> SimulationParameters {
        SimulationParameters {
            monthly_contribution: self.monthly_contribution,
            income_goal_monthly: self.income_goal,
            horizon_years: self.horizon_years,
        }
    }
}

impl Config {
    /// Location of the config file
    pub fn path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("FLOWEST_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let config_dir = dir_spec::config_home()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("flowest").join(CONFIG_FILENAME))
    }

    /// Load the config file and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::path()?)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_empty("FLOWEST_API_URL") {
            self.api.base_url = Some(url);
        }
        if let Some(token) = non_empty("FLOWEST_TOKEN") {
            self.api.token = Some(token);
        }
        if let Some(user_id) = non_empty("FLOWEST_USER_ID") {
            self.api.user_id = Some(user_id);
        }
    }

    /// Copy safe to print: the token is masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.api.token = copy.api.token.as_ref().map(|t| mask_token(t));
        copy
    }
}

fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
