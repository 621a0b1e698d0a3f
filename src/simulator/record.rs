//! Saved simulations
//!
//! The record shape the Flowest backend stores under `/simulators`, and a
//! looser local draft read from JSON or TOML files. Both convert directly
//! into the aggregator and projection inputs.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::holdings::{Holding, HoldingSet};
use super::projection::SimulationParameters;
use crate::error::SimulationError;

/// Simulation as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSimulation {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub holdings: Vec<Holding>,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_investment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub income_goal: Decimal,
    pub simulation_years: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SavedSimulation {
    pub fn parameters(&self) -> SimulationParameters {
        SimulationParameters {
            monthly_contribution: self.monthly_investment,
            income_goal_monthly: self.income_goal,
            horizon_years: self.simulation_years,
        }
    }

    /// Holdings and parameters ready for `aggregate` and `project`.
    /// Duplicate assets in the stored record are merged.
    pub fn to_inputs(&self) -> Result<(HoldingSet, SimulationParameters), SimulationError> {
        let holdings = HoldingSet::try_from(self.holdings.clone())?;
        let params = self.parameters();
        params.validate()?;
        Ok((holdings, params))
    }
}

/// Body of `POST /simulators`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSimulationPayload {
    pub user_id: String,
    pub title: String,
    pub holdings: Vec<Holding>,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_investment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub income_goal: Decimal,
    pub simulation_years: i32,
}

/// Body of `PATCH /simulators/{id}`; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSimulationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holdings: Option<Vec<Holding>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub monthly_investment: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub income_goal: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation_years: Option<i32>,
}

/// Simulation inputs as written by hand. Every field is optional; missing
/// parameters fall back to the caller's defaults. A backend record also
/// parses as a draft (extra fields are ignored).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub monthly_investment: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub income_goal: Option<Decimal>,
    #[serde(default)]
    pub simulation_years: Option<i32>,
}

impl SimulationDraft {
    pub fn holding_set(&self) -> Result<HoldingSet, SimulationError> {
        HoldingSet::try_from(self.holdings.clone())
    }

    pub fn parameters(&self, defaults: &SimulationParameters) -> SimulationParameters {
        SimulationParameters {
            monthly_contribution: self
                .monthly_investment
                .unwrap_or(defaults.monthly_contribution),
            income_goal_monthly: self.income_goal.unwrap_or(defaults.income_goal_monthly),
            horizon_years: self.simulation_years.unwrap_or(defaults.horizon_years),
        }
    }

    fn resolve_title(&self, title: Option<&str>) -> Result<String, SimulationError> {
        title
            .or(self.title.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                SimulationError::InvalidParameters("give your simulation a title".to_string())
            })
    }

    /// Validated body for saving this draft as a new simulation
    pub fn build_create_payload(
        &self,
        user_id: Option<&str>,
        title: Option<&str>,
        defaults: &SimulationParameters,
    ) -> Result<CreateSimulationPayload, SimulationError> {
        let user_id = user_id
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                SimulationError::InvalidParameters("user not found, log in to save".to_string())
            })?;
        let title = self.resolve_title(title)?;
        let holdings = self.holding_set()?;
        let params = self.parameters(defaults);
        params.validate()?;

        Ok(CreateSimulationPayload {
            user_id: user_id.to_string(),
            title,
            holdings: holdings.into_vec(),
            monthly_investment: params.monthly_contribution,
            income_goal: params.income_goal_monthly,
            simulation_years: params.horizon_years,
        })
    }

    /// Validated body for overwriting an existing simulation with this draft
    pub fn build_update_payload(
        &self,
        title: Option<&str>,
        defaults: &SimulationParameters,
    ) -> Result<UpdateSimulationPayload, SimulationError> {
        let title = self.resolve_title(title)?;
        let holdings = self.holding_set()?;
        let params = self.parameters(defaults);
        params.validate()?;

        Ok(UpdateSimulationPayload {
            title: Some(title),
            holdings: Some(holdings.into_vec()),
            monthly_investment: Some(params.monthly_contribution),
            income_goal: Some(params.income_goal_monthly),
            simulation_years: Some(params.horizon_years),
        })
    }
}

/// Read a draft from a `.toml` or `.json` file (JSON for any other extension)
pub fn load_simulation_file(path: &Path) -> Result<SimulationDraft> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read simulation file {}", path.display()))?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(&content)
            .with_context(|| format!("Invalid TOML simulation file {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON simulation file {}", path.display()))
    }
}
