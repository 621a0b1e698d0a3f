use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, info};

use crate::cli::formatters;
use crate::commands::{HoldingSpec, SimulateArgs};
use flowest::api::{find_exact, ApiClient};
use flowest::config::Config;
use flowest::error::SimulationError;
use flowest::reports;
use flowest::simulator::{
    load_simulation_file, project, Holding, HoldingSet, SimulationAsset, SimulationParameters,
};

pub async fn dispatch_simulate(args: SimulateArgs, json_output: bool) -> Result<()> {
    let config = Config::load()?;

    let draft = match &args.file {
        Some(path) => Some(load_simulation_file(path)?),
        None => None,
    };

    let mut holdings = match &draft {
        Some(draft) => draft.holding_set()?,
        None => HoldingSet::new(),
    };
    for spec in &args.holdings {
        let asset = resolve_asset(spec, &config).await?;
        holdings.add(Holding::from_purchase(asset, spec.quantity, spec.unit_price)?)?;
    }

    let defaults = config.defaults.parameters();
    let base = draft
        .as_ref()
        .map(|d| d.parameters(&defaults))
        .unwrap_or(defaults);
    let params = SimulationParameters {
        monthly_contribution: args.contribution.unwrap_or(base.monthly_contribution),
        income_goal_monthly: args.goal.unwrap_or(base.income_goal_monthly),
        horizon_years: args.years.unwrap_or(base.horizon_years),
    };

    run_and_render(
        &holdings,
        &params,
        args.start,
        args.every,
        args.export.as_deref(),
        json_output,
    )
}

/// Project `holdings` and print the result. Shared by `simulate` and
/// `simulations run`.
pub(crate) fn run_and_render(
    holdings: &HoldingSet,
    params: &SimulationParameters,
    start: Option<NaiveDate>,
    every: u32,
    export: Option<&Path>,
    json_output: bool,
) -> Result<()> {
    let anchor = start.unwrap_or_else(|| chrono::Local::now().date_naive());
    let aggregate = holdings.aggregate()?;
    info!(
        "Simulating {} holding(s): invested {}, blended yield {}%",
        holdings.len(),
        aggregate.total_invested,
        aggregate.blended_annual_yield
    );

    let projection = project(&aggregate, params, anchor).map_err(|e| {
        if holdings.is_empty() && e == SimulationError::NoYield {
            anyhow::Error::new(e).context(formatters::empty_holdings_hint())
        } else {
            anyhow::Error::new(e)
        }
    })?;

    if let Some(path) = export {
        let csv = reports::export_to_csv(&projection)?;
        std::fs::write(path, csv)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Exported {} months to {}", projection.points.len(), path.display());
    }

    if json_output {
        let payload = serde_json::json!({
            "holdings": holdings,
            "aggregate": projection.aggregate,
            "parameters": projection.parameters,
            "monthly_rate": projection.monthly_rate,
            "verdict": projection.verdict,
            "message": formatters::verdict_message(
                &projection.verdict,
                params.income_goal_monthly
            ),
            "yearly": reports::yearly_snapshots(&projection),
            "points": projection.points,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print!("{}", formatters::format_holdings_table(holdings, &aggregate));
    let sampled = reports::sample_points(&projection.points, every);
    print!(
        "{}",
        formatters::format_projection_table(&sampled, params.income_goal_monthly)
    );
    print!("{}", formatters::format_projection_summary(&projection));
    print!(
        "{}",
        formatters::format_verdict(&projection.verdict, params.income_goal_monthly)
    );
    if let Some(path) = export {
        println!("Exported projection to {}", path.display());
    }
    Ok(())
}

/// Asset for a command-line holding. Without an explicit yield the catalog
/// is asked for the ticker's current dividend yield.
async fn resolve_asset(spec: &HoldingSpec, config: &Config) -> Result<SimulationAsset> {
    if let Some(dividend_yield) = spec.dividend_yield {
        return Ok(SimulationAsset::manual(&spec.ticker, dividend_yield));
    }

    let offline = std::env::var("FLOWEST_OFFLINE")
        .map(|v| v != "0")
        .unwrap_or(false);
    if offline {
        anyhow::bail!(
            "No dividend yield for {} and catalog lookups are disabled (FLOWEST_OFFLINE). Use {}:QUANTITY:PRICE:YIELD",
            spec.ticker,
            spec.ticker
        );
    }

    let client = ApiClient::from_config(&config.api).with_context(|| {
        format!(
            "No dividend yield given for {}; the catalog is needed to look it up",
            spec.ticker
        )
    })?;
    debug!("Looking up {} in the catalog", spec.ticker);
    let candidates = client.search_tickers(&spec.ticker).await?;
    let ticker = find_exact(&candidates, &spec.ticker)
        .ok_or_else(|| anyhow::anyhow!("Ticker {} not found in the catalog", spec.ticker))?;
    Ok(SimulationAsset::from(ticker))
}
