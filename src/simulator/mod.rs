//! Passive-income simulator
//!
//! Pure computation over explicit inputs: holdings are aggregated into a
//! principal and blended yield, which seed a month-by-month projection.
//! Nothing here performs I/O or reads the clock; callers pass the anchor
//! month and own any caching.

pub mod asset;
pub mod holdings;
pub mod income;
pub mod projection;
pub mod record;

pub use asset::{AssetType, SimulationAsset};
pub use holdings::{aggregate, AggregateResult, Holding, HoldingSet};
pub use income::{estimate_row, summarize, IncomeEstimate, IncomeRow, IncomeSummary};
pub use projection::{
    evaluate_goal, month_label, project, Projection, ProjectionPoint, SimulationParameters,
    Verdict,
};
pub use record::{
    load_simulation_file, CreateSimulationPayload, SavedSimulation, SimulationDraft,
    UpdateSimulationPayload,
};

use chrono::NaiveDate;

use crate::error::SimulationError;

/// Aggregate `holdings` and project them from `anchor`.
pub fn run_simulation(
    holdings: &[Holding],
    params: &SimulationParameters,
    anchor: NaiveDate,
) -> Result<Projection, SimulationError> {
    let aggregate = aggregate(holdings)?;
    project(&aggregate, params, anchor)
}
