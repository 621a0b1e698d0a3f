//! Holdings aggregation
//!
//! Reduces the positions a user declared for a simulation into the two
//! numbers the projection starts from: total principal and the cost-weighted
//! (blended) annual dividend yield.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::asset::SimulationAsset;
use crate::error::SimulationError;

/// One simulated position: an asset, how many units, and what they cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub asset: SimulationAsset,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
}

impl Holding {
    pub fn new(asset: SimulationAsset, quantity: Decimal, total_cost: Decimal) -> Self {
        Self {
            asset,
            quantity,
            total_cost,
        }
    }

    /// Holding bought at `unit_price` per unit
    pub fn from_purchase(
        asset: SimulationAsset,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<Self, SimulationError> {
        let total_cost = quantity.checked_mul(unit_price).ok_or_else(|| {
            SimulationError::invalid_holding(&asset.ticker, "total cost is too large")
        })?;
        Ok(Self::new(asset, quantity, total_cost))
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let ticker = &self.asset.ticker;
        if self.quantity <= Decimal::ZERO {
            return Err(SimulationError::invalid_holding(
                ticker,
                format!("quantity must be positive (got {})", self.quantity),
            ));
        }
        if self.total_cost <= Decimal::ZERO {
            return Err(SimulationError::invalid_holding(
                ticker,
                format!("total cost must be positive (got {})", self.total_cost),
            ));
        }
        if self.asset.dividend_yield < Decimal::ZERO {
            return Err(SimulationError::invalid_holding(
                ticker,
                format!(
                    "dividend yield cannot be negative (got {})",
                    self.asset.dividend_yield
                ),
            ));
        }
        Ok(())
    }

    pub fn average_price(&self) -> Decimal {
        if self.quantity > Decimal::ZERO {
            self.total_cost / self.quantity
        } else {
            Decimal::ZERO
        }
    }
}

/// Aggregated view of a holding set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AggregateResult {
    pub total_invested: Decimal,
    /// Annual yield in percent, weighted by each holding's cost
    pub blended_annual_yield: Decimal,
}

impl AggregateResult {
    /// Yearly income the current principal pays at the blended yield
    pub fn annual_income(&self) -> Decimal {
        self.total_invested * self.blended_annual_yield / Decimal::ONE_HUNDRED
    }

    pub fn monthly_income(&self) -> Decimal {
        self.annual_income() / Decimal::from(12)
    }
}

/// Aggregate holdings into total principal and blended yield.
///
/// Every holding is validated before anything is summed, so a rejected
/// holding never contributes to the totals. An empty set, or one whose costs
/// sum to zero, aggregates to `{0, 0}`.
pub fn aggregate(holdings: &[Holding]) -> Result<AggregateResult, SimulationError> {
    for holding in holdings {
        holding.validate()?;
    }

    let mut total_invested = Decimal::ZERO;
    for holding in holdings {
        total_invested = total_invested
            .checked_add(holding.total_cost)
            .ok_or_else(|| {
                SimulationError::InvalidParameters("total invested is too large".to_string())
            })?;
    }

    if total_invested.is_zero() {
        return Ok(AggregateResult::default());
    }

    let blended_annual_yield = holdings
        .iter()
        .map(|h| (h.total_cost / total_invested) * h.asset.dividend_yield)
        .sum();

    Ok(AggregateResult {
        total_invested,
        blended_annual_yield,
    })
}

/// Holdings keyed by asset identity: adding an asset that is already present
/// merges into the existing entry instead of duplicating it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldingSet {
    holdings: Vec<Holding>,
}

impl HoldingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and insert a holding, summing quantity and cost into the
    /// entry for the same asset when one exists.
    pub fn add(&mut self, holding: Holding) -> Result<(), SimulationError> {
        holding.validate()?;

        match self
            .holdings
            .iter_mut()
            .find(|h| h.asset.same_asset(&holding.asset))
        {
            Some(existing) => {
                let overflow = || {
                    SimulationError::invalid_holding(&holding.asset.ticker, "merged position is too large")
                };
                existing.quantity = existing
                    .quantity
                    .checked_add(holding.quantity)
                    .ok_or_else(overflow)?;
                existing.total_cost = existing
                    .total_cost
                    .checked_add(holding.total_cost)
                    .ok_or_else(overflow)?;
            }
            None => self.holdings.push(holding),
        }
        Ok(())
    }

    pub fn add_purchase(
        &mut self,
        asset: SimulationAsset,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<(), SimulationError> {
        self.add(Holding::from_purchase(asset, quantity, unit_price)?)
    }

    /// Remove the holding whose asset id or ticker is `key`
    pub fn remove(&mut self, key: &str) -> Option<Holding> {
        let index = self.holdings.iter().position(|h| h.asset.matches_key(key))?;
        Some(self.holdings.remove(index))
    }

    pub fn get(&self, key: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.asset.matches_key(key))
    }

    pub fn aggregate(&self) -> Result<AggregateResult, SimulationError> {
        aggregate(&self.holdings)
    }

    pub fn as_slice(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holding> {
        self.holdings.iter()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn into_vec(self) -> Vec<Holding> {
        self.holdings
    }
}

impl TryFrom<Vec<Holding>> for HoldingSet {
    type Error = SimulationError;

    fn try_from(holdings: Vec<Holding>) -> Result<Self, Self::Error> {
        let mut set = HoldingSet::new();
        for holding in holdings {
            set.add(holding)?;
        }
        Ok(set)
    }
}

impl<'a> IntoIterator for &'a HoldingSet {
    type Item = &'a Holding;
    type IntoIter = std::slice::Iter<'a, Holding>;

    fn into_iter(self) -> Self::IntoIter {
        self.holdings.iter()
    }
}
