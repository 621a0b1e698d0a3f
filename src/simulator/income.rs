//! Quick dividend income estimate
//!
//! Row-based estimator: for each (ticker, invested value, yield) row, the
//! annual income is `value * yield / 100` and the monthly income a twelfth
//! of that. No compounding and no contributions; see `projection` for that.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRow {
    pub ticker: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub investment_value: Decimal,
    /// Annual dividend yield, in percent
    #[serde(with = "rust_decimal::serde::float")]
    pub dividend_yield: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncomeEstimate {
    pub monthly_income: Decimal,
    pub annual_income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeSummary {
    pub rows: Vec<(IncomeRow, IncomeEstimate)>,
    pub total_investment: Decimal,
    pub total_annual_income: Decimal,
    pub total_monthly_income: Decimal,
}

impl IncomeRow {
    pub fn new(ticker: &str, investment_value: Decimal, dividend_yield: Decimal) -> Self {
        Self {
            ticker: ticker.trim().to_ascii_uppercase(),
            investment_value,
            dividend_yield,
        }
    }

    fn validate(&self) -> Result<(), SimulationError> {
        if self.investment_value < Decimal::ZERO {
            return Err(SimulationError::invalid_holding(
                &self.ticker,
                "invested value cannot be negative",
            ));
        }
        if self.dividend_yield < Decimal::ZERO {
            return Err(SimulationError::invalid_holding(
                &self.ticker,
                "dividend yield cannot be negative",
            ));
        }
        Ok(())
    }
}

pub fn estimate_row(row: &IncomeRow) -> IncomeEstimate {
    let annual_income = row.investment_value * (row.dividend_yield / Decimal::ONE_HUNDRED);
    IncomeEstimate {
        monthly_income: annual_income / Decimal::from(12),
        annual_income,
    }
}

/// Estimate every row and total them. Empty input totals to zero.
pub fn summarize(rows: &[IncomeRow]) -> Result<IncomeSummary, SimulationError> {
    let mut total_investment = Decimal::ZERO;
    let mut total_annual_income = Decimal::ZERO;
    let mut estimated = Vec::with_capacity(rows.len());

    for row in rows {
        row.validate()?;
        let estimate = estimate_row(row);
        total_investment += row.investment_value;
        total_annual_income += estimate.annual_income;
        estimated.push((row.clone(), estimate));
    }

    Ok(IncomeSummary {
        rows: estimated,
        total_investment,
        total_annual_income,
        total_monthly_income: total_annual_income / Decimal::from(12),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_estimate_row() {
        let estimate = estimate_row(&IncomeRow::new("MXRF11", dec!(10000), dec!(12.5)));
        assert_eq!(estimate.annual_income, dec!(1250));
        assert!((estimate.monthly_income - dec!(104.1666666)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_summarize_totals() {
        let summary = summarize(&[
            IncomeRow::new("MXRF11", dec!(10000), dec!(12.5)),
            IncomeRow::new("ITSA4", dec!(25000), dec!(8.2)),
        ])
        .unwrap();

        assert_eq!(summary.total_investment, dec!(35000));
        assert_eq!(summary.total_annual_income, dec!(3300));
        assert_eq!(summary.total_monthly_income, dec!(275));
        assert_eq!(summary.rows.len(), 2);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]).unwrap();
        assert_eq!(summary.total_investment, Decimal::ZERO);
        assert_eq!(summary.total_monthly_income, Decimal::ZERO);
    }

    #[test]
    fn test_zero_rows_are_allowed() {
        let summary = summarize(&[IncomeRow::new("", Decimal::ZERO, Decimal::ZERO)]).unwrap();
        assert_eq!(summary.total_annual_income, Decimal::ZERO);
    }

    #[test]
    fn test_negative_value_is_rejected() {
        let err = summarize(&[IncomeRow::new("PETR4", dec!(-1), dec!(10))]).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidHolding { .. }));
    }
}
