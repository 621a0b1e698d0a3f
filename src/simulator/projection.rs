//! Passive-income projection
//!
//! Advances a simulated portfolio month by month. Each month the current
//! patrimony pays `blended_annual_yield / 100 / 12` as income, then income
//! and the monthly contribution are both reinvested into the same patrimony.
//! Income is computed before the month's contribution lands, so a
//! contribution only starts earning the following month.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::holdings::AggregateResult;
use crate::error::SimulationError;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Up-front capacity of the point buffer; longer horizons grow it as needed
const MAX_PREALLOCATED_MONTHS: u32 = 100 * MONTHS_PER_YEAR;

/// pt-BR month abbreviations, as shown on the projection chart axis
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Inputs of a single projection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub monthly_contribution: Decimal,
    pub income_goal_monthly: Decimal,
    pub horizon_years: i32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            monthly_contribution: Decimal::from(500),
            income_goal_monthly: Decimal::from(5000),
            horizon_years: 10,
        }
    }
}

impl SimulationParameters {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.horizon_years <= 0 {
            return Err(SimulationError::InvalidParameters(format!(
                "horizon must be at least one year (got {})",
                self.horizon_years
            )));
        }
        if self.horizon_months().is_none() {
            return Err(SimulationError::InvalidParameters(format!(
                "horizon of {} years is too long",
                self.horizon_years
            )));
        }
        if self.monthly_contribution < Decimal::ZERO {
            return Err(SimulationError::InvalidParameters(format!(
                "monthly contribution cannot be negative (got {})",
                self.monthly_contribution
            )));
        }
        if self.income_goal_monthly < Decimal::ZERO {
            return Err(SimulationError::InvalidParameters(format!(
                "monthly income goal cannot be negative (got {})",
                self.income_goal_monthly
            )));
        }
        Ok(())
    }

    /// Number of projected months, `None` when the horizon is negative or
    /// does not fit in a month count.
    pub fn horizon_months(&self) -> Option<u32> {
        u32::try_from(self.horizon_years)
            .ok()?
            .checked_mul(MONTHS_PER_YEAR)
    }
}

/// One simulated month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionPoint {
    pub month_index: u32,
    /// First day of the simulated month
    pub month: NaiveDate,
    /// `out/2026` style label
    pub month_label: String,
    /// Capital at the end of the month, after income and contribution
    pub patrimony: Decimal,
    /// Income paid by the capital held at the start of the month
    pub monthly_income: Decimal,
}

/// Outcome of scanning a projection for the income goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    GoalReached {
        month_index: u32,
        month_label: String,
        monthly_income: Decimal,
    },
    GoalNotReached {
        horizon_years: i32,
        final_monthly_income: Decimal,
    },
}

impl Verdict {
    pub fn is_reached(&self) -> bool {
        matches!(self, Verdict::GoalReached { .. })
    }
}

/// Full result of a projection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub aggregate: AggregateResult,
    pub parameters: SimulationParameters,
    pub monthly_rate: Decimal,
    pub points: Vec<ProjectionPoint>,
    pub verdict: Verdict,
}

impl Projection {
    pub fn final_point(&self) -> Option<&ProjectionPoint> {
        self.points.last()
    }

    pub fn final_patrimony(&self) -> Decimal {
        self.final_point()
            .map(|p| p.patrimony)
            .unwrap_or(self.aggregate.total_invested)
    }

    /// Sum of all monthly contributions over the horizon
    pub fn total_contributed(&self) -> Decimal {
        self.parameters.monthly_contribution * Decimal::from(self.points.len())
    }

    /// Sum of all income paid (and reinvested) over the horizon
    pub fn total_income(&self) -> Decimal {
        self.points.iter().map(|p| p.monthly_income).sum()
    }
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Label for the month containing `date`, e.g. `out/2026`
pub fn month_label(date: NaiveDate) -> String {
    format!(
        "{}/{}",
        MONTH_ABBREVIATIONS[date.month0() as usize],
        date.year()
    )
}

/// Project the portfolio over the parameters' horizon, starting at `anchor`.
///
/// Refuses to run (`NoYield`) when the blended yield is zero: a flat line
/// says nothing about passive income.
pub fn project(
    aggregate: &AggregateResult,
    params: &SimulationParameters,
    anchor: NaiveDate,
) -> Result<Projection, SimulationError> {
    params.validate()?;
    if aggregate.blended_annual_yield.is_zero() {
        return Err(SimulationError::NoYield);
    }

    let monthly_rate =
        aggregate.blended_annual_yield / Decimal::ONE_HUNDRED / Decimal::from(MONTHS_PER_YEAR);
    let first_month = month_start(anchor);
    let months = params.horizon_months().unwrap_or(0);

    // The whole horizon must have a calendar month before any work is done
    if let Some(last_index) = months.checked_sub(1) {
        first_month
            .checked_add_months(Months::new(last_index))
            .ok_or(SimulationError::ProjectionOverflow {
                month_index: last_index,
            })?;
    }

    let mut points = Vec::with_capacity(months.min(MAX_PREALLOCATED_MONTHS) as usize);
    let mut patrimony = aggregate.total_invested;

    for month_index in 0..months {
        let overflow = || SimulationError::ProjectionOverflow { month_index };

        let monthly_income = patrimony.checked_mul(monthly_rate).ok_or_else(overflow)?;
        patrimony = patrimony
            .checked_add(monthly_income)
            .and_then(|p| p.checked_add(params.monthly_contribution))
            .ok_or_else(overflow)?;

        let month = first_month
            .checked_add_months(Months::new(month_index))
            .ok_or_else(overflow)?;

        points.push(ProjectionPoint {
            month_index,
            month,
            month_label: month_label(month),
            patrimony,
            monthly_income,
        });
    }

    let verdict = evaluate_goal(&points, params);

    Ok(Projection {
        aggregate: *aggregate,
        parameters: *params,
        monthly_rate,
        points,
        verdict,
    })
}

/// Find the first month whose income meets the goal (`>=`). When none does,
/// report the income reached in the final month.
pub fn evaluate_goal(points: &[ProjectionPoint], params: &SimulationParameters) -> Verdict {
    match points
        .iter()
        .find(|p| p.monthly_income >= params.income_goal_monthly)
    {
        Some(point) => Verdict::GoalReached {
            month_index: point.month_index,
            month_label: point.month_label.clone(),
            monthly_income: point.monthly_income,
        },
        None => Verdict::GoalNotReached {
            horizon_years: params.horizon_years,
            final_monthly_income: points
                .last()
                .map(|p| p.monthly_income)
                .unwrap_or(Decimal::ZERO),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn aggregate(total: Decimal, yield_pct: Decimal) -> AggregateResult {
        AggregateResult {
            total_invested: total,
            blended_annual_yield: yield_pct,
        }
    }

    fn params(contribution: Decimal, goal: Decimal, years: i32) -> SimulationParameters {
        SimulationParameters {
            monthly_contribution: contribution,
            income_goal_monthly: goal,
            horizon_years: years,
        }
    }

    #[test]
    fn test_length_matches_horizon() {
        for years in [1, 5, 30] {
            let projection = project(
                &aggregate(dec!(1000), dec!(6)),
                &params(dec!(100), dec!(1000000), years),
                anchor(),
            )
            .unwrap();
            assert_eq!(projection.points.len(), years as usize * 12);
        }
    }

    #[test]
    fn test_first_month_uses_capital_before_contribution() {
        let projection = project(
            &aggregate(dec!(10000), dec!(12.5)),
            &params(dec!(500), dec!(150), 5),
            anchor(),
        )
        .unwrap();

        let first = &projection.points[0];
        assert_eq!(first.month_index, 0);
        assert!((first.monthly_income - dec!(104.1666666667)).abs() < dec!(0.0000001));
        assert!((first.patrimony - dec!(10604.1666666667)).abs() < dec!(0.0000001));
        assert!((projection.monthly_rate - dec!(0.0104166667)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_contribution_is_reinvested_with_income() {
        let projection = project(
            &aggregate(dec!(1200), dec!(12)),
            &params(dec!(100), dec!(1000), 1),
            anchor(),
        )
        .unwrap();
        // month 0: income 12, patrimony 1312; month 1: income 13.12
        assert_eq!(projection.points[0].patrimony, dec!(1312));
        assert_eq!(projection.points[1].monthly_income, dec!(13.12));
        assert_eq!(projection.points[1].patrimony, dec!(1425.12));
    }

    #[test]
    fn test_patrimony_is_strictly_increasing() {
        let projection = project(
            &aggregate(dec!(5000), dec!(0.5)),
            &params(Decimal::ZERO, dec!(100000), 10),
            anchor(),
        )
        .unwrap();
        for pair in projection.points.windows(2) {
            assert!(pair[1].patrimony > pair[0].patrimony);
        }
    }

    #[test]
    fn test_zero_yield_is_refused() {
        let err = project(&AggregateResult::default(), &params(dec!(500), dec!(100), 5), anchor())
            .unwrap_err();
        assert_eq!(err, SimulationError::NoYield);
    }

    #[test]
    fn test_invalid_parameters() {
        let agg = aggregate(dec!(1000), dec!(10));
        for bad in [
            params(dec!(500), dec!(100), 0),
            params(dec!(500), dec!(100), -2),
            params(dec!(-1), dec!(100), 5),
            params(dec!(500), dec!(-0.01), 5),
        ] {
            assert!(matches!(
                project(&agg, &bad, anchor()),
                Err(SimulationError::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn test_parameters_are_checked_before_yield() {
        let err = project(&AggregateResult::default(), &params(dec!(500), dec!(100), 0), anchor())
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidParameters(_)));
    }

    #[test]
    fn test_labels_follow_anchor_month() {
        let projection = project(
            &aggregate(dec!(1000), dec!(10)),
            &params(dec!(0), dec!(1000), 1),
            NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
        )
        .unwrap();
        let labels: Vec<_> = projection.points[..3]
            .iter()
            .map(|p| p.month_label.as_str())
            .collect();
        assert_eq!(labels, ["nov/2026", "dez/2026", "jan/2027"]);
        assert_eq!(projection.points[2].month, NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    }

    #[test]
    fn test_goal_reached_at_first_qualifying_month() {
        let projection = project(
            &aggregate(dec!(12000), dec!(12)),
            &params(dec!(0), dec!(120), 1),
            anchor(),
        )
        .unwrap();
        // income is exactly 120 in month 0; `>=` counts it
        assert_eq!(
            projection.verdict,
            Verdict::GoalReached {
                month_index: 0,
                month_label: "out/2026".to_string(),
                monthly_income: dec!(120),
            }
        );
    }

    #[test]
    fn test_goal_not_reached_reports_final_income() {
        let projection = project(
            &aggregate(dec!(1000), dec!(12)),
            &params(dec!(0), dec!(5000), 2),
            anchor(),
        )
        .unwrap();
        let last = projection.final_point().unwrap().monthly_income;
        assert_eq!(
            projection.verdict,
            Verdict::GoalNotReached {
                horizon_years: 2,
                final_monthly_income: last,
            }
        );
        assert!(!projection.verdict.is_reached());
    }

    #[test]
    fn test_evaluate_goal_on_empty_points() {
        let verdict = evaluate_goal(&[], &params(dec!(0), dec!(10), 1));
        assert_eq!(
            verdict,
            Verdict::GoalNotReached {
                horizon_years: 1,
                final_monthly_income: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn test_huge_growth_reports_overflow() {
        let err = project(
            &aggregate(dec!(1000000000), dec!(5000)),
            &params(dec!(0), dec!(1), 50),
            anchor(),
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::ProjectionOverflow { .. }));
    }

    #[test]
    fn test_horizon_beyond_month_count_is_invalid() {
        let err = project(
            &aggregate(dec!(1000), dec!(0.0000001)),
            &params(dec!(0), dec!(1), 1_000_000_000),
            anchor(),
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidParameters(_)));
    }

    #[test]
    fn test_horizon_beyond_calendar_reports_overflow() {
        // 3.6 billion months fit a u32 but not the calendar
        let err = project(
            &aggregate(dec!(1000), dec!(0.0000001)),
            &params(dec!(0), dec!(1), 300_000_000),
            anchor(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SimulationError::ProjectionOverflow {
                month_index: 3_599_999_999
            }
        );
    }

    #[test]
    fn test_horizon_months() {
        assert_eq!(params(dec!(0), dec!(1), 10).horizon_months(), Some(120));
        assert_eq!(params(dec!(0), dec!(1), -1).horizon_months(), None);
        assert_eq!(params(dec!(0), dec!(1), i32::MAX).horizon_months(), None);
    }

    #[test]
    fn test_totals() {
        let projection = project(
            &aggregate(dec!(1200), dec!(12)),
            &params(dec!(100), dec!(1000), 1),
            anchor(),
        )
        .unwrap();
        assert_eq!(projection.total_contributed(), dec!(1200));
        let expected = dec!(1200) + projection.total_contributed() + projection.total_income();
        assert_eq!(projection.final_patrimony(), expected);
    }

    #[test]
    fn test_identical_inputs_are_deterministic() {
        let agg = aggregate(dec!(3210), dec!(7.7));
        let p = params(dec!(321), dec!(400), 3);
        assert_eq!(project(&agg, &p, anchor()).unwrap(), project(&agg, &p, anchor()).unwrap());
    }
}
