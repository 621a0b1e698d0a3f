use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::simulator::{projection::MONTHS_PER_YEAR, Projection, ProjectionPoint};

/// Where the projection stands at the end of each simulated year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlySnapshot {
    /// 1-based year of the horizon
    pub year: u32,
    pub month_label: String,
    pub patrimony: Decimal,
    /// Income paid in the year's last month
    pub monthly_income: Decimal,
    /// Sum of the twelve months of income
    pub income_in_year: Decimal,
}

pub fn yearly_snapshots(projection: &Projection) -> Vec<YearlySnapshot> {
    projection
        .points
        .chunks(MONTHS_PER_YEAR as usize)
        .enumerate()
        .filter_map(|(i, year)| {
            let last = year.last()?;
            Some(YearlySnapshot {
                year: i as u32 + 1,
                month_label: last.month_label.clone(),
                patrimony: last.patrimony,
                monthly_income: last.monthly_income,
                income_in_year: year.iter().map(|p| p.monthly_income).sum(),
            })
        })
        .collect()
}

/// Every `every`-th point starting at month 0, always including the final
/// point. `every == 0` keeps all points.
pub fn sample_points(points: &[ProjectionPoint], every: u32) -> Vec<&ProjectionPoint> {
    let step = every.max(1) as usize;
    let mut sampled: Vec<&ProjectionPoint> = points.iter().step_by(step).collect();
    if let Some(last) = points.last() {
        if sampled.last().map(|p| p.month_index) != Some(last.month_index) {
            sampled.push(last);
        }
    }
    sampled
}

#[derive(Serialize)]
struct CsvRow<'a> {
    month: u32,
    label: &'a str,
    date: String,
    patrimony: String,
    monthly_income: String,
}

/// Projection as CSV, one row per month, amounts rounded to cents
pub fn export_to_csv(projection: &Projection) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for point in &projection.points {
        writer
            .serialize(CsvRow {
                month: point.month_index,
                label: &point.month_label,
                date: point.month.format("%Y-%m").to_string(),
                patrimony: format!("{:.2}", point.patrimony.round_dp(2)),
                monthly_income: format!("{:.2}", point.monthly_income.round_dp(2)),
            })
            .context("Failed to write projection row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush projection CSV: {}", e))?;
    String::from_utf8(bytes).context("Projection CSV is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::{project, AggregateResult, SimulationParameters};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_projection(years: i32) -> Projection {
        project(
            &AggregateResult {
                total_invested: dec!(1200),
                blended_annual_yield: dec!(12),
            },
            &SimulationParameters {
                monthly_contribution: dec!(100),
                income_goal_monthly: dec!(50),
                horizon_years: years,
            },
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_yearly_snapshots() {
        let projection = sample_projection(3);
        let snapshots = yearly_snapshots(&projection);
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[0].year, 1);
        assert_eq!(snapshots[0].month_label, "dez/2026");
        assert_eq!(snapshots[2].patrimony, projection.final_patrimony());

        let first_year: Decimal = projection.points[..12].iter().map(|p| p.monthly_income).sum();
        assert_eq!(snapshots[0].income_in_year, first_year);
    }

    #[test]
    fn test_sample_points_includes_last() {
        let projection = sample_projection(1);
        let sampled = sample_points(&projection.points, 5);
        let months: Vec<u32> = sampled.iter().map(|p| p.month_index).collect();
        assert_eq!(months, [0, 5, 10, 11]);

        assert_eq!(sample_points(&projection.points, 0).len(), 12);
        assert_eq!(sample_points(&projection.points, 11).len(), 2);
        assert!(sample_points(&[], 3).is_empty());
    }

    #[test]
    fn test_export_to_csv() {
        let projection = sample_projection(1);
        let csv = export_to_csv(&projection).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "month,label,date,patrimony,monthly_income");
        assert_eq!(lines[1], "0,jan/2026,2026-01,1312.00,12.00");
    }
}
