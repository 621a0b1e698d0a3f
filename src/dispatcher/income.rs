use anyhow::Result;

use crate::cli::formatters;
use flowest::simulator::{summarize, IncomeRow};

pub fn dispatch_income(rows: Vec<IncomeRow>, json_output: bool) -> Result<()> {
    let summary = summarize(&rows)?;

    if json_output {
        let rows: Vec<_> = summary
            .rows
            .iter()
            .map(|(row, estimate)| {
                serde_json::json!({
                    "ticker": row.ticker,
                    "investment_value": row.investment_value,
                    "dividend_yield": row.dividend_yield,
                    "monthly_income": estimate.monthly_income,
                    "annual_income": estimate.annual_income,
                })
            })
            .collect();
        let payload = serde_json::json!({
            "rows": rows,
            "total_investment": summary.total_investment,
            "total_monthly_income": summary.total_monthly_income,
            "total_annual_income": summary.total_annual_income,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print!("{}", formatters::format_income_table(&summary));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_dispatch_income_runs_without_runtime() {
        let rows = vec![IncomeRow::new("ITSA4", dec!(25000), dec!(8.2))];
        assert!(dispatch_income(rows, true).is_ok());
    }

    #[test]
    fn test_dispatch_income_rejects_negative_value() {
        let rows = vec![IncomeRow::new("ITSA4", dec!(-1), dec!(8.2))];
        assert!(dispatch_income(rows, false).is_err());
    }
}
