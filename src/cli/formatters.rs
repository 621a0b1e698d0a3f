//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of simulation from presentation.

use colored::Colorize;
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use flowest::api::Ticker;
use flowest::simulator::{
    AggregateResult, HoldingSet, IncomeSummary, Projection, ProjectionPoint, SavedSimulation,
    Verdict,
};
use flowest::utils::{format_currency, format_decimal_br, format_percent};

/// Holdings table plus the aggregate line the projection starts from
pub fn format_holdings_table(holdings: &HoldingSet, aggregate: &AggregateResult) -> String {
    #[derive(Tabled)]
    struct HoldingRow {
        #[tabled(rename = "Ticker")]
        ticker: String,
        #[tabled(rename = "Type")]
        asset_type: String,
        #[tabled(rename = "Quantity")]
        quantity: String,
        #[tabled(rename = "Avg Price")]
        avg_price: String,
        #[tabled(rename = "Total Cost")]
        total_cost: String,
        #[tabled(rename = "Weight")]
        weight: String,
        #[tabled(rename = "DY")]
        dividend_yield: String,
    }

    let rows: Vec<HoldingRow> = holdings
        .iter()
        .map(|h| {
            let weight = if aggregate.total_invested.is_zero() {
                Decimal::ZERO
            } else {
                h.total_cost / aggregate.total_invested * Decimal::ONE_HUNDRED
            };
            HoldingRow {
                ticker: h.asset.ticker.clone(),
                asset_type: h
                    .asset
                    .asset_type
                    .map(|t| t.as_str().to_string())
                    .unwrap_or_else(|| "-".to_string()),
                quantity: format_decimal_br(h.quantity, 2),
                avg_price: format_currency(h.average_price()),
                total_cost: format_currency(h.total_cost),
                weight: format_percent(weight),
                dividend_yield: format_percent(h.asset.dividend_yield),
            }
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(2..), Alignment::right());

    let mut output = format!("\n{} Holdings\n\n", "📊".cyan().bold());
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n{:<22} {}",
        "Total Invested:".bold(),
        format_currency(aggregate.total_invested)
    ));
    output.push_str(&format!(
        "\n{:<22} {}",
        "Blended Yield:".bold(),
        format_percent(aggregate.blended_annual_yield)
    ));
    output.push_str(&format!(
        "\n{:<22} {}\n",
        "Income Today:".bold(),
        format!("{}/mês", format_currency(aggregate.monthly_income())).green()
    ));
    output
}

/// Month-by-month table of the sampled projection points
pub fn format_projection_table(points: &[&ProjectionPoint], goal: Decimal) -> String {
    #[derive(Tabled)]
    struct PointRow {
        #[tabled(rename = "Month")]
        month: String,
        #[tabled(rename = "#")]
        index: String,
        #[tabled(rename = "Patrimony")]
        patrimony: String,
        #[tabled(rename = "Monthly Income")]
        income: String,
    }

    let rows: Vec<PointRow> = points
        .iter()
        .map(|p| {
            let income = format_currency(p.monthly_income);
            PointRow {
                month: p.month_label.clone(),
                index: (p.month_index + 1).to_string(),
                patrimony: format_currency(p.patrimony),
                income: if p.monthly_income >= goal {
                    income.green().to_string()
                } else {
                    income
                },
            }
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());

    format!("\n{} Projection\n\n{}\n", "📈".cyan().bold(), table)
}

/// Totals over the horizon
pub fn format_projection_summary(projection: &Projection) -> String {
    let mut output = format!("\n{} Summary", "━".repeat(60).bright_black());
    output.push_str(&format!(
        "\n{:<22} {}",
        "Monthly Rate:".bold(),
        format_percent(projection.monthly_rate * Decimal::ONE_HUNDRED)
    ));
    output.push_str(&format!(
        "\n{:<22} {}",
        "Contributed:".bold(),
        format_currency(projection.total_contributed())
    ));
    output.push_str(&format!(
        "\n{:<22} {}",
        "Income Reinvested:".bold(),
        format_currency(projection.total_income())
    ));
    output.push_str(&format!(
        "\n{:<22} {}\n",
        "Final Patrimony:".bold(),
        format_currency(projection.final_patrimony()).cyan()
    ));
    output
}

/// Plain-language verdict, in the same words as the web planner
pub fn verdict_message(verdict: &Verdict, goal: Decimal) -> String {
    match verdict {
        Verdict::GoalReached { month_label, .. } => format!(
            "Sua meta de {}/mês será atingida em {}.",
            format_currency(goal),
            month_label
        ),
        Verdict::GoalNotReached {
            horizon_years,
            final_monthly_income,
        } => format!(
            "Após {} anos, sua renda mensal estimada será de {}.",
            horizon_years,
            format_currency(*final_monthly_income)
        ),
    }
}

pub fn format_verdict(verdict: &Verdict, goal: Decimal) -> String {
    let message = verdict_message(verdict, goal);
    if verdict.is_reached() {
        format!("\n{} {}\n", "✓".green().bold(), message.green())
    } else {
        format!("\n{} {}\n", "ℹ".blue().bold(), message)
    }
}

/// Quick income estimate table with a totals row
pub fn format_income_table(summary: &IncomeSummary) -> String {
    #[derive(Tabled)]
    struct IncomeRowView {
        #[tabled(rename = "Ticker")]
        ticker: String,
        #[tabled(rename = "Invested")]
        invested: String,
        #[tabled(rename = "DY")]
        dividend_yield: String,
        #[tabled(rename = "Monthly (est.)")]
        monthly: String,
        #[tabled(rename = "Annual (est.)")]
        annual: String,
    }

    let mut rows: Vec<IncomeRowView> = summary
        .rows
        .iter()
        .map(|(row, estimate)| IncomeRowView {
            ticker: row.ticker.clone(),
            invested: format_currency(row.investment_value),
            dividend_yield: format_percent(row.dividend_yield),
            monthly: format_currency(estimate.monthly_income),
            annual: format_currency(estimate.annual_income),
        })
        .collect();

    rows.push(IncomeRowView {
        ticker: "TOTAL".bold().to_string(),
        invested: format_currency(summary.total_investment).bold().to_string(),
        dividend_yield: String::new(),
        monthly: format_currency(summary.total_monthly_income)
            .bold()
            .to_string(),
        annual: format_currency(summary.total_annual_income)
            .green()
            .bold()
            .to_string(),
    });

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());

    format!("\n{} Passive Income Estimate\n\n{}\n", "💰".cyan().bold(), table)
}

pub fn format_tickers_table(tickers: &[Ticker]) -> String {
    #[derive(Tabled)]
    struct TickerRow {
        #[tabled(rename = "Ticker")]
        ticker: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Type")]
        asset_type: String,
        #[tabled(rename = "Price")]
        price: String,
        #[tabled(rename = "DY")]
        dividend_yield: String,
    }

    let rows: Vec<TickerRow> = tickers
        .iter()
        .map(|t| TickerRow {
            ticker: t.ticker.clone(),
            name: t.company_name.clone(),
            asset_type: t
                .asset_type
                .map(|a| a.as_str().to_string())
                .unwrap_or_else(|| "-".to_string()),
            price: t
                .current_price
                .map(format_currency)
                .unwrap_or_else(|| "N/A".to_string()),
            dividend_yield: t
                .dividend_yield
                .map(format_percent)
                .unwrap_or_else(|| "N/A".to_string()),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(3..), Alignment::right());
    table.to_string()
}

pub fn format_simulations_table(simulations: &[SavedSimulation]) -> String {
    #[derive(Tabled)]
    struct SimulationRow {
        #[tabled(rename = "Id")]
        id: String,
        #[tabled(rename = "Title")]
        title: String,
        #[tabled(rename = "Assets")]
        assets: usize,
        #[tabled(rename = "Monthly")]
        monthly: String,
        #[tabled(rename = "Goal")]
        goal: String,
        #[tabled(rename = "Years")]
        years: i32,
        #[tabled(rename = "Updated")]
        updated: String,
    }

    let rows: Vec<SimulationRow> = simulations
        .iter()
        .map(|s| SimulationRow {
            id: s.id.clone(),
            title: s.title.clone(),
            assets: s.holdings.len(),
            monthly: format_currency(s.monthly_investment),
            goal: format_currency(s.income_goal),
            years: s.simulation_years,
            updated: s
                .updated_at
                .or(s.created_at)
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(2..6), Alignment::right());
    table.to_string()
}

/// Hint attached to the refusal of an empty simulation
pub fn empty_holdings_hint() -> String {
    "No holdings to simulate. Add one with: flowest simulate --holding TICKER:QUANTITY:PRICE:YIELD"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_verdict_message_reached() {
        let verdict = Verdict::GoalReached {
            month_index: 40,
            month_label: "fev/2030".to_string(),
            monthly_income: dec!(151.2),
        };
        assert_eq!(
            verdict_message(&verdict, dec!(150)),
            "Sua meta de R$ 150,00/mês será atingida em fev/2030."
        );
    }

    #[test]
    fn test_verdict_message_not_reached() {
        let verdict = Verdict::GoalNotReached {
            horizon_years: 10,
            final_monthly_income: dec!(1234.567),
        };
        assert_eq!(
            verdict_message(&verdict, dec!(5000)),
            "Após 10 anos, sua renda mensal estimada será de R$ 1.234,57."
        );
    }

    #[test]
    fn test_empty_holdings_hint() {
        let msg = empty_holdings_hint();
        assert!(msg.contains("No holdings to simulate"));
        assert!(msg.contains("--holding"));
    }
}
