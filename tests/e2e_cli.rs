
use assert_cmd::prelude::*;
use cli_helpers::{base_cmd, run_cmd_json, stdout_of};
use predicates::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::TempDir;

fn setup_temp_home() -> TempDir {
    TempDir::new().expect("failed to create temp home")
}

fn decimal(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        other => Decimal::from_str(&other.to_string()).expect("decimal number"),
    }
}

#[test]
fn simulate_reports_goal_month_without_ansi() {
    let home = setup_temp_home();

    base_cmd(&home)
        .args([
            "simulate",
            "--holding",
            "MXRF11:1000:10:12.5",
            "--goal",
            "150",
            "--years",
            "5",
            "--start",
            "2026-10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("MXRF11"))
        .stdout(predicate::str::contains("R$ 10.000,00"))
        .stdout(predicate::str::contains(
            "Sua meta de R$ 150,00/mês será atingida em jun/2027.",
        ))
        .stdout(predicate::str::contains("\u{001b}[").not());
}

#[test]
fn simulate_reports_final_income_when_goal_not_reached() {
    let home = setup_temp_home();
    let stdout = stdout_of(
        &home,
        &["simulate", "-H", "MXRF11:1000:10:12.5", "--start", "2026-10"],
    )
    .unwrap();

    assert!(stdout.contains("Após 10 anos, sua renda mensal estimada será de R$ 1.573,56."));
    assert!(stdout.contains("set/2036"), "final month is always shown");
}

#[test]
fn simulate_json_output() {
    let home = setup_temp_home();
    let json = run_cmd_json(
        &home,
        &[
            "simulate",
            "-H",
            "MXRF11:1000:10:12.5",
            "--goal",
            "150",
            "--years",
            "5",
            "--start",
            "2026-10-18",
        ],
    )
    .unwrap();

    assert_eq!(json["verdict"]["status"], "goal_reached");
    assert_eq!(json["verdict"]["month_index"], 8);
    assert_eq!(json["verdict"]["month_label"], "jun/2027");
    assert_eq!(json["points"].as_array().unwrap().len(), 60);
    assert_eq!(json["points"][0]["month_label"], "out/2026");
    assert_eq!(decimal(&json["aggregate"]["total_invested"]), Decimal::from(10000));
    assert_eq!(
        decimal(&json["aggregate"]["blended_annual_yield"]),
        Decimal::from_str("12.5").unwrap()
    );
    assert_eq!(json["yearly"].as_array().unwrap().len(), 5);
}

#[test]
fn simulate_merges_repeated_ticker() {
    let home = setup_temp_home();
    let json = run_cmd_json(
        &home,
        &[
            "simulate",
            "-H",
            "MXRF11:600:10:12.5",
            "-H",
            "mxrf11:400:10:12.5",
            "--start",
            "2026-10",
        ],
    )
    .unwrap();

    let holdings = json["holdings"].as_array().unwrap();
    assert_eq!(holdings.len(), 1);
    assert_eq!(decimal(&holdings[0]["quantity"]), Decimal::from(1000));
    assert_eq!(decimal(&holdings[0]["totalCost"]), Decimal::from(10000));
}

#[test]
fn simulate_without_holdings_refuses_in_every_mode() {
    let home = setup_temp_home();
    base_cmd(&home)
        .arg("simulate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No holdings to simulate"))
        .stderr(predicate::str::contains("dividend yield greater than zero"));

    base_cmd(&home)
        .args(["--json", "simulate"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("dividend yield greater than zero"));
}

#[test]
fn simulate_without_holdings_still_validates_parameters() {
    let home = setup_temp_home();
    base_cmd(&home)
        .args(["simulate", "--years", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("horizon"));
}

#[test]
fn simulate_merges_command_line_holding_into_file_holding() {
    let home = setup_temp_home();
    let json = run_cmd_json(
        &home,
        &[
            "simulate",
            "--file",
            "tests/fixtures/simulation.json",
            "-H",
            "MXRF11:500:10:12.5",
            "--start",
            "2026-10",
        ],
    )
    .unwrap();

    let holdings = json["holdings"].as_array().unwrap();
    assert_eq!(holdings.len(), 1);
    assert_eq!(holdings[0]["asset"]["_id"], "6710a1f0c2b9e4a1d2f3b001");
    assert_eq!(decimal(&holdings[0]["quantity"]), Decimal::from(1500));
    assert_eq!(decimal(&holdings[0]["totalCost"]), Decimal::from(15000));
}

#[test]
fn simulate_refuses_zero_yield() {
    let home = setup_temp_home();
    base_cmd(&home)
        .args(["simulate", "-H", "CDB:10:100:0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dividend yield greater than zero"));
}

#[test]
fn simulate_rejects_negative_quantity() {
    let home = setup_temp_home();
    base_cmd(&home)
        .args(["simulate", "-H", "PETR4:-5:30:10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PETR4"));
}

#[test]
fn simulate_without_yield_needs_catalog() {
    let home = setup_temp_home();
    base_cmd(&home)
        .args(["simulate", "-H", "ITSA4:100:10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FLOWEST_OFFLINE"));
}

#[test]
fn simulate_from_file_and_export_csv() {
    let home = setup_temp_home();
    let export_path = home.path().join("projection.csv");

    base_cmd(&home)
        .args([
            "simulate",
            "--file",
            "tests/fixtures/simulation.json",
            "--start",
            "2026-10",
            "--export",
        ])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("será atingida em jun/2027"));

    let csv = std::fs::read_to_string(&export_path).expect("export written");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "month,label,date,patrimony,monthly_income");
    assert_eq!(lines.len(), 61);
    assert!(lines[1].starts_with("0,out/2026,2026-10,"));
}

#[test]
fn simulate_flags_override_file_parameters() {
    let home = setup_temp_home();
    let json = run_cmd_json(
        &home,
        &[
            "simulate",
            "-f",
            "tests/fixtures/simulation.json",
            "--years",
            "2",
            "--start",
            "2026-10",
        ],
    )
    .unwrap();

    assert_eq!(json["parameters"]["horizon_years"], 2);
    assert_eq!(json["points"].as_array().unwrap().len(), 24);
}

#[test]
fn simulate_rejects_invalid_horizon() {
    let home = setup_temp_home();
    base_cmd(&home)
        .args(["simulate", "-H", "MXRF11:10:10:12", "--years", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("horizon"));
}

#[test]
fn income_estimates_totals() {
    let home = setup_temp_home();

    base_cmd(&home)
        .args(["income", "-r", "ITSA4:25000:8,2", "-r", "MXRF11:10000:12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TOTAL"))
        .stdout(predicate::str::contains("R$ 3.250,00"))
        .stdout(predicate::str::contains("R$ 170,83"));

    let json = run_cmd_json(&home, &["income", "-r", "ITSA4:25000:8,2", "-r", "MXRF11:10000:12"])
        .unwrap();
    assert_eq!(decimal(&json["total_annual_income"]), Decimal::from(3250));
    assert_eq!(decimal(&json["total_investment"]), Decimal::from(35000));
    assert_eq!(json["rows"][0]["ticker"], "ITSA4");
}

#[test]
fn config_path_honours_env_override() {
    let home = setup_temp_home();
    let stdout = stdout_of(&home, &["config", "path"]).unwrap();
    assert_eq!(
        stdout.trim(),
        home.path().join("config.toml").display().to_string()
    );
}

#[test]
fn config_show_masks_token() {
    let home = setup_temp_home();
    std::fs::write(
        home.path().join("config.toml"),
        "[api]\nbase_url = \"http://localhost:3333\"\ntoken = \"abcdefghijklmnop\"\n",
    )
    .unwrap();

    let json = run_cmd_json(&home, &["config", "show"]).unwrap();
    assert_eq!(json["api"]["base_url"], "http://localhost:3333");
    assert_eq!(json["api"]["token"], "abcd****");
}

#[test]
fn simulations_require_api_url() {
    let home = setup_temp_home();
    base_cmd(&home)
        .args(["simulations", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FLOWEST_API_URL"));
}
