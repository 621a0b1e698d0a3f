//! Command dispatcher that routes parsed commands to their handlers.

mod income;
mod simulate;
mod simulations;
mod tickers;

use anyhow::Result;

use crate::commands::{Command, ConfigAction};
use flowest::config::Config;

/// Route a parsed command to its handler
pub async fn dispatch_command(command: Command, json_output: bool) -> Result<()> {
    match command {
        Command::Simulate(args) => simulate::dispatch_simulate(args, json_output).await,
        Command::Income { rows } => income::dispatch_income(rows, json_output),
        Command::TickersSearch { query } => {
            tickers::dispatch_tickers_search(&query, json_output).await
        }
        Command::Simulations { action } => {
            simulations::dispatch_simulations(action, json_output).await
        }
        Command::Config { action } => dispatch_config(action, json_output),
    }
}

fn dispatch_config(action: ConfigAction, json_output: bool) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?.redacted();
            if json_output {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
            Ok(())
        }
        ConfigAction::Path => {
            let path = Config::path()?;
            if json_output {
                println!("{}", serde_json::json!({ "path": path }));
            } else {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}
