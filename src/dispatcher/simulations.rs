use anyhow::Result;
use colored::Colorize;

use super::simulate::run_and_render;
use crate::cli::formatters;
use crate::commands::SimulationsAction;
use flowest::api::ApiClient;
use flowest::config::Config;
use flowest::simulator::{load_simulation_file, SavedSimulation};
use flowest::utils::format_currency;

pub async fn dispatch_simulations(action: SimulationsAction, json_output: bool) -> Result<()> {
    let config = Config::load()?;
    let client = ApiClient::from_config(&config.api)?;
    if !client.has_token() {
        anyhow::bail!("Not logged in. Set FLOWEST_TOKEN or [api].token in the config file");
    }

    match action {
        SimulationsAction::List { query } => {
            let simulations = client.list_simulations(query.as_deref()).await?;
            if json_output {
                println!("{}", serde_json::to_string_pretty(&simulations)?);
                return Ok(());
            }
            if simulations.is_empty() {
                println!("{} No saved simulations", "ℹ".blue().bold());
                return Ok(());
            }
            println!("{}", formatters::format_simulations_table(&simulations));
            Ok(())
        }

        SimulationsAction::Show { id } => {
            let simulation = fetch(&client, &id).await?;
            if json_output {
                println!("{}", serde_json::to_string_pretty(&simulation)?);
                return Ok(());
            }
            let (holdings, _) = simulation.to_inputs()?;
            println!("{} {}", simulation.title.bold(), format!("({})", simulation.id).dimmed());
            println!(
                "Monthly contribution: {}  Goal: {}/mês  Horizon: {} years",
                format_currency(simulation.monthly_investment),
                format_currency(simulation.income_goal),
                simulation.simulation_years
            );
            print!(
                "{}",
                formatters::format_holdings_table(&holdings, &holdings.aggregate()?)
            );
            Ok(())
        }

        SimulationsAction::Run { id, start, every } => {
            let simulation = fetch(&client, &id).await?;
            let (holdings, params) = simulation.to_inputs()?;
            if !json_output {
                println!("{}", simulation.title.bold());
            }
            run_and_render(&holdings, &params, start, every, None, json_output)
        }

        SimulationsAction::Save { file, title, id } => {
            let draft = load_simulation_file(&file)?;
            let defaults = config.defaults.parameters();
            let saved = match id {
                Some(id) => {
                    let payload = draft.build_update_payload(title.as_deref(), &defaults)?;
                    client.update_simulation(&id, &payload).await?
                }
                None => {
                    let payload = draft.build_create_payload(
                        config.api.user_id.as_deref(),
                        title.as_deref(),
                        &defaults,
                    )?;
                    client.create_simulation(&payload).await?
                }
            };
            if json_output {
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else {
                println!(
                    "{} Saved '{}' ({})",
                    "✓".green().bold(),
                    saved.title,
                    saved.id
                );
            }
            Ok(())
        }

        SimulationsAction::Delete { id } => {
            client.delete_simulation(&id).await?;
            if json_output {
                println!("{}", serde_json::json!({ "deleted": true, "id": id }));
            } else {
                println!("{} Deleted simulation {}", "✓".green().bold(), id);
            }
            Ok(())
        }
    }
}

async fn fetch(client: &ApiClient, id: &str) -> Result<SavedSimulation> {
    client
        .find_simulation(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Simulation {} not found", id))
}
