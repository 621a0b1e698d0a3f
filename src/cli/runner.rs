use anyhow::Result;
use std::path::PathBuf;

use crate::cli::{Commands, ConfigCommands, SimulationsCommands, TickersCommands};
use crate::commands::{self as cmd, Command, ConfigAction, SimulateArgs, SimulationsAction};

/// Convert clap `Commands` into the internal `commands::Command`, parsing
/// amounts, holding specs and dates. Errors name the offending argument.
pub fn to_internal_command(c: &Commands) -> Result<Command> {
    match c {
        Commands::Simulate {
            holdings,
            file,
            contribution,
            goal,
            years,
            start,
            every,
            export,
        } => {
            let holdings = holdings
                .iter()
                .map(|h| cmd::parse_holding_spec(h))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Command::Simulate(SimulateArgs {
                holdings,
                file: file.as_ref().map(PathBuf::from),
                contribution: contribution
                    .as_deref()
                    .map(|v| cmd::parse_amount("contribution", v))
                    .transpose()?,
                goal: goal
                    .as_deref()
                    .map(|v| cmd::parse_amount("goal", v))
                    .transpose()?,
                years: *years,
                start: start.as_deref().map(cmd::parse_start_month).transpose()?,
                every: *every,
                export: export.as_ref().map(PathBuf::from),
            }))
        }

        Commands::Income { rows } => {
            let rows = rows
                .iter()
                .map(|r| cmd::parse_income_row(r))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Command::Income { rows })
        }

        Commands::Tickers { action } => match action {
            TickersCommands::Search { query } => Ok(Command::TickersSearch {
                query: query.clone(),
            }),
        },

        Commands::Simulations { action } => {
            let action = match action {
                SimulationsCommands::List { query } => SimulationsAction::List {
                    query: query.clone(),
                },
                SimulationsCommands::Show { id } => SimulationsAction::Show { id: id.clone() },
                SimulationsCommands::Run { id, start, every } => SimulationsAction::Run {
                    id: id.clone(),
                    start: start.as_deref().map(cmd::parse_start_month).transpose()?,
                    every: *every,
                },
                SimulationsCommands::Save { file, title, id } => SimulationsAction::Save {
                    file: PathBuf::from(file),
                    title: title.clone(),
                    id: id.clone(),
                },
                SimulationsCommands::Delete { id } => {
                    SimulationsAction::Delete { id: id.clone() }
                }
            };
            Ok(Command::Simulations { action })
        }

        Commands::Config { action } => Ok(Command::Config {
            action: match action {
                ConfigCommands::Show => ConfigAction::Show,
                ConfigCommands::Path => ConfigAction::Path,
            },
        }),
    }
}
