use anyhow::Result;
use colored::Colorize;

use crate::cli::formatters;
use flowest::api::ApiClient;
use flowest::config::Config;

pub async fn dispatch_tickers_search(query: &str, json_output: bool) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("Search query cannot be empty");
    }

    let config = Config::load()?;
    let client = ApiClient::from_config(&config.api)?;
    let tickers = client.search_tickers(query).await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&tickers)?);
        return Ok(());
    }

    if tickers.is_empty() {
        println!("{} No tickers match '{}'", "ℹ".blue().bold(), query);
        return Ok(());
    }

    println!("{}", formatters::format_tickers_table(&tickers));
    Ok(())
}
