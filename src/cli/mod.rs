use clap::{Parser, Subcommand};

pub mod formatters;
pub mod runner;

#[derive(Parser)]
#[command(name = "flowest")]
#[command(version, about = "Dividend income planner and passive-income simulator")]
#[command(
    long_about = "Simulate how a portfolio of dividend payers grows with monthly contributions, find the month your passive income reaches a goal, and manage simulations saved on the Flowest backend."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project passive income from a set of holdings
    Simulate {
        /// Holding as TICKER:QUANTITY:PRICE[:YIELD] (repeatable). Without YIELD the
        /// dividend yield is looked up in the catalog
        #[arg(short = 'H', long = "holding")]
        holdings: Vec<String>,

        /// Load holdings and parameters from a JSON or TOML simulation file
        #[arg(short, long)]
        file: Option<String>,

        /// Monthly contribution (defaults to config, then 500)
        #[arg(short, long)]
        contribution: Option<String>,

        /// Monthly income goal (defaults to config, then 5000)
        #[arg(short, long)]
        goal: Option<String>,

        /// Horizon in years (defaults to config, then 10)
        #[arg(short, long, allow_hyphen_values = true)]
        years: Option<i32>,

        /// First simulated month (YYYY-MM or YYYY-MM-DD); defaults to the current month
        #[arg(long)]
        start: Option<String>,

        /// Show one table row every N months (the final month is always shown)
        #[arg(long, default_value = "12")]
        every: u32,

        /// Write every projected month to a CSV file
        #[arg(long)]
        export: Option<String>,
    },

    /// Estimate monthly/annual dividend income of invested amounts (no compounding)
    Income {
        /// Row as TICKER:VALUE:YIELD (repeatable)
        #[arg(short, long = "row", required = true)]
        rows: Vec<String>,
    },

    /// Ticker catalog lookup
    Tickers {
        #[command(subcommand)]
        action: TickersCommands,
    },

    /// Simulations saved on the Flowest backend
    Simulations {
        #[command(subcommand)]
        action: SimulationsCommands,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum TickersCommands {
    /// Search the catalog (e.g., "PETR", "MXRF")
    Search {
        /// Partial ticker or company name
        query: String,
    },
}

#[derive(Subcommand)]
pub enum SimulationsCommands {
    /// List saved simulations
    List {
        /// Filter by title
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show a saved simulation's inputs
    Show {
        /// Simulation id
        id: String,
    },

    /// Run the projection of a saved simulation
    Run {
        /// Simulation id
        id: String,

        /// First simulated month (YYYY-MM or YYYY-MM-DD); defaults to the current month
        #[arg(long)]
        start: Option<String>,

        /// Show one table row every N months
        #[arg(long, default_value = "12")]
        every: u32,
    },

    /// Save a simulation file to the backend (updates when --id is given)
    Save {
        /// JSON or TOML simulation file
        #[arg(short, long)]
        file: String,

        /// Title (overrides the file's title)
        #[arg(short, long)]
        title: Option<String>,

        /// Existing simulation id to overwrite
        #[arg(long)]
        id: Option<String>,
    },

    /// Delete a saved simulation
    Delete {
        /// Simulation id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration (token masked)
    Show,

    /// Print the config file location
    Path,
}
