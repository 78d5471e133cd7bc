pub mod commands;
pub mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pricebook_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "pricebook",
    about = "Pricebook price resolution CLI",
    long_about = "Resolve effective unit prices from GetProductPrices query results, price whole customer sheets, and inspect configuration.",
    after_help = "Examples:\n  pricebook resolve --input prices.json --trace\n  pricebook sheet --input sheet.json\n  pricebook doctor --json"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a pricebook.toml config file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Resolve one effective price from a GetProductPrices response file")]
    Resolve {
        #[arg(long, help = "JSON file holding the query response or its data object")]
        input: PathBuf,
        #[arg(long, help = "Include every evaluated precedence stage in the output")]
        trace: bool,
    },
    #[command(about = "Resolve prices for every item of a customer price sheet request")]
    Sheet {
        #[arg(long, help = "JSON file holding the price sheet request")]
        input: PathBuf,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config and run the resolver self-check scenarios")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = LoadOptions { config_path: cli.config, ..LoadOptions::default() };

    let startup_config = AppConfig::load(options.clone()).unwrap_or_default();
    logging::init(&startup_config.logging);

    let result = match cli.command {
        Command::Resolve { input, trace } => commands::resolve::run(&options, &input, trace),
        Command::Sheet { input } => commands::sheet::run(&options, &input),
        Command::Config => commands::CommandResult {
            exit_code: 0,
            output: commands::config::run(&options),
        },
        Command::Doctor { json } => commands::doctor::run(&options, json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
