use crate::demo::{run_demo, run_estimate, DemoArgs, EstimateArgs};
use clap::{Parser, Subcommand};
use immo_valuation::config::AppConfig;
use immo_valuation::error::AppError;
use immo_valuation::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Immo Valuation",
    about = "Estimate residential property prices from comparable sales, listings and agency quotes",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Value the bundled Lyon apartment sample (default command)
    Demo(DemoArgs),
    /// Value a property described in a JSON request and/or CSV comparables
    Estimate(EstimateArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    tracing::debug!(environment = ?config.environment, "configuration loaded");

    match cli.command.unwrap_or(Command::Demo(DemoArgs::default())) {
        Command::Demo(args) => run_demo(&config, args),
        Command::Estimate(args) => run_estimate(&config, args),
    }
}
