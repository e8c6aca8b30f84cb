mod cli;
mod demo;
mod infra;
mod report;

use immo_valuation::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
