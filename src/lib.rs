mod cli;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

pub use cli::{execute, OutputFormat, ShortlistArgs};

use error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
