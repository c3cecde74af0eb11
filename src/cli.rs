//! CLI argument parsing for the weekplan-worker binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "weekplan-worker", about = "Weekly recurring-job scheduling worker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the NATS worker (default if no subcommand given)
    Serve,
    /// Schedule one week and print the result as JSON
    Schedule {
        /// Monday of the week to schedule (YYYY-MM-DD)
        #[arg(long)]
        week_start: NaiveDate,
        /// Read jobs from a JSON file instead of the database
        #[arg(long)]
        jobs_file: Option<PathBuf>,
    },
}
