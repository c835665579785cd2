use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::logging::LogLevel;

/// Task board CLI.
/// Tasks are read from ~/.taskboard/tasks.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "board", version, about = "Subtask board with status lanes")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log level for this crate. Falls back to RUST_LOG when unset.
    #[arg(long, global = true, value_enum, ignore_case = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}
