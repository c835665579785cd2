//! # Board - subtask status board
//!
//! A terminal board for one parent task: its subtasks are grouped into four
//! status lanes (To Do, In Progress, Completed and a full-width Backlog) and can
//! be dragged between lanes with the mouse or moved with the keyboard.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a demo task file to ~/.taskboard/tasks.json
//! board init
//!
//! # Open the interactive board for a task
//! board ui launch
//!
//! # Print the lanes without the UI
//! board lanes launch
//! ```
//!
//! Moves are applied to the board in memory only. Leaving the board lists the
//! moves that were made so they can be carried over by hand.
//!
//! Tasks are read from `~/.taskboard/tasks.json` unless `--db` points elsewhere.
//! The interactive board logs to `board.log` next to that file.

use std::path::{Path, PathBuf};

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod controller;
pub mod db;
pub mod drag;
pub mod error;
pub mod fields;
pub mod logging;
pub mod partition;
pub mod reassign;
pub mod source;
pub mod store;
pub mod task;
pub mod tui {
    pub mod board;
    pub mod run;
    pub mod theme;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use db::Database;
use logging::LogTarget;

fn main() {
    let cli = Cli::parse();

    // Determine data directory and task file
    let (data_dir, db_path) = match cli.db.as_ref() {
        Some(db_path) => (
            db_path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
            db_path.clone(),
        ),
        None => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            let data_dir = PathBuf::from(home).join(".taskboard");
            if let Err(e) = std::fs::create_dir_all(&data_dir) {
                eprintln!("Failed to create data directory {}: {}", data_dir.display(), e);
                std::process::exit(1);
            }
            let db_path = data_dir.join("tasks.json");
            (data_dir, db_path)
        }
    };

    let log_file = data_dir.join("board.log");
    let target = match cli.command {
        Commands::Ui { .. } => LogTarget::File(&log_file),
        _ => LogTarget::Stderr,
    };
    if let Err(e) = logging::init(cli.log_level, target) {
        eprintln!("Failed to initialise logging: {e:#}");
    }

    if let Err(e) = run(cli.command, &db_path) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Commands, db_path: &Path) -> anyhow::Result<()> {
    match command {
        Commands::Init { force } => cmd_init(db_path, force),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
        Commands::Ui { task_id, theme } => cmd_ui(Database::load(db_path)?, &task_id, theme.as_deref()),
        Commands::Lanes { task_id, json } => cmd_lanes(&Database::load(db_path)?, &task_id, json),
        Commands::Show { task_id } => cmd_show(&Database::load(db_path)?, &task_id),
        Commands::Move { task_id, subtask_id, status } => {
            cmd_move(&Database::load(db_path)?, &task_id, &subtask_id, status)
        }
    }
}
