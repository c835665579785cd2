//! Command implementations for the CLI interface.
//!
//! Every command that shows a board goes through the same `BoardController`
//! the interactive UI uses; the non-interactive commands simply run its fetch
//! requests inline before printing.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Subcommand;
use clap_complete::{generate, Shell};
use serde::Serialize;
use tracing::info;

use crate::controller::BoardController;
use crate::db::{format_assignees, format_deadline_relative, truncate, Database};
use crate::fields::Status;
use crate::partition::Lanes;
use crate::reassign::StatusChange;
use crate::source::TaskSource;
use crate::task::{ParentTask, Task};
use crate::tui::run::run_board_tui;
use crate::tui::theme::Theme;

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive board for a task.
    Ui {
        /// Identifier of the parent task.
        task_id: String,
        /// JSON file overriding lane colors and titles.
        #[arg(long)]
        theme: Option<std::path::PathBuf>,
    },

    /// Print a task's subtasks grouped by status.
    Lanes {
        /// Identifier of the parent task.
        task_id: String,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show a task's own fields.
    Show {
        /// Identifier of the task.
        task_id: String,
    },

    /// Preview moving a subtask to another status. Nothing is written back.
    Move {
        /// Identifier of the parent task.
        task_id: String,
        /// Identifier of the subtask to move.
        subtask_id: String,
        /// Target status: todo | in-progress | completed | backlog.
        #[arg(value_enum)]
        status: Status,
    },

    /// Write a demo task file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Mount a board for `task_id` and run its fetches inline.
pub fn load_board(source: &dyn TaskSource, task_id: &str) -> BoardController {
    let mut board = BoardController::new();
    for request in board.mount(task_id) {
        board.apply(request.run(source));
    }
    board
}

/// Parent and lanes of a loaded board, or the error that stopped it.
fn ready_board(board: &mut BoardController) -> Result<(ParentTask, Lanes)> {
    if let Some(msg) = board.parent_state().error() {
        bail!("{msg}");
    }
    if let Some(msg) = board.board_state().error() {
        bail!("{msg}");
    }
    let parent = board
        .parent_state()
        .ready()
        .cloned()
        .context("task did not finish loading")?;
    let lanes = board.lanes().cloned().context("subtasks did not finish loading")?;
    Ok((parent, lanes))
}

/// Launch the terminal user interface.
pub fn cmd_ui(db: Database, task_id: &str, theme: Option<&Path>) -> Result<()> {
    let theme = match theme {
        Some(path) => Theme::load(path)?,
        None => Theme::default(),
    };
    let changes = run_board_tui(Arc::new(db), task_id, theme).context("board UI failed")?;
    if !changes.is_empty() {
        println!("{} move(s) made this session were not saved:", changes.len());
        print_changes(&changes);
    }
    Ok(())
}

/// Print the lanes of a task.
pub fn cmd_lanes(db: &Database, task_id: &str, json: bool) -> Result<()> {
    let mut board = load_board(db, task_id);
    let (parent, lanes) = ready_board(&mut board)?;
    if json {
        println!("{}", lanes_json(&parent, &lanes)?);
    } else {
        print_parent(&parent);
        println!();
        print_lanes(&lanes);
    }
    Ok(())
}

/// Print a single task's fields.
pub fn cmd_show(db: &Database, task_id: &str) -> Result<()> {
    let mut board = load_board(db, task_id);
    let (parent, lanes) = ready_board(&mut board)?;
    print_parent(&parent);
    let counts: Vec<String> = lanes
        .iter()
        .map(|(status, tasks)| format!("{}: {}", status.label(), tasks.len()))
        .collect();
    println!("Subtasks:    {}", counts.join(", "));
    Ok(())
}

/// Apply a move in memory and print the resulting lanes.
pub fn cmd_move(db: &Database, task_id: &str, subtask_id: &str, status: Status) -> Result<()> {
    let mut board = load_board(db, task_id);
    ready_board(&mut board)?;
    if board.store().get(subtask_id).is_none() {
        bail!("task '{subtask_id}' is not a subtask of '{task_id}'");
    }
    match board.move_task(subtask_id, status) {
        Some(change) => {
            info!(task_id = %change.task_id, to = %change.to, "previewing move");
            print_changes(std::slice::from_ref(&change));
        }
        None => println!("#{subtask_id} is already {}", status.label()),
    }
    let (_, lanes) = ready_board(&mut board)?;
    println!();
    print_lanes(&lanes);
    println!();
    println!("(preview only, nothing was saved)");
    Ok(())
}

/// Write the demo task file.
pub fn cmd_init(db_path: &Path, force: bool) -> Result<()> {
    if db_path.exists() && !force {
        bail!("{} already exists; pass --force to overwrite", db_path.display());
    }
    Database::demo(Utc::now()).save(db_path)?;
    println!("Wrote demo board to {}", db_path.display());
    println!("Try: board ui launch");
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

#[derive(Serialize)]
struct LaneView<'a> {
    status: Status,
    label: &'static str,
    tasks: &'a [Task],
}

#[derive(Serialize)]
struct BoardView<'a> {
    parent: &'a ParentTask,
    lanes: Vec<LaneView<'a>>,
}

/// Render parent and lanes as pretty JSON.
pub fn lanes_json(parent: &ParentTask, lanes: &Lanes) -> Result<String> {
    let view = BoardView {
        parent,
        lanes: lanes
            .iter()
            .map(|(status, tasks)| LaneView { status, label: status.label(), tasks })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

fn print_parent(parent: &ParentTask) {
    println!("Task:        #{} {}", parent.id, parent.title);
    println!("Status:      {}", parent.status.label());
    println!("Description: {}", if parent.description.is_empty() { "-" } else { &parent.description });
}

/// Print lanes as tables, one per status.
pub fn print_lanes(lanes: &Lanes) {
    let now = Utc::now();
    for (status, tasks) in lanes.iter() {
        println!("== {} ({}) ==", status.label(), tasks.len());
        if tasks.is_empty() {
            println!("  (empty)");
            continue;
        }
        println!("  {:<14} {:<10} {:<24} {}", "ID", "Deadline", "Assignees", "Title");
        for t in tasks {
            println!(
                "  {:<14} {:<10} {:<24} {}",
                truncate(&t.id, 14),
                format_deadline_relative(t.deadline, now),
                truncate(&format_assignees(&t.assignees), 24),
                t.title
            );
        }
    }
}

fn print_changes(changes: &[StatusChange]) {
    for c in changes {
        println!("  #{}: {} -> {}", c.task_id, c.from.label(), c.to.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn demo() -> Database {
        Database::demo(Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap())
    }

    #[test]
    fn load_board_uses_requested_id() {
        let mut board = load_board(&demo(), "auth");
        let (parent, lanes) = ready_board(&mut board).unwrap();
        assert_eq!(parent.id, "auth");
        assert_eq!(lanes.get(Status::Todo).len(), 2);
    }

    #[test]
    fn missing_parent_is_an_error() {
        let mut board = load_board(&demo(), "nope");
        let err = ready_board(&mut board).unwrap_err();
        assert!(err.to_string().contains("task not found: nope"));
    }

    #[test]
    fn bad_subtask_status_only_fails_the_board() {
        let mut db = demo();
        db.tasks[2].status = "DONE".into();
        let mut board = load_board(&db, "launch");
        assert_eq!(board.parent_state().ready().map(|p| p.id.as_str()), Some("launch"));
        let msg = board.board_state().error().unwrap();
        assert!(msg.contains("unrecognized status 'DONE'"));
        assert!(board.lanes().is_none());
        assert!(ready_board(&mut board).is_err());
    }

    #[test]
    fn json_lists_lanes_in_display_order() {
        let mut board = load_board(&demo(), "launch");
        let (parent, lanes) = ready_board(&mut board).unwrap();
        let value: serde_json::Value = serde_json::from_str(&lanes_json(&parent, &lanes).unwrap()).unwrap();
        let order: Vec<&str> = value["lanes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["status"].as_str().unwrap())
            .collect();
        assert_eq!(order, vec!["TODO", "IN_PROGRESS", "COMPLETED", "BACKLOG"]);
        assert_eq!(value["parent"]["id"], "launch");
    }

    #[test]
    fn move_of_foreign_task_is_rejected() {
        assert!(cmd_move(&demo(), "launch", "auth-oauth", Status::Completed).is_err());
        assert!(cmd_move(&demo(), "launch", "docs", Status::Completed).is_ok());
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        cmd_init(&path, false).unwrap();
        assert!(cmd_init(&path, false).is_err());
        cmd_init(&path, true).unwrap();
        assert_eq!(Database::load(&path).unwrap().tasks.len(), 8);
    }
}
