//! JSON file task source and display helpers.
//!
//! This module provides the `Database` struct, a flat list of task records
//! loaded from a JSON file. Records point at their parent by identifier; the
//! subtasks of a task are the records naming it as parent, in file order.
//! Statuses are kept as raw strings and validated when a task is fetched.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DbError, FetchError};
use crate::fields::Status;
use crate::source::TaskSource;
use crate::task::{Assignee, ParentTask, SubTaskSummary, Task, TaskDetail};

/// A task as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
    #[serde(default)]
    pub parent: Option<String>,
}

impl TaskRecord {
    fn status(&self) -> Result<Status, FetchError> {
        self.status.parse().map_err(|_| FetchError::UnrecognizedStatus {
            task_id: self.id.clone(),
            status: self.status.clone(),
        })
    }
}

/// File-backed task records.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Database {
    pub tasks: Vec<TaskRecord>,
}

impl Database {
    /// Load from a JSON file. A missing file is an empty database.
    pub fn load(path: &Path) -> Result<Self, DbError> {
        if !path.exists() {
            debug!(path = %path.display(), "database file missing, starting empty");
            return Ok(Database::default());
        }
        let buf = fs::read_to_string(path).map_err(|source| DbError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let db: Database = serde_json::from_str(&buf).map_err(|source| DbError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), records = db.tasks.len(), "database loaded");
        Ok(db)
    }

    /// Save to a JSON file using atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<(), DbError> {
        let write_err = |source| DbError::Write {
            path: path.to_path_buf(),
            source,
        };
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(self)?;
        let mut f = File::create(&tmp).map_err(write_err)?;
        f.write_all(data.as_bytes()).map_err(write_err)?;
        f.flush().map_err(write_err)?;
        fs::rename(&tmp, path).map_err(write_err)?;
        Ok(())
    }

    /// Get a record by identifier.
    pub fn get(&self, id: &str) -> Option<&TaskRecord> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Map each parent identifier to its children's record indices, in file order.
    pub fn children_map(&self) -> BTreeMap<&str, Vec<usize>> {
        let mut map: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (i, t) in self.tasks.iter().enumerate() {
            if let Some(p) = t.parent.as_deref() {
                map.entry(p).or_default().push(i);
            }
        }
        map
    }

    /// Small board used by `board init`.
    pub fn demo(now: DateTime<Utc>) -> Self {
        let ada = Assignee { id: "u-ada".into(), name: "Ada Lovelace".into() };
        let grace = Assignee { id: "u-grace".into(), name: "Grace Hopper".into() };
        let record = |id: &str, title: &str, days: i64, status: Status, assignees: Vec<Assignee>, parent: Option<&str>| TaskRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{title}."),
            deadline: now + Duration::days(days),
            status: status.as_str().to_string(),
            assignees,
            parent: parent.map(str::to_string),
        };

        Database {
            tasks: vec![
                record("launch", "Launch public beta", 30, Status::InProgress, vec![ada.clone()], None),
                record("auth", "Implement sign-in flow", 7, Status::InProgress, vec![ada.clone()], Some("launch")),
                record("docs", "Write onboarding guide", 14, Status::Todo, vec![grace.clone()], Some("launch")),
                record("ci", "Set up release pipeline", -2, Status::Completed, vec![grace.clone(), ada.clone()], Some("launch")),
                record("billing", "Billing integration", 45, Status::Backlog, Vec::new(), Some("launch")),
                record("metrics", "Usage dashboard", 60, Status::Backlog, vec![grace], Some("launch")),
                record("auth-oauth", "OAuth providers", 5, Status::Todo, vec![ada.clone()], Some("auth")),
                record("auth-reset", "Password reset emails", 6, Status::Todo, vec![ada], Some("auth")),
            ],
        }
    }

    fn to_task(&self, record: &TaskRecord, children: &BTreeMap<&str, Vec<usize>>) -> Result<Task, FetchError> {
        let sub_tasks = children.get(record.id.as_str()).map(|idx| {
            idx.iter()
                .map(|&i| SubTaskSummary { title: self.tasks[i].title.clone() })
                .collect()
        });
        Ok(Task {
            id: record.id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            deadline: record.deadline,
            status: record.status()?,
            assignees: record.assignees.clone(),
            sub_tasks,
        })
    }
}

impl TaskSource for Database {
    fn get_parent_by_id(&self, id: &str) -> Result<ParentTask, FetchError> {
        let record = self.get(id).ok_or_else(|| FetchError::NotFound(id.to_string()))?;
        Ok(ParentTask {
            id: record.id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            status: record.status()?,
        })
    }

    fn get_task_by_id(&self, id: &str) -> Result<TaskDetail, FetchError> {
        let task = self.get_parent_by_id(id)?;

        let children = self.children_map();
        let sub_tasks = children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&i| self.to_task(&self.tasks[i], &children))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TaskDetail {
            task,
            sub_tasks: Some(sub_tasks),
        })
    }
}

/// Format a deadline relative to now ("today", "tomorrow", "in 3d", "2d late").
pub fn format_deadline_relative(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = deadline.date_naive().signed_duration_since(now.date_naive()).num_days();
    if days == 0 {
        "today".into()
    } else if days == 1 {
        "tomorrow".into()
    } else if days > 1 {
        format!("in {days}d")
    } else {
        format!("{}d late", -days)
    }
}

/// Join assignee names for display, "-" when nobody is assigned.
pub fn format_assignees(assignees: &[Assignee]) -> String {
    if assignees.is_empty() {
        "-".into()
    } else {
        assignees.iter().map(|a| a.name.as_str()).collect::<Vec<_>>().join(", ")
    }
}

/// Shorten `s` to at most `width` characters, ending in `…` when cut.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    match width.checked_sub(1) {
        Some(keep) => s.chars().take(keep).chain(std::iter::once('…')).collect(),
        None => String::new(),
    }
}
