//! Task data structures shown on the board.
//!
//! A board displays one [`ParentTask`] and partitions its subtasks, each a full
//! [`Task`], into status lanes. Sources hand both back together as a
//! [`TaskDetail`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::Status;

/// A person assigned to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub id: String,
    pub name: String,
}

/// Minimal record of a task's own subtasks; only the title is carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTaskSummary {
    pub title: String,
}

/// A subtask card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub status: Status,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
    #[serde(default)]
    pub sub_tasks: Option<Vec<SubTaskSummary>>,
}

impl Task {
    /// Copy of this task with a different status; every other field is kept.
    pub fn with_status(&self, status: Status) -> Task {
        Task {
            status,
            ..self.clone()
        }
    }

    /// Number of nested subtasks, treating an absent list as empty.
    pub fn sub_task_count(&self) -> usize {
        self.sub_tasks.as_ref().map_or(0, Vec::len)
    }
}

/// The task whose subtasks the board displays. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
}

/// What a task source returns for a single identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetail {
    pub task: ParentTask,
    /// `None` when the source supplies no subtask sequence at all.
    pub sub_tasks: Option<Vec<Task>>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::TimeZone;
    use proptest::prelude::*;

    use super::*;

    /// Any status, drawn from the taxonomy.
    pub fn any_status() -> impl Strategy<Value = Status> {
        prop::sample::select(Status::ALL.to_vec())
    }

    /// Up to `max` tasks with short lowercase ids (repeats possible) and any status.
    pub fn any_tasks(max: usize) -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec(("[a-z]{1,3}", any_status()), 0..max)
            .prop_map(|pairs| pairs.into_iter().map(|(id, status)| task(&id, status)).collect())
    }

    /// Build a bare task with the given id and status.
    pub fn task(id: &str, status: Status) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: String::new(),
            deadline: Utc.with_ymd_and_hms(2026, 11, 1, 9, 0, 0).unwrap(),
            status,
            assignees: Vec::new(),
            sub_tasks: None,
        }
    }

    pub fn parent(id: &str) -> ParentTask {
        ParentTask {
            id: id.to_string(),
            title: format!("Parent {id}"),
            description: "Parent description".to_string(),
            status: Status::InProgress,
        }
    }
}
