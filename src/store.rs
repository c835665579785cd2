//! In-memory store of the subtasks shown on one board.
//!
//! The store is a snapshot: it is filled once from a task source and afterwards
//! only changes through [`crate::reassign::reassign`], which produces a new store
//! rather than editing this one.

use std::collections::HashSet;

use tracing::warn;

use crate::task::Task;

/// Ordered subtasks keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    revision: u64,
}

impl TaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents wholesale.
    ///
    /// A source that supplies no sequence leaves the store empty. Identifiers
    /// must be unique, so a repeated identifier keeps its first occurrence.
    pub fn initialize(&mut self, tasks: Option<Vec<Task>>) {
        let mut seen = HashSet::new();
        let tasks: Vec<Task> = tasks
            .unwrap_or_default()
            .into_iter()
            .filter(|t| {
                let fresh = seen.insert(t.id.clone());
                if !fresh {
                    warn!(task_id = %t.id, "dropping duplicate task id");
                }
                fresh
            })
            .collect();

        self.tasks = tasks;
        self.revision += 1;
    }

    /// Current contents in order.
    pub fn read(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by identifier.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Position of a task by identifier.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Counter bumped on every content change. Used as a memoization key.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// New store with the task at `index` replaced.
    pub(crate) fn replaced(&self, index: usize, task: Task) -> TaskStore {
        let mut tasks = self.tasks.clone();
        tasks[index] = task;
        TaskStore {
            tasks,
            revision: self.revision + 1,
        }
    }
}

impl PartialEq for TaskStore {
    fn eq(&self, other: &Self) -> bool {
        self.tasks == other.tasks
    }
}

impl Eq for TaskStore {}
