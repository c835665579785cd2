//! The task source the board fetches from.

use crate::error::FetchError;
use crate::task::{ParentTask, TaskDetail};

/// Something that can look up a task and its subtasks by identifier.
///
/// Implementations must be shareable with the background fetch thread.
pub trait TaskSource: Send + Sync {
    fn get_task_by_id(&self, id: &str) -> Result<TaskDetail, FetchError>;

    /// The task's own fields only. A problem with one of its subtasks must not
    /// fail this lookup.
    fn get_parent_by_id(&self, id: &str) -> Result<ParentTask, FetchError> {
        self.get_task_by_id(id).map(|detail| detail.task)
    }
}
