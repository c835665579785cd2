//! Board controller: fetch results in, lanes and reassignments out.
//!
//! The controller performs no I/O. Mounting or navigating hands back the
//! [`FetchRequest`]s to run; whoever runs them feeds the [`FetchResponse`]s
//! back through [`BoardController::apply`]. Every request carries the
//! generation it was issued under, and responses from an older generation are
//! dropped so a slow fetch for a previous task can never overwrite the current
//! board.

use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::drag::{DragSession, DropEvent};
use crate::error::{DragError, FetchError};
use crate::fields::Status;
use crate::partition::{Lanes, Partitioner};
use crate::reassign::{reassign, StatusChange};
use crate::source::TaskSource;
use crate::store::TaskStore;
use crate::task::{ParentTask, Task, TaskDetail};

/// Which half of the board a fetch populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Display fields of the parent task.
    Parent,
    /// The subtasks that fill the task store.
    SubTasks,
}

/// Identifies the mount a request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken {
    generation: u64,
}

/// A fetch the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: FetchToken,
    pub kind: FetchKind,
    pub task_id: String,
}

impl FetchRequest {
    /// Perform the lookup against `source`. The parent fetch reads only the
    /// parent's own fields so a bad subtask cannot fail it.
    pub fn run(self, source: &dyn TaskSource) -> FetchResponse {
        let result = match self.kind {
            FetchKind::Parent => source
                .get_parent_by_id(&self.task_id)
                .map(|task| TaskDetail { task, sub_tasks: None }),
            FetchKind::SubTasks => source.get_task_by_id(&self.task_id),
        };
        self.respond(result)
    }

    /// Pair this request with its outcome.
    pub fn respond(self, result: Result<TaskDetail, FetchError>) -> FetchResponse {
        FetchResponse {
            token: self.token,
            kind: self.kind,
            result,
        }
    }
}

/// Outcome of a [`FetchRequest`].
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub token: FetchToken,
    pub kind: FetchKind,
    pub result: Result<TaskDetail, FetchError>,
}

/// Loading state for one half of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Request to show another task's own board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub task_id: String,
}

/// Orchestrates one board view for a routed parent task.
#[derive(Debug, Default)]
pub struct BoardController {
    task_id: Option<String>,
    generation: u64,
    parent: LoadState<ParentTask>,
    board: LoadState<()>,
    store: TaskStore,
    partitioner: Partitioner,
    drag: DragSession,
    changes: Vec<StatusChange>,
    history: Vec<String>,
}

impl BoardController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the board for `task_id` and return the fetches to run.
    pub fn mount(&mut self, task_id: &str) -> Vec<FetchRequest> {
        self.generation += 1;
        self.task_id = Some(task_id.to_string());
        self.parent = LoadState::Loading;
        self.board = LoadState::Loading;
        self.store = TaskStore::new();
        self.partitioner.invalidate();
        self.drag.cancel();
        info!(task_id, generation = self.generation, "board mounted");

        let token = FetchToken { generation: self.generation };
        [FetchKind::Parent, FetchKind::SubTasks]
            .into_iter()
            .map(|kind| FetchRequest {
                token,
                kind,
                task_id: task_id.to_string(),
            })
            .collect()
    }

    /// The routed identifier changed: remember where we were and remount.
    pub fn navigate(&mut self, task_id: &str) -> Vec<FetchRequest> {
        if let Some(current) = self.task_id.take() {
            if current != task_id {
                self.history.push(current);
            }
        }
        self.mount(task_id)
    }

    /// Return to the previously shown task, if any.
    pub fn back(&mut self) -> Option<Vec<FetchRequest>> {
        let previous = self.history.pop()?;
        Some(self.mount(&previous))
    }

    /// Tear the view down. In-flight responses become stale.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.task_id = None;
        self.drag.cancel();
        debug!(generation = self.generation, "board unmounted");
    }

    /// Whether `token` belongs to the current mount.
    pub fn is_current(&self, token: FetchToken) -> bool {
        self.task_id.is_some() && token.generation == self.generation
    }

    /// Apply a fetch outcome. Returns `false` when it was stale and dropped.
    pub fn apply(&mut self, response: FetchResponse) -> bool {
        if !self.is_current(response.token) {
            debug!(
                kind = ?response.kind,
                stale = response.token.generation,
                current = self.generation,
                "dropping stale fetch response"
            );
            return false;
        }

        match (response.kind, response.result) {
            (FetchKind::Parent, Ok(detail)) => {
                self.parent = LoadState::Ready(detail.task);
            }
            (FetchKind::Parent, Err(e)) => {
                warn!(error = %e, "parent task fetch failed");
                self.parent = LoadState::Failed(format!("Could not load task: {e}"));
            }
            (FetchKind::SubTasks, Ok(detail)) => {
                let count = detail.sub_tasks.as_ref().map_or(0, Vec::len);
                self.store.initialize(detail.sub_tasks);
                self.board = LoadState::Ready(());
                debug!(count, "task store populated");
            }
            (FetchKind::SubTasks, Err(e)) => {
                warn!(error = %e, "subtask fetch failed");
                self.board = LoadState::Failed(format!("Could not load subtasks: {e}"));
            }
        }
        true
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn parent_state(&self) -> &LoadState<ParentTask> {
        &self.parent
    }

    pub fn board_state(&self) -> &LoadState<()> {
        &self.board
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Lanes to render. `None` while the board is not showable: the parent
    /// failed, or the subtasks are still loading or failed.
    pub fn lanes(&mut self) -> Option<&Lanes> {
        if self.parent.error().is_some() || self.board.ready().is_none() {
            return None;
        }
        Some(self.partitioner.lanes(&self.store))
    }

    /// [`BoardController::lanes`] as a shared handle, for callers that need
    /// the lanes while mutating other state.
    pub fn shared_lanes(&mut self) -> Option<Rc<Lanes>> {
        if self.parent.error().is_some() || self.board.ready().is_none() {
            return None;
        }
        Some(self.partitioner.shared(&self.store))
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// Pick up a task from the store.
    pub fn begin_drag(&mut self, task_id: &str) -> Result<(), DragError> {
        let task = self
            .store
            .get(task_id)
            .cloned()
            .ok_or_else(|| DragError::UnknownTask(task_id.to_string()))?;
        self.drag.start(task)
    }

    pub fn hover(&mut self, lane: Option<Status>) {
        self.drag.hover(lane);
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Drop the dragged task on `target` and apply the reassignment.
    pub fn drop_on(&mut self, target: Status) -> Option<StatusChange> {
        let event = self.drag.drop_on(target)?;
        self.apply_drop(event)
    }

    /// Drop on the hovered lane, or cancel when no lane is hovered.
    pub fn drop_on_hovered(&mut self) -> Option<StatusChange> {
        let event = self.drag.drop_on_hovered()?;
        self.apply_drop(event)
    }

    fn apply_drop(&mut self, event: DropEvent) -> Option<StatusChange> {
        let result = reassign(&self.store, &event.task.id, event.target);
        self.store = result.store;
        if let Some(change) = &result.change {
            info!(task_id = %change.task_id, from = %change.from, to = %change.to, "task moved");
            self.changes.push(change.clone());
        }
        result.change
    }

    /// Reassign directly, without a drag.
    pub fn move_task(&mut self, task_id: &str, target: Status) -> Option<StatusChange> {
        let task = self.store.get(task_id)?.clone();
        self.apply_drop(DropEvent { task, target })
    }

    /// Drain the status changes recorded since the last call.
    pub fn take_changes(&mut self) -> Vec<StatusChange> {
        std::mem::take(&mut self.changes)
    }

    /// A card was clicked: ask to show that task's own board.
    pub fn open_task(&self, task_id: &str) -> Option<NavigationRequest> {
        self.store.get(task_id).map(|t: &Task| NavigationRequest { task_id: t.id.clone() })
    }
}
