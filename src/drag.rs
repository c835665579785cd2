//! Drag-and-drop interaction between task cards and status lanes.
//!
//! A [`DragSession`] is either idle or carrying a copy of one task. Lanes ask
//! it whether the pointer is over them for highlighting only; the store is
//! touched solely through the [`DropEvent`] handed out on a drop.

use tracing::{debug, trace};

use crate::error::DragError;
use crate::fields::Status;
use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        task: Task,
        hover: Option<Status>,
    },
}

/// A task dropped onto a lane, ready to be reassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    pub task: Task,
    pub target: Status,
}

/// Single-pointer drag state.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up a task. Only one drag can be active at a time.
    pub fn start(&mut self, task: Task) -> Result<(), DragError> {
        if let DragState::Dragging { task: current, .. } = &self.state {
            return Err(DragError::AlreadyDragging(current.id.clone()));
        }
        debug!(task_id = %task.id, "drag started");
        let hover = Some(task.status);
        self.state = DragState::Dragging { task, hover };
        Ok(())
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The task being carried, if any.
    pub fn task(&self) -> Option<&Task> {
        match &self.state {
            DragState::Dragging { task, .. } => Some(task),
            DragState::Idle => None,
        }
    }

    /// Lane currently under the pointer.
    pub fn hovered(&self) -> Option<Status> {
        match &self.state {
            DragState::Dragging { hover, .. } => *hover,
            DragState::Idle => None,
        }
    }

    /// Record which lane, if any, the pointer is over. Ignored when idle.
    pub fn hover(&mut self, lane: Option<Status>) {
        if let DragState::Dragging { hover, .. } = &mut self.state {
            if *hover != lane {
                trace!(?lane, "drag hover");
            }
            *hover = lane;
        }
    }

    /// Whether a drag is in progress and hovering over `lane`.
    pub fn is_over(&self, lane: Status) -> bool {
        self.hovered() == Some(lane)
    }

    /// Drop on `target`. Returns the event to apply, and always ends the drag.
    pub fn drop_on(&mut self, target: Status) -> Option<DropEvent> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { task, .. } => {
                debug!(task_id = %task.id, %target, "drag dropped");
                Some(DropEvent { task, target })
            }
            DragState::Idle => None,
        }
    }

    /// Drop on whatever lane is hovered; with no lane hovered this cancels.
    pub fn drop_on_hovered(&mut self) -> Option<DropEvent> {
        match self.hovered() {
            Some(target) => self.drop_on(target),
            None => {
                self.cancel();
                None
            }
        }
    }

    /// Abandon the drag without any effect on the store.
    pub fn cancel(&mut self) {
        if let DragState::Dragging { task, .. } = std::mem::take(&mut self.state) {
            debug!(task_id = %task.id, "drag cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::fixtures::task;

    #[test]
    fn idle_by_default() {
        let session = DragSession::new();
        assert!(!session.is_dragging());
        assert!(session.task().is_none());
        assert!(!session.is_over(Status::Todo));
    }

    #[test]
    fn start_carries_task_and_hovers_origin_lane() {
        let mut session = DragSession::new();
        session.start(task("a", Status::Backlog)).unwrap();
        assert!(session.is_dragging());
        assert_eq!(session.task().map(|t| t.id.as_str()), Some("a"));
        assert!(session.is_over(Status::Backlog));
    }

    #[test]
    fn second_start_is_rejected() {
        let mut session = DragSession::new();
        session.start(task("a", Status::Todo)).unwrap();
        let err = session.start(task("b", Status::Todo)).unwrap_err();
        assert_eq!(err, DragError::AlreadyDragging("a".into()));
        assert_eq!(session.task().map(|t| t.id.as_str()), Some("a"));
    }

    #[test]
    fn hover_only_changes_highlight() {
        let mut session = DragSession::new();
        session.start(task("a", Status::Todo)).unwrap();
        session.hover(Some(Status::Completed));
        assert!(session.is_over(Status::Completed));
        assert!(!session.is_over(Status::Todo));
        session.hover(None);
        assert!(session.hovered().is_none());
        assert_eq!(session.task().map(|t| t.status), Some(Status::Todo));
    }

    #[test]
    fn hover_while_idle_is_ignored() {
        let mut session = DragSession::new();
        session.hover(Some(Status::Todo));
        assert!(!session.is_over(Status::Todo));
    }

    #[test]
    fn drop_hands_over_task_and_returns_to_idle() {
        let mut session = DragSession::new();
        session.start(task("a", Status::Todo)).unwrap();
        let event = session.drop_on(Status::InProgress).unwrap();
        assert_eq!(event.task.id, "a");
        assert_eq!(event.target, Status::InProgress);
        assert!(!session.is_dragging());
        assert!(session.drop_on(Status::Todo).is_none());
    }

    #[test]
    fn drop_outside_any_lane_cancels() {
        let mut session = DragSession::new();
        session.start(task("a", Status::Todo)).unwrap();
        session.hover(None);
        assert!(session.drop_on_hovered().is_none());
        assert!(!session.is_dragging());
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut session = DragSession::new();
        session.start(task("a", Status::Todo)).unwrap();
        session.cancel();
        assert!(!session.is_dragging());
        session.start(task("b", Status::Todo)).unwrap();
    }
}
