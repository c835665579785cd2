//! Grouping of board tasks into status lanes.
//!
//! [`partition`] is a stable partition: every task lands in the lane for its
//! current status and keeps its relative order from the input.

use std::rc::Rc;

use crate::fields::Status;
use crate::store::TaskStore;
use crate::task::Task;

/// Tasks grouped by status, one lane per [`Status`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lanes {
    lanes: [Vec<Task>; 4],
}

impl Lanes {
    /// Tasks in the lane for `status`.
    pub fn get(&self, status: Status) -> &[Task] {
        &self.lanes[status.index()]
    }

    /// Lanes in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Status, &[Task])> {
        Status::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    /// Total number of tasks across all lanes.
    pub fn len(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lane and position of a task.
    pub fn lane_of(&self, task_id: &str) -> Option<(Status, usize)> {
        self.iter().find_map(|(status, tasks)| {
            tasks.iter().position(|t| t.id == task_id).map(|pos| (status, pos))
        })
    }
}

/// Partition tasks into lanes by status, preserving input order within a lane.
pub fn partition(tasks: &[Task]) -> Lanes {
    let mut lanes = Lanes::default();
    for task in tasks {
        lanes.lanes[task.status.index()].push(task.clone());
    }
    lanes
}

/// Memoizes [`partition`] on the store revision so unchanged stores are not
/// regrouped on every frame.
#[derive(Debug, Default)]
pub struct Partitioner {
    cached: Option<(u64, Rc<Lanes>)>,
}

impl Partitioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lanes for the store, recomputed only when its revision moved.
    pub fn lanes(&mut self, store: &TaskStore) -> &Lanes {
        self.cached_for(store)
    }

    /// Same as [`Partitioner::lanes`], as a handle that outlives the borrow.
    pub fn shared(&mut self, store: &TaskStore) -> Rc<Lanes> {
        Rc::clone(self.cached_for(store))
    }

    fn cached_for(&mut self, store: &TaskStore) -> &Rc<Lanes> {
        let stale = !matches!(&self.cached, Some((rev, _)) if *rev == store.revision());
        if stale {
            self.cached = None;
        }
        let (_, lanes) = self
            .cached
            .get_or_insert_with(|| (store.revision(), Rc::new(partition(store.read()))));
        lanes
    }

    /// Drop the cached lanes.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
