//! Moving a task to another status lane.

use serde::Serialize;
use tracing::debug;

use crate::fields::Status;
use crate::store::TaskStore;

/// A status change that was applied to the in-memory store.
///
/// Nothing in the board writes these back; they are collected so a
/// persistence layer could replay them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub task_id: String,
    pub from: Status,
    pub to: Status,
}

/// Result of a reassignment.
#[derive(Debug, Clone)]
pub struct Reassignment {
    pub store: TaskStore,
    /// `None` when the task was missing or already had the target status.
    pub change: Option<StatusChange>,
}

/// Set the status of `task_id` to `new_status`, returning a new store.
///
/// Every other field and every other task is left as is. An unknown
/// `task_id` is not an error: the input store comes back unchanged.
pub fn reassign(store: &TaskStore, task_id: &str, new_status: Status) -> Reassignment {
    let Some(index) = store.position(task_id) else {
        debug!(task_id, "reassign target not in store, ignoring");
        return Reassignment {
            store: store.clone(),
            change: None,
        };
    };

    let current = &store.read()[index];
    if current.status == new_status {
        return Reassignment {
            store: store.clone(),
            change: None,
        };
    }

    let change = StatusChange {
        task_id: task_id.to_string(),
        from: current.status,
        to: new_status,
    };
    debug!(task_id, from = %change.from, to = %change.to, "task reassigned");

    Reassignment {
        store: store.replaced(index, current.with_status(new_status)),
        change: Some(change),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::partition;
    use crate::task::fixtures::{any_status, any_tasks, task};
    use crate::task::Task;
    use proptest::prelude::*;
    use proptest::sample::Index;
    use rstest::rstest;

    fn sample() -> TaskStore {
        let mut store = TaskStore::new();
        store.initialize(Some(vec![
            task("a", Status::Todo),
            task("b", Status::Backlog),
            task("c", Status::Todo),
        ]));
        store
    }

    fn statuses(store: &TaskStore) -> Vec<(&str, Status)> {
        store.read().iter().map(|t| (t.id.as_str(), t.status)).collect()
    }

    #[test]
    fn moves_backlog_task_to_completed() {
        let store = sample();
        let result = reassign(&store, "b", Status::Completed);

        assert_eq!(
            statuses(&result.store),
            vec![("a", Status::Todo), ("b", Status::Completed), ("c", Status::Todo)]
        );
        assert_eq!(
            result.change,
            Some(StatusChange { task_id: "b".into(), from: Status::Backlog, to: Status::Completed })
        );

        let lanes = partition(result.store.read());
        assert_eq!(lanes.get(Status::Completed).len(), 1);
        assert_eq!(lanes.get(Status::Completed)[0].id, "b");
        assert!(lanes.get(Status::Backlog).is_empty());
    }

    #[test]
    fn leaves_input_store_untouched() {
        let store = sample();
        let before = store.clone();
        let _ = reassign(&store, "a", Status::InProgress);
        assert_eq!(store, before);
    }

    #[test]
    fn keeps_other_fields_of_moved_task() {
        let store = sample();
        let result = reassign(&store, "c", Status::InProgress);
        let original = store.get("c").unwrap();
        let moved = result.store.get("c").unwrap();
        assert_eq!(moved.title, original.title);
        assert_eq!(moved.deadline, original.deadline);
        assert_eq!(moved.assignees, original.assignees);
        assert_eq!(moved.with_status(original.status), *original);
    }

    #[rstest]
    #[case("a", Status::Completed)]
    #[case("b", Status::Todo)]
    #[case("c", Status::Backlog)]
    #[case("missing", Status::InProgress)]
    fn is_idempotent(#[case] id: &str, #[case] status: Status) {
        let store = sample();
        let once = reassign(&store, id, status).store;
        let twice = reassign(&once, id, status);
        assert_eq!(twice.store, once);
        assert!(twice.change.is_none());
    }

    #[test]
    fn missing_task_is_a_no_op() {
        let store = sample();
        let result = reassign(&store, "zzz", Status::Completed);
        assert_eq!(result.store, store);
        assert_eq!(result.store.revision(), store.revision());
        assert!(result.change.is_none());
    }

    #[test]
    fn real_change_bumps_revision() {
        let store = sample();
        let result = reassign(&store, "a", Status::Backlog);
        assert!(result.store.revision() > store.revision());
    }

    fn store_of(tasks: Vec<Task>) -> TaskStore {
        let mut store = TaskStore::new();
        store.initialize(Some(tasks));
        store
    }

    proptest! {
        #[test]
        fn only_the_target_task_changes(
            tasks in any_tasks(30).prop_filter("non-empty", |t| !t.is_empty()),
            pick in any::<Index>(),
            to in any_status(),
        ) {
            let store = store_of(tasks);
            let target = store.read()[pick.index(store.len())].clone();
            let result = reassign(&store, &target.id, to);

            prop_assert_eq!(result.store.len(), store.len());
            for (before, after) in store.read().iter().zip(result.store.read()) {
                if before.id == target.id {
                    let expected = before.with_status(to);
                    prop_assert_eq!(after, &expected);
                } else {
                    prop_assert_eq!(after, before);
                }
            }
            prop_assert_eq!(result.change.is_some(), target.status != to);

            let lanes = partition(result.store.read());
            prop_assert_eq!(lanes.lane_of(&target.id).map(|(s, _)| s), Some(to));
        }

        #[test]
        fn reassigning_twice_equals_once(
            tasks in any_tasks(30),
            id in "[a-z]{1,3}",
            to in any_status(),
        ) {
            let store = store_of(tasks);
            let once = reassign(&store, &id, to).store;
            let twice = reassign(&once, &id, to);
            prop_assert_eq!(&twice.store, &once);
            prop_assert!(twice.change.is_none());
        }

        #[test]
        fn absent_id_returns_equal_store(
            tasks in any_tasks(30),
            id in "[A-Z]{1,4}",
            to in any_status(),
        ) {
            let store = store_of(tasks);
            let result = reassign(&store, &id, to);
            prop_assert_eq!(&result.store, &store);
            prop_assert_eq!(result.store.revision(), store.revision());
            prop_assert!(result.change.is_none());
        }
    }
}
