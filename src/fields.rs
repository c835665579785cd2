//! Status taxonomy for board tasks.
//!
//! This module defines the closed set of states a subtask can be in, the order
//! the board lays them out in, and how raw status strings from a task source are
//! turned into typed values.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::UnknownStatus;

/// Task status. Every task sits in exactly one of these lanes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Todo,
    InProgress,
    Completed,
    Backlog,
}

impl Status {
    /// All statuses in board display order.
    pub const ALL: [Status; 4] = [Status::Todo, Status::InProgress, Status::Completed, Status::Backlog];

    /// Position of this status in [`Status::ALL`].
    pub fn index(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Completed => 2,
            Status::Backlog => 3,
        }
    }

    /// Human readable lane label.
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::Backlog => "Backlog",
        }
    }

    /// Wire spelling used by task sources.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "TODO",
            Status::InProgress => "IN_PROGRESS",
            Status::Completed => "COMPLETED",
            Status::Backlog => "BACKLOG",
        }
    }

    /// The backlog lane spans the full board width below the other three.
    pub fn is_full_width(self) -> bool {
        self == Status::Backlog
    }

    /// Lane to the left in display order, if any. Backlog sits on its own row
    /// so it wraps back to the last of the top-row lanes.
    pub fn prev(self) -> Option<Status> {
        match self {
            Status::Todo => None,
            Status::InProgress => Some(Status::Todo),
            Status::Completed => Some(Status::InProgress),
            Status::Backlog => Some(Status::Completed),
        }
    }

    /// Lane to the right in display order, if any.
    pub fn next(self) -> Option<Status> {
        match self {
            Status::Todo => Some(Status::InProgress),
            Status::InProgress => Some(Status::Completed),
            Status::Completed => Some(Status::Backlog),
            Status::Backlog => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownStatus;

    /// Parse a status string. Accepts the wire spelling in any case, with `-` or
    /// spaces in place of `_`. Anything else is rejected rather than coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_uppercase().replace(['-', ' '], "_");
        match normalised.as_str() {
            "TODO" => Ok(Status::Todo),
            "IN_PROGRESS" => Ok(Status::InProgress),
            "COMPLETED" => Ok(Status::Completed),
            "BACKLOG" => Ok(Status::Backlog),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("TODO", Status::Todo)]
    #[case("in_progress", Status::InProgress)]
    #[case("In-Progress", Status::InProgress)]
    #[case(" completed ", Status::Completed)]
    #[case("backlog", Status::Backlog)]
    fn parses_known_statuses(#[case] raw: &str, #[case] expected: Status) {
        assert_eq!(raw.parse::<Status>(), Ok(expected));
    }

    #[rstest]
    #[case("DONE")]
    #[case("")]
    #[case("TODO!")]
    fn rejects_unknown_statuses(#[case] raw: &str) {
        assert_eq!(raw.parse::<Status>(), Err(UnknownStatus(raw.to_string())));
    }

    #[test]
    fn display_order_matches_index() {
        for (i, status) in Status::ALL.iter().enumerate() {
            assert_eq!(status.index(), i);
        }
    }

    #[test]
    fn serde_uses_wire_spelling() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let back: Status = serde_json::from_str("\"BACKLOG\"").unwrap();
        assert_eq!(back, Status::Backlog);
    }

    #[test]
    fn only_backlog_is_full_width() {
        let wide: Vec<Status> = Status::ALL.into_iter().filter(|s| s.is_full_width()).collect();
        assert_eq!(wide, vec![Status::Backlog]);
    }

    #[test]
    fn prev_and_next_walk_display_order() {
        assert_eq!(Status::Todo.prev(), None);
        assert_eq!(Status::Backlog.next(), None);
        for status in Status::ALL {
            if let Some(next) = status.next() {
                assert_eq!(next.prev(), Some(status));
            }
        }
    }
}
