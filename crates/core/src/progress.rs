//! Derived, read-time fields for projects and tasks.
//!
//! None of these values are stored. Callers load the current child rows (or
//! their counts) and compute the values on every read.

use serde::Serialize;

use crate::status::TaskStatus;
use crate::types::Timestamp;

/// Task tallies for a single project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TaskCounts {
    pub total: i64,
    pub completed: i64,
}

impl TaskCounts {
    /// Tally a set of task statuses.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = TaskStatus>,
    {
        statuses.into_iter().fold(Self::default(), |mut acc, s| {
            acc.total += 1;
            if s == TaskStatus::Done {
                acc.completed += 1;
            }
            acc
        })
    }

    /// Percentage of completed tasks in `0.0..=100.0`; `0.0` for an empty project.
    pub fn completion_rate(&self) -> f64 {
        completion_rate(self.completed, self.total)
    }
}

/// `100 * completed / total`, or `0.0` when `total` is zero.
pub fn completion_rate(completed: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (completed as f64 / total as f64) * 100.0
}

/// A task is overdue when it has a due date strictly before `now` and is not done.
pub fn is_overdue(due_date: Option<Timestamp>, status: TaskStatus, now: Timestamp) -> bool {
    match due_date {
        Some(due) => due < now && status != TaskStatus::Done,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_project_has_zero_rate() {
        let counts = TaskCounts::default();
        assert_eq!(counts.completion_rate(), 0.0);
    }

    #[test]
    fn half_done_is_fifty_percent() {
        let counts = TaskCounts::from_statuses([TaskStatus::Todo, TaskStatus::Done]);
        assert_eq!(counts, TaskCounts { total: 2, completed: 1 });
        assert_eq!(counts.completion_rate(), 50.0);
    }

    #[test]
    fn rate_is_not_rounded() {
        let rate = completion_rate(1, 3);
        assert!((rate - 33.333_333).abs() < 1e-4);
    }

    #[test]
    fn completed_never_exceeds_total() {
        let statuses = [
            TaskStatus::Done,
            TaskStatus::InProgress,
            TaskStatus::Done,
            TaskStatus::Todo,
            TaskStatus::Done,
        ];
        let counts = TaskCounts::from_statuses(statuses);
        assert!(counts.completed <= counts.total);
        assert_eq!(counts.completion_rate(), 60.0);
    }

    #[test]
    fn no_due_date_is_never_overdue() {
        assert!(!is_overdue(None, TaskStatus::Todo, now()));
    }

    #[test]
    fn past_due_open_task_is_overdue() {
        let due = now() - Duration::days(1);
        assert!(is_overdue(Some(due), TaskStatus::InProgress, now()));
    }

    #[test]
    fn past_due_done_task_is_not_overdue() {
        let due = now() - Duration::days(1);
        assert!(!is_overdue(Some(due), TaskStatus::Done, now()));
    }

    #[test]
    fn due_exactly_now_is_not_overdue() {
        assert!(!is_overdue(Some(now()), TaskStatus::Todo, now()));
    }

    #[test]
    fn future_due_date_is_not_overdue() {
        let due = now() + Duration::hours(2);
        assert!(!is_overdue(Some(due), TaskStatus::Todo, now()));
    }
}
