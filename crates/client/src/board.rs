//! Task board view-model: three fixed status columns with drag-and-drop.
//!
//! Dropping a card reduces to one `updateTask` call. The board is not
//! mutated in place; it is rebuilt from the refetched task list.

use orgboard_core::status::TaskStatus;

use crate::models::{Task, TaskChanges};

#[derive(Debug, Clone, PartialEq)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

impl BoardColumn {
    pub fn title(&self) -> &'static str {
        self.status.label()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskBoard {
    columns: [BoardColumn; 3],
}

/// The `updateTask` call a drop translates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    pub task_id: String,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

impl TaskMove {
    /// Status-only changes; every other task field is left untouched.
    pub fn changes(&self) -> TaskChanges {
        TaskChanges {
            status: Some(self.to),
            ..Default::default()
        }
    }
}

impl TaskBoard {
    /// Group tasks into `TODO`, `IN_PROGRESS`, `DONE`, keeping the incoming
    /// order within each column.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut columns = TaskStatus::ALL.map(|status| BoardColumn {
            status,
            tasks: Vec::new(),
        });
        for task in tasks {
            columns[task.status.column_index()].tasks.push(task);
        }
        Self { columns }
    }

    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    pub fn column(&self, status: TaskStatus) -> &BoardColumn {
        &self.columns[status.column_index()]
    }

    pub fn find(&self, task_id: &str) -> Option<&Task> {
        self.columns
            .iter()
            .flat_map(|c| c.tasks.iter())
            .find(|t| t.id == task_id)
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// The move to issue when `task_id` is dropped on the `target` column.
    /// `None` for unknown tasks and for drops onto the task's own column.
    pub fn on_drop(&self, task_id: &str, target: TaskStatus) -> Option<TaskMove> {
        let task = self.find(task_id)?;
        if task.status == target {
            return None;
        }
        Some(TaskMove {
            task_id: task.id.clone(),
            from: task.status,
            to: target,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn task(id: &str, status: TaskStatus) -> Task {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: String::new(),
            status,
            assignee_email: String::new(),
            due_date: None,
            created_at: at,
            updated_at: at,
            is_overdue: false,
            comment_count: 0,
        }
    }

    fn board() -> TaskBoard {
        TaskBoard::from_tasks([
            task("1", TaskStatus::Done),
            task("2", TaskStatus::Todo),
            task("3", TaskStatus::InProgress),
            task("4", TaskStatus::Todo),
        ])
    }

    fn ids(column: &BoardColumn) -> Vec<&str> {
        column.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn columns_are_fixed_and_ordered() {
        let board = TaskBoard::from_tasks(Vec::new());
        let statuses: Vec<TaskStatus> = board.columns().iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done]
        );
        let titles: Vec<&str> = board.columns().iter().map(BoardColumn::title).collect();
        assert_eq!(titles, TaskStatus::ALL.map(|s| s.label()).to_vec());
        assert_eq!(board.task_count(), 0);
    }

    #[test]
    fn tasks_keep_incoming_order_within_column() {
        let board = board();
        assert_eq!(ids(board.column(TaskStatus::Todo)), vec!["2", "4"]);
        assert_eq!(ids(board.column(TaskStatus::InProgress)), vec!["3"]);
        assert_eq!(ids(board.column(TaskStatus::Done)), vec!["1"]);
    }

    #[test]
    fn drop_on_other_column_yields_move() {
        let mv = board().on_drop("2", TaskStatus::Done).unwrap();
        assert_eq!(
            mv,
            TaskMove {
                task_id: "2".into(),
                from: TaskStatus::Todo,
                to: TaskStatus::Done,
            }
        );
        assert_eq!(mv.changes().status, Some(TaskStatus::Done));
        assert_eq!(mv.changes().title, None);
    }

    #[test]
    fn drop_on_same_column_is_ignored() {
        assert_eq!(board().on_drop("3", TaskStatus::InProgress), None);
    }

    #[test]
    fn drop_of_unknown_task_is_ignored() {
        assert_eq!(board().on_drop("99", TaskStatus::Done), None);
    }
}
