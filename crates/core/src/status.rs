//! Closed status sets for projects and tasks.
//!
//! Statuses are stored as TEXT columns guarded by CHECK constraints; the
//! string values here must match the migration.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const PROJECT_ACTIVE: &str = "ACTIVE";
pub const PROJECT_COMPLETED: &str = "COMPLETED";
pub const PROJECT_ON_HOLD: &str = "ON_HOLD";

/// All valid project status strings.
pub const VALID_PROJECT_STATUSES: &[&str] = &[PROJECT_ACTIVE, PROJECT_COMPLETED, PROJECT_ON_HOLD];

pub const TASK_TODO: &str = "TODO";
pub const TASK_IN_PROGRESS: &str = "IN_PROGRESS";
pub const TASK_DONE: &str = "DONE";

/// All valid task status strings, in board column order.
pub const VALID_TASK_STATUSES: &[&str] = &[TASK_TODO, TASK_IN_PROGRESS, TASK_DONE];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle status of a project. Any status may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [Self::Active, Self::Completed, Self::OnHold];

    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            PROJECT_ACTIVE => Ok(Self::Active),
            PROJECT_COMPLETED => Ok(Self::Completed),
            PROJECT_ON_HOLD => Ok(Self::OnHold),
            _ => Err(CoreError::Validation(format!(
                "Invalid project status '{s}'. Must be one of: {}",
                VALID_PROJECT_STATUSES.join(", ")
            ))),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => PROJECT_ACTIVE,
            Self::Completed => PROJECT_COMPLETED,
            Self::OnHold => PROJECT_ON_HOLD,
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
        }
    }
}

/// Workflow status of a task. Maps one-to-one onto the board columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Board column order.
    pub const ALL: [TaskStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            TASK_TODO => Ok(Self::Todo),
            TASK_IN_PROGRESS => Ok(Self::InProgress),
            TASK_DONE => Ok(Self::Done),
            _ => Err(CoreError::Validation(format!(
                "Invalid task status '{s}'. Must be one of: {}",
                VALID_TASK_STATUSES.join(", ")
            ))),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => TASK_TODO,
            Self::InProgress => TASK_IN_PROGRESS,
            Self::Done => TASK_DONE,
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Position of this status in [`TaskStatus::ALL`].
    pub fn column_index(&self) -> usize {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str_value(&value)
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str_value(&value)
    }
}
