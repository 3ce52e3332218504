//! Repository for the `task_comments` table.

use orgboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::task_comment::{CreateTaskComment, TaskComment};

const COLUMNS: &str = "id, task_id, content, author_email, created_at, updated_at";

/// Provides create and read operations for task comments.
pub struct TaskCommentRepo;

impl TaskCommentRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTaskComment,
    ) -> Result<TaskComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO task_comments (task_id, content, author_email)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskComment>(&query)
            .bind(input.task_id)
            .bind(&input.content)
            .bind(&input.author_email)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TaskComment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_comments WHERE id = $1");
        sqlx::query_as::<_, TaskComment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a task's comments oldest first. Equal timestamps fall back to
    /// insertion order.
    pub async fn list_by_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<TaskComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_comments
             WHERE task_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, TaskComment>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_task(pool: &PgPool, task_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM task_comments WHERE task_id = $1")
                .bind(task_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
