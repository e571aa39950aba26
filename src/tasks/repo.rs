use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Task lifecycle states. Intended progression is pending -> in_progress ->
/// completed, but no transition ordering is enforced: any authenticated
/// caller may set any state at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// Task row joined with its assignee. The assignee columns are null when
/// `assigned_to` references a deleted (or never existing) user.
#[derive(Debug, Clone, FromRow)]
pub struct TaskWithAssignee {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: OffsetDateTime,
    pub assignee_id: Option<Uuid>,
    pub assignee_name: Option<String>,
    pub assignee_email: Option<String>,
}

pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<TaskWithAssignee>> {
    sqlx::query_as::<_, TaskWithAssignee>(
        r#"
        SELECT t.id, t.title, t.description, t.status, t.created_at,
               u.id AS assignee_id, u.name AS assignee_name, u.email AS assignee_email
        FROM tasks t
        LEFT JOIN users u ON u.id = t.assigned_to
        ORDER BY t.created_at DESC
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn list_for_employee(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<TaskWithAssignee>> {
    sqlx::query_as::<_, TaskWithAssignee>(
        r#"
        SELECT t.id, t.title, t.description, t.status, t.created_at,
               u.id AS assignee_id, u.name AS assignee_name, u.email AS assignee_email
        FROM tasks t
        LEFT JOIN users u ON u.id = t.assigned_to
        WHERE t.assigned_to = $1
        ORDER BY t.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Insert a task and read it back joined with its assignee in one statement.
/// The assignee id is not checked against users.
pub async fn create(
    db: &PgPool,
    title: &str,
    description: &str,
    assigned_to: Uuid,
    status: TaskStatus,
) -> sqlx::Result<TaskWithAssignee> {
    sqlx::query_as::<_, TaskWithAssignee>(
        r#"
        WITH new_task AS (
            INSERT INTO tasks (title, description, assigned_to, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, assigned_to, status, created_at
        )
        SELECT t.id, t.title, t.description, t.status, t.created_at,
               u.id AS assignee_id, u.name AS assignee_name, u.email AS assignee_email
        FROM new_task t
        LEFT JOIN users u ON u.id = t.assigned_to
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(assigned_to)
    .bind(status)
    .fetch_one(db)
    .await
}

/// Replace every mutable field. Returns `None` when the id is unknown.
pub async fn update_full(
    db: &PgPool,
    id: Uuid,
    title: &str,
    description: &str,
    assigned_to: Uuid,
    status: TaskStatus,
) -> sqlx::Result<Option<TaskWithAssignee>> {
    sqlx::query_as::<_, TaskWithAssignee>(
        r#"
        WITH updated AS (
            UPDATE tasks
            SET title = $2, description = $3, assigned_to = $4, status = $5
            WHERE id = $1
            RETURNING id, title, description, assigned_to, status, created_at
        )
        SELECT t.id, t.title, t.description, t.status, t.created_at,
               u.id AS assignee_id, u.name AS assignee_name, u.email AS assignee_email
        FROM updated t
        LEFT JOIN users u ON u.id = t.assigned_to
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(assigned_to)
    .bind(status)
    .fetch_optional(db)
    .await
}

/// Replace only the status. Returns `None` when the id is unknown.
pub async fn update_status(
    db: &PgPool,
    id: Uuid,
    status: TaskStatus,
) -> sqlx::Result<Option<TaskWithAssignee>> {
    sqlx::query_as::<_, TaskWithAssignee>(
        r#"
        WITH updated AS (
            UPDATE tasks
            SET status = $2
            WHERE id = $1
            RETURNING id, title, description, assigned_to, status, created_at
        )
        SELECT t.id, t.title, t.description, t.status, t.created_at,
               u.id AS assignee_id, u.name AS assignee_name, u.email AS assignee_email
        FROM updated t
        LEFT JOIN users u ON u.id = t.assigned_to
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_optional(db)
    .await
}

pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Uuid>> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        DELETE FROM tasks
        WHERE id = $1
        RETURNING id
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(TaskStatus::Pending).unwrap(),
            serde_json::json!("pending")
        );
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            serde_json::json!("in_progress")
        );
        assert_eq!(
            serde_json::to_value(TaskStatus::Completed).unwrap(),
            serde_json::json!("completed")
        );
    }

    #[test]
    fn status_deserializes_snake_case() {
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"in_progress\"").unwrap(),
            TaskStatus::InProgress
        );
    }

    #[test]
    fn status_rejects_unknown_value() {
        assert!(serde_json::from_str::<TaskStatus>("\"done\"").is_err());
        assert!(serde_json::from_str::<TaskStatus>("\"inProgress\"").is_err());
    }

    #[test]
    fn status_defaults_to_pending() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }
}
