use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::tasks::repo::{TaskStatus, TaskWithAssignee};

/// Request body for creating a task. Description defaults to empty and
/// status to `pending` when omitted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assigned_to: Uuid,
    #[serde(default)]
    pub status: TaskStatus,
}

/// Request body for the full task update. All four fields are replaced.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: String,
    pub description: String,
    pub assigned_to: Uuid,
    pub status: TaskStatus,
}

/// Request body for the status-only update.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: TaskStatus,
}

/// Assignee projection embedded in task responses.
#[derive(Debug, Serialize)]
pub struct AssigneeRef {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Task as returned by every task endpoint. `assignedTo` carries the
/// assignee's public fields, or null when the referenced user is gone.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub assigned_to: Option<AssigneeRef>,
    pub status: TaskStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<TaskWithAssignee> for TaskResponse {
    fn from(row: TaskWithAssignee) -> Self {
        let assigned_to = match (row.assignee_id, row.assignee_name, row.assignee_email) {
            (Some(id), Some(name), Some(email)) => Some(AssigneeRef { id, name, email }),
            _ => None,
        };
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            assigned_to,
            status: row.status,
            created_at: row.created_at,
        }
    }
}
