//! Task Data Structure
//!
//! Tasks live in a list and are ordered by `position` inside it. A task can
//! move to another list, which repositions it in the destination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::validation::{check_position, check_title, resolve_page};

/// Workflow status of a task
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            other => Err(SharedError::unknown("task status", other)),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task within a list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub position: i32,
    pub list_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reference to the owning list in a create request (`"list": {"id": ...}`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListRef {
    pub id: Uuid,
}

/// Request body for `POST /tasks`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub list: ListRef,
    #[serde(default)]
    pub position: Option<i32>,
}

impl CreateTaskRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        check_title("title", &self.title)?;
        if let Some(position) = self.position {
            check_position(position)?;
        }
        Ok(())
    }
}

/// Request body for `PATCH /tasks/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if let Some(title) = &self.title {
            check_title("title", title)?;
        }
        Ok(())
    }
}

/// Request body for `PATCH /tasks/{id}/move`.
///
/// Without `listId` (or with the current list) the task moves inside its list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskRequest {
    #[serde(default)]
    pub list_id: Option<Uuid>,
    pub position: i32,
}

impl MoveTaskRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        check_position(self.position)
    }
}

/// Query string for `GET /tasks`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    pub list_id: Option<Uuid>,
    pub status: Option<TaskStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Resolved task search, scoped to one owner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub owner_id: Uuid,
    pub list_id: Option<Uuid>,
    pub status: Option<TaskStatus>,
    pub offset: i64,
    pub limit: Option<i64>,
}

impl TaskQuery {
    pub fn into_filter(self, owner_id: Uuid) -> Result<TaskFilter, SharedError> {
        let (offset, limit) = resolve_page(self.page, self.limit)?;
        Ok(TaskFilter {
            owner_id,
            list_id: self.list_id,
            status: self.status,
            offset,
            limit,
        })
    }
}
