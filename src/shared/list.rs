//! List Data Structure
//!
//! A list belongs to one board and carries a `position` that is dense and
//! contiguous among the lists of that board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::task::Task;
use crate::shared::validation::{check_position, check_title, resolve_page};

/// A list within a board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: Uuid,
    pub title: String,
    pub position: i32,
    pub board_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A list together with its tasks, both ordered by position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListWithTasks {
    #[serde(flatten)]
    pub list: List,
    pub tasks: Vec<Task>,
}

/// Request body for `POST /lists`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    pub title: String,
    pub board_id: Uuid,
    /// Explicit slot; siblings at or after it are shifted to make room.
    #[serde(default)]
    pub position: Option<i32>,
}

impl CreateListRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        check_title("title", &self.title)?;
        if let Some(position) = self.position {
            check_position(position)?;
        }
        Ok(())
    }
}

/// Request body for `PATCH /lists/{id}`.
///
/// Only the title is editable here; positions change through the move endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateListRequest {
    #[serde(default)]
    pub title: Option<String>,
}

impl UpdateListRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if let Some(title) = &self.title {
            check_title("title", title)?;
        }
        Ok(())
    }
}

/// Request body for `PATCH /lists/{id}/move`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveListRequest {
    pub position: i32,
}

impl MoveListRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        check_position(self.position)
    }
}

/// Query string for `GET /lists`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub title: Option<String>,
    pub board_id: Option<Uuid>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Resolved list search, scoped to the boards of one owner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub owner_id: Uuid,
    pub board_id: Option<Uuid>,
    pub title: Option<String>,
    pub offset: i64,
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn into_filter(self, owner_id: Uuid) -> Result<ListFilter, SharedError> {
        let (offset, limit) = resolve_page(self.page, self.limit)?;
        Ok(ListFilter {
            owner_id,
            board_id: self.board_id,
            title: self.title.filter(|t| !t.is_empty()),
            offset,
            limit,
        })
    }
}
