//! Board Data Structure
//!
//! Boards are the top-level container owned by a user. Lists hang off a
//! board and are ordered by their `position` within it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::validation::{check_title, resolve_page};

/// A board owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /boards`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoardRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateBoardRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        check_title("title", &self.title)
    }
}

/// Request body for `PATCH /boards/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBoardRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateBoardRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if let Some(title) = &self.title {
            check_title("title", title)?;
        }
        Ok(())
    }
}

/// Query string for `GET /boards`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardQuery {
    pub title: Option<String>,
    pub description: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Resolved board search, scoped to one owner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardFilter {
    pub owner_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub offset: i64,
    pub limit: Option<i64>,
}

impl BoardQuery {
    /// Validate paging and scope the search to `owner_id`.
    pub fn into_filter(self, owner_id: Uuid) -> Result<BoardFilter, SharedError> {
        let (offset, limit) = resolve_page(self.page, self.limit)?;
        Ok(BoardFilter {
            owner_id,
            title: self.title.filter(|t| !t.is_empty()),
            description: self.description.filter(|d| !d.is_empty()),
            offset,
            limit,
        })
    }
}
