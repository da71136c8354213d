//! Persistence Module
//!
//! Storage for users, boards, lists and tasks behind two object-safe traits:
//!
//! - **`Store`** - reads and single-statement writes, plus `begin()`
//! - **`StoreTx`** - one transaction; the primitives the ordering core needs
//!   (parent locking, sibling counts, range shifts) and the inserts that must
//!   share a transaction with them
//!
//! # Implementations
//!
//! ```text
//! store/
//! ├── mod.rs       - Traits and error type
//! ├── postgres.rs  - PgStore (sqlx, PostgreSQL)
//! └── memory.rs    - MemoryStore (in-process, used without DATABASE_URL and in tests)
//! ```
//!
//! Dropping a `StoreTx` without calling `commit` discards every write made
//! through it.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::ordering::{Placement, Scope, Shift, SiblingKind};
use crate::shared::board::{Board, BoardFilter, UpdateBoardRequest};
use crate::shared::list::{List, ListFilter, ListWithTasks};
use crate::shared::task::{CreateTaskRequest, Task, TaskFilter, UpdateTaskRequest};
use crate::shared::user::{User, UserChanges};

/// In-process store
pub mod memory;

/// PostgreSQL store
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error returned by the database driver
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A unique column already holds this value
    #[error("Duplicate value for {0}")]
    Duplicate(&'static str),

    /// A stored value could not be decoded
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Fields of a user being registered; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Fields of a board being created
#[derive(Debug, Clone)]
pub struct NewBoard {
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Start a transaction
    async fn begin(&self) -> StoreResult<Box<dyn StoreTx>>;

    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<User>>;
    /// Delete a user and, by cascade, their boards
    async fn delete_user(&self, id: Uuid) -> StoreResult<bool>;

    async fn insert_board(&self, board: NewBoard) -> StoreResult<Board>;
    async fn find_board(&self, id: Uuid) -> StoreResult<Option<Board>>;
    /// Boards of `filter.owner_id`, newest first
    async fn search_boards(&self, filter: &BoardFilter) -> StoreResult<Vec<Board>>;
    async fn update_board(&self, id: Uuid, changes: &UpdateBoardRequest) -> StoreResult<Option<Board>>;
    /// Delete a board and, by cascade, its lists and their tasks
    async fn delete_board(&self, id: Uuid) -> StoreResult<bool>;

    async fn find_list(&self, id: Uuid) -> StoreResult<Option<List>>;
    async fn search_lists(&self, filter: &ListFilter) -> StoreResult<Vec<List>>;
    /// Lists of a board by position, each with its tasks by position
    async fn lists_with_tasks(&self, board_id: Uuid) -> StoreResult<Vec<ListWithTasks>>;
    async fn rename_list(&self, id: Uuid, title: &str) -> StoreResult<Option<List>>;

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>>;
    async fn search_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>>;
    async fn update_task(&self, id: Uuid, changes: &UpdateTaskRequest) -> StoreResult<Option<Task>>;

    /// `(child id, position)` pairs of one parent, ordered by position
    async fn positions(&self, scope: Scope) -> StoreResult<Vec<(Uuid, i32)>>;
}

/// One open transaction
#[async_trait]
pub trait StoreTx: Send {
    /// Take the exclusive lock on a parent row. Returns `false` if it does not exist.
    async fn lock_parent(&mut self, scope: Scope) -> StoreResult<bool>;

    async fn count_children(&mut self, scope: Scope) -> StoreResult<i64>;

    async fn find_child(&mut self, kind: SiblingKind, id: Uuid) -> StoreResult<Option<Placement>>;

    /// Apply one bulk position update; returns the number of rows touched.
    async fn shift_siblings(&mut self, shift: &Shift) -> StoreResult<u64>;

    /// Write a child's own parent and position
    async fn set_placement(&mut self, kind: SiblingKind, id: Uuid, placement: Placement) -> StoreResult<()>;

    async fn delete_child(&mut self, kind: SiblingKind, id: Uuid) -> StoreResult<bool>;

    async fn insert_list(&mut self, board_id: Uuid, title: &str, position: i32) -> StoreResult<List>;

    async fn insert_task(&mut self, task: &CreateTaskRequest, position: i32) -> StoreResult<Task>;

    async fn fetch_list(&mut self, id: Uuid) -> StoreResult<Option<List>>;

    async fn fetch_task(&mut self, id: Uuid) -> StoreResult<Option<Task>>;

    async fn commit(self: Box<Self>) -> StoreResult<()>;
}
