//! PostgreSQL store
//!
//! Runtime-checked `sqlx` queries over a `PgPool`. The schema lives in
//! `migrations/` and is applied by [`PgStore::migrate`].
//!
//! Sibling shifts rely on `UNIQUE (parent, position)` being
//! `DEFERRABLE INITIALLY DEFERRED`: a bulk `position + 1` passes through
//! duplicate states that only have to be resolved by commit time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::backend::ordering::{Placement, Scope, Shift, SiblingKind};
use crate::backend::store::{NewBoard, NewUser, Store, StoreError, StoreResult, StoreTx};
use crate::shared::board::{Board, BoardFilter, UpdateBoardRequest};
use crate::shared::list::{List, ListFilter, ListWithTasks};
use crate::shared::task::{CreateTaskRequest, Task, TaskFilter, UpdateTaskRequest};
use crate::shared::user::{User, UserChanges};

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";
const BOARD_COLUMNS: &str = "id, title, description, owner_id, created_at, updated_at";
const LIST_COLUMNS: &str = "id, title, position, board_id, created_at, updated_at";
const TASK_COLUMNS: &str =
    "id, title, description, status, due_date, position, list_id, created_at, updated_at";

/// Task row as read from the database; `status` is checked on conversion.
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    status: String,
    due_date: Option<DateTime<Utc>>,
    position: i32,
    list_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = StoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e: crate::shared::error::SharedError| StoreError::Corrupt(e.message()))?;
        Ok(Task {
            id: row.id,
            title: row.title,
            description: row.description,
            status,
            due_date: row.due_date,
            position: row.position,
            list_id: row.list_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_tasks(rows: Vec<TaskRow>) -> StoreResult<Vec<Task>> {
    rows.into_iter().map(Task::try_from).collect()
}

/// Turn a unique violation into `StoreError::Duplicate`
fn unique(err: sqlx::Error, field: &'static str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate(field),
        _ => StoreError::Database(err),
    }
}

/// Store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;
        info!("Connected to PostgreSQL (max {} connections)", max_connections);
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending migrations from `migrations/`
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!().run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> StoreResult<Box<dyn StoreTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgTx { tx }))
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unique(e, "email"))
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY created_at, id", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<User>> {
        let sql = format!(
            "UPDATE users SET name = COALESCE($2, name), email = COALESCE($3, email), \
             password_hash = COALESCE($4, password_hash), updated_at = now() \
             WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.email)
            .bind(changes.password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unique(e, "email"))
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_board(&self, board: NewBoard) -> StoreResult<Board> {
        let sql = format!(
            "INSERT INTO boards (id, title, description, owner_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            BOARD_COLUMNS
        );
        Ok(sqlx::query_as::<_, Board>(&sql)
            .bind(Uuid::new_v4())
            .bind(&board.title)
            .bind(&board.description)
            .bind(board.owner_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn find_board(&self, id: Uuid) -> StoreResult<Option<Board>> {
        let sql = format!("SELECT {} FROM boards WHERE id = $1", BOARD_COLUMNS);
        Ok(sqlx::query_as::<_, Board>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn search_boards(&self, filter: &BoardFilter) -> StoreResult<Vec<Board>> {
        let sql = format!(
            "SELECT {} FROM boards \
             WHERE owner_id = $1 \
               AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%') \
               AND ($3::text IS NULL OR description ILIKE '%' || $3 || '%') \
             ORDER BY created_at DESC, id \
             LIMIT $4 OFFSET $5",
            BOARD_COLUMNS
        );
        Ok(sqlx::query_as::<_, Board>(&sql)
            .bind(filter.owner_id)
            .bind(&filter.title)
            .bind(&filter.description)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn update_board(&self, id: Uuid, changes: &UpdateBoardRequest) -> StoreResult<Option<Board>> {
        let sql = format!(
            "UPDATE boards SET title = COALESCE($2, title), description = COALESCE($3, description), \
             updated_at = now() WHERE id = $1 RETURNING {}",
            BOARD_COLUMNS
        );
        Ok(sqlx::query_as::<_, Board>(&sql)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.description)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_board(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_list(&self, id: Uuid) -> StoreResult<Option<List>> {
        let sql = format!("SELECT {} FROM lists WHERE id = $1", LIST_COLUMNS);
        Ok(sqlx::query_as::<_, List>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn search_lists(&self, filter: &ListFilter) -> StoreResult<Vec<List>> {
        let sql = "SELECT l.id, l.title, l.position, l.board_id, l.created_at, l.updated_at \
                   FROM lists l JOIN boards b ON b.id = l.board_id \
                   WHERE b.owner_id = $1 \
                     AND ($2::uuid IS NULL OR l.board_id = $2) \
                     AND ($3::text IS NULL OR l.title ILIKE '%' || $3 || '%') \
                   ORDER BY l.position, l.created_at, l.id \
                   LIMIT $4 OFFSET $5";
        Ok(sqlx::query_as::<_, List>(sql)
            .bind(filter.owner_id)
            .bind(filter.board_id)
            .bind(&filter.title)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn lists_with_tasks(&self, board_id: Uuid) -> StoreResult<Vec<ListWithTasks>> {
        let sql = format!(
            "SELECT {} FROM lists WHERE board_id = $1 ORDER BY position",
            LIST_COLUMNS
        );
        let lists = sqlx::query_as::<_, List>(&sql)
            .bind(board_id)
            .fetch_all(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {} FROM tasks \
             WHERE list_id IN (SELECT id FROM lists WHERE board_id = $1) \
             ORDER BY position",
            TASK_COLUMNS
        );
        let rows = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(board_id)
            .fetch_all(&self.pool)
            .await?;

        let mut by_list: HashMap<Uuid, Vec<Task>> = HashMap::new();
        for task in into_tasks(rows)? {
            by_list.entry(task.list_id).or_default().push(task);
        }

        Ok(lists
            .into_iter()
            .map(|list| {
                let tasks = by_list.remove(&list.id).unwrap_or_default();
                ListWithTasks { list, tasks }
            })
            .collect())
    }

    async fn rename_list(&self, id: Uuid, title: &str) -> StoreResult<Option<List>> {
        let sql = format!(
            "UPDATE lists SET title = $2, updated_at = now() WHERE id = $1 RETURNING {}",
            LIST_COLUMNS
        );
        Ok(sqlx::query_as::<_, List>(&sql)
            .bind(id)
            .bind(title)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let sql = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);
        sqlx::query_as::<_, TaskRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Task::try_from)
            .transpose()
    }

    async fn search_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let sql = "SELECT t.id, t.title, t.description, t.status, t.due_date, t.position, \
                          t.list_id, t.created_at, t.updated_at \
                   FROM tasks t \
                   JOIN lists l ON l.id = t.list_id \
                   JOIN boards b ON b.id = l.board_id \
                   WHERE b.owner_id = $1 \
                     AND ($2::uuid IS NULL OR t.list_id = $2) \
                     AND ($3::text IS NULL OR t.status = $3) \
                   ORDER BY t.list_id, t.position \
                   LIMIT $4 OFFSET $5";
        let rows = sqlx::query_as::<_, TaskRow>(sql)
            .bind(filter.owner_id)
            .bind(filter.list_id)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await?;
        into_tasks(rows)
    }

    async fn update_task(&self, id: Uuid, changes: &UpdateTaskRequest) -> StoreResult<Option<Task>> {
        let sql = format!(
            "UPDATE tasks SET title = COALESCE($2, title), description = COALESCE($3, description), \
             status = COALESCE($4, status), due_date = COALESCE($5, due_date), updated_at = now() \
             WHERE id = $1 RETURNING {}",
            TASK_COLUMNS
        );
        sqlx::query_as::<_, TaskRow>(&sql)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(changes.status.map(|s| s.as_str()))
            .bind(changes.due_date)
            .fetch_optional(&self.pool)
            .await?
            .map(Task::try_from)
            .transpose()
    }

    async fn positions(&self, scope: Scope) -> StoreResult<Vec<(Uuid, i32)>> {
        let sql = format!(
            "SELECT id, position FROM {} WHERE {} = $1 ORDER BY position",
            scope.kind.table(),
            scope.kind.parent_column()
        );
        Ok(sqlx::query_as::<_, (Uuid, i32)>(&sql)
            .bind(scope.parent)
            .fetch_all(&self.pool)
            .await?)
    }
}

/// Open transaction on a pooled connection
pub struct PgTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTx for PgTx {
    async fn lock_parent(&mut self, scope: Scope) -> StoreResult<bool> {
        let sql = format!(
            "SELECT id FROM {} WHERE id = $1 FOR UPDATE",
            scope.kind.parent_table()
        );
        let locked = sqlx::query_scalar::<_, Uuid>(&sql)
            .bind(scope.parent)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(locked.is_some())
    }

    async fn count_children(&mut self, scope: Scope) -> StoreResult<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = $1",
            scope.kind.table(),
            scope.kind.parent_column()
        );
        Ok(sqlx::query_scalar::<_, i64>(&sql)
            .bind(scope.parent)
            .fetch_one(&mut *self.tx)
            .await?)
    }

    async fn find_child(&mut self, kind: SiblingKind, id: Uuid) -> StoreResult<Option<Placement>> {
        let sql = format!(
            "SELECT {}, position FROM {} WHERE id = $1",
            kind.parent_column(),
            kind.table()
        );
        let row = sqlx::query_as::<_, (Uuid, i32)>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row.map(|(parent, position)| Placement { parent, position }))
    }

    async fn shift_siblings(&mut self, shift: &Shift) -> StoreResult<u64> {
        let sql = format!(
            "UPDATE {} SET position = position + $1 \
             WHERE {} = $2 AND position >= $3 AND ($4::int4 IS NULL OR position <= $4)",
            shift.scope.kind.table(),
            shift.scope.kind.parent_column()
        );
        let result = sqlx::query(&sql)
            .bind(shift.delta)
            .bind(shift.scope.parent)
            .bind(shift.range.start)
            .bind(shift.range.end)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn set_placement(&mut self, kind: SiblingKind, id: Uuid, placement: Placement) -> StoreResult<()> {
        let sql = format!(
            "UPDATE {} SET {} = $2, position = $3, updated_at = now() WHERE id = $1",
            kind.table(),
            kind.parent_column()
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(placement.parent)
            .bind(placement.position)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn delete_child(&mut self, kind: SiblingKind, id: Uuid) -> StoreResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&sql).bind(id).execute(&mut *self.tx).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_list(&mut self, board_id: Uuid, title: &str, position: i32) -> StoreResult<List> {
        let sql = format!(
            "INSERT INTO lists (id, title, position, board_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            LIST_COLUMNS
        );
        Ok(sqlx::query_as::<_, List>(&sql)
            .bind(Uuid::new_v4())
            .bind(title)
            .bind(position)
            .bind(board_id)
            .fetch_one(&mut *self.tx)
            .await?)
    }

    async fn insert_task(&mut self, task: &CreateTaskRequest, position: i32) -> StoreResult<Task> {
        let sql = format!(
            "INSERT INTO tasks (id, title, description, status, due_date, position, list_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            TASK_COLUMNS
        );
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.status.as_str())
            .bind(task.due_date)
            .bind(position)
            .bind(task.list.id)
            .fetch_one(&mut *self.tx)
            .await?;
        Task::try_from(row)
    }

    async fn fetch_list(&mut self, id: Uuid) -> StoreResult<Option<List>> {
        let sql = format!("SELECT {} FROM lists WHERE id = $1", LIST_COLUMNS);
        Ok(sqlx::query_as::<_, List>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?)
    }

    async fn fetch_task(&mut self, id: Uuid) -> StoreResult<Option<Task>> {
        let sql = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);
        sqlx::query_as::<_, TaskRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?
            .map(Task::try_from)
            .transpose()
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
