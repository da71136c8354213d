//! In-process store
//!
//! Holds every row in `HashMap`s behind one `tokio::sync::Mutex`. A
//! transaction keeps the lock for its whole lifetime and writes into a
//! staged copy of the state, which replaces the live state on commit. This
//! serializes all transactions, which is stronger than the per-parent locks
//! PostgreSQL takes but gives the same ordering guarantees.
//!
//! Calling a `Store` method while holding a `MemoryTx` from the same store
//! waits forever; read through the transaction instead.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::backend::ordering::{Placement, Scope, Shift, SiblingKind};
use crate::backend::store::{NewBoard, NewUser, Store, StoreError, StoreResult, StoreTx};
use crate::shared::board::{Board, BoardFilter, UpdateBoardRequest};
use crate::shared::list::{List, ListFilter, ListWithTasks};
use crate::shared::task::{CreateTaskRequest, Task, TaskFilter, UpdateTaskRequest};
use crate::shared::user::{User, UserChanges};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    boards: HashMap<Uuid, Board>,
    lists: HashMap<Uuid, List>,
    tasks: HashMap<Uuid, Task>,
}

impl MemoryState {
    fn owner_of_list(&self, list: &List) -> Option<Uuid> {
        self.boards.get(&list.board_id).map(|b| b.owner_id)
    }

    fn owner_of_task(&self, task: &Task) -> Option<Uuid> {
        self.lists.get(&task.list_id).and_then(|l| self.owner_of_list(l))
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn remove_list(&mut self, id: Uuid) -> bool {
        if self.lists.remove(&id).is_none() {
            return false;
        }
        self.tasks.retain(|_, t| t.list_id != id);
        true
    }

    fn remove_board(&mut self, id: Uuid) -> bool {
        if self.boards.remove(&id).is_none() {
            return false;
        }
        let lists: Vec<Uuid> = self
            .lists
            .values()
            .filter(|l| l.board_id == id)
            .map(|l| l.id)
            .collect();
        for list in lists {
            self.remove_list(list);
        }
        true
    }

    fn placements(&self, scope: Scope) -> Vec<(Uuid, i32)> {
        let mut out: Vec<(Uuid, i32)> = match scope.kind {
            SiblingKind::List => self
                .lists
                .values()
                .filter(|l| l.board_id == scope.parent)
                .map(|l| (l.id, l.position))
                .collect(),
            SiblingKind::Task => self
                .tasks
                .values()
                .filter(|t| t.list_id == scope.parent)
                .map(|t| (t.id, t.position))
                .collect(),
        };
        out.sort_by_key(|(_, position)| *position);
        out
    }
}

/// Store backed by process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn paginate<T>(items: Vec<T>, offset: i64, limit: Option<i64>) -> Vec<T> {
    let skip = usize::try_from(offset).unwrap_or(0);
    let take = limit.and_then(|l| usize::try_from(l).ok()).unwrap_or(usize::MAX);
    items.into_iter().skip(skip).take(take).collect()
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> StoreResult<Box<dyn StoreTx>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTx { guard, staged }))
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut state = self.state.lock().await;
        if state.email_taken(&user.email, None) {
            return Err(StoreError::Duplicate("email"));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let state = self.state.lock().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<User>> {
        let mut state = self.state.lock().await;
        if let Some(email) = &changes.email {
            if state.email_taken(email, Some(id)) {
                return Err(StoreError::Duplicate("email"));
            }
        }
        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        let mut state = self.state.lock().await;
        if state.users.remove(&id).is_none() {
            return Ok(false);
        }
        let boards: Vec<Uuid> = state
            .boards
            .values()
            .filter(|b| b.owner_id == id)
            .map(|b| b.id)
            .collect();
        for board in boards {
            state.remove_board(board);
        }
        Ok(true)
    }

    async fn insert_board(&self, board: NewBoard) -> StoreResult<Board> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let board = Board {
            id: Uuid::new_v4(),
            title: board.title,
            description: board.description,
            owner_id: board.owner_id,
            created_at: now,
            updated_at: now,
        };
        state.boards.insert(board.id, board.clone());
        Ok(board)
    }

    async fn find_board(&self, id: Uuid) -> StoreResult<Option<Board>> {
        Ok(self.state.lock().await.boards.get(&id).cloned())
    }

    async fn search_boards(&self, filter: &BoardFilter) -> StoreResult<Vec<Board>> {
        let state = self.state.lock().await;
        let mut boards: Vec<Board> = state
            .boards
            .values()
            .filter(|b| b.owner_id == filter.owner_id)
            .filter(|b| filter.title.as_deref().map_or(true, |t| contains_ci(&b.title, t)))
            .filter(|b| {
                filter.description.as_deref().map_or(true, |d| {
                    b.description.as_deref().is_some_and(|bd| contains_ci(bd, d))
                })
            })
            .cloned()
            .collect();
        boards.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(boards, filter.offset, filter.limit))
    }

    async fn update_board(&self, id: Uuid, changes: &UpdateBoardRequest) -> StoreResult<Option<Board>> {
        let mut state = self.state.lock().await;
        let Some(board) = state.boards.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            board.title = title.clone();
        }
        if let Some(description) = &changes.description {
            board.description = Some(description.clone());
        }
        board.updated_at = Utc::now();
        Ok(Some(board.clone()))
    }

    async fn delete_board(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.state.lock().await.remove_board(id))
    }

    async fn find_list(&self, id: Uuid) -> StoreResult<Option<List>> {
        Ok(self.state.lock().await.lists.get(&id).cloned())
    }

    async fn search_lists(&self, filter: &ListFilter) -> StoreResult<Vec<List>> {
        let state = self.state.lock().await;
        let mut lists: Vec<List> = state
            .lists
            .values()
            .filter(|l| state.owner_of_list(l) == Some(filter.owner_id))
            .filter(|l| filter.board_id.map_or(true, |b| l.board_id == b))
            .filter(|l| filter.title.as_deref().map_or(true, |t| contains_ci(&l.title, t)))
            .cloned()
            .collect();
        lists.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(paginate(lists, filter.offset, filter.limit))
    }

    async fn lists_with_tasks(&self, board_id: Uuid) -> StoreResult<Vec<ListWithTasks>> {
        let state = self.state.lock().await;
        let mut lists: Vec<List> = state
            .lists
            .values()
            .filter(|l| l.board_id == board_id)
            .cloned()
            .collect();
        lists.sort_by_key(|l| l.position);

        Ok(lists
            .into_iter()
            .map(|list| {
                let mut tasks: Vec<Task> = state
                    .tasks
                    .values()
                    .filter(|t| t.list_id == list.id)
                    .cloned()
                    .collect();
                tasks.sort_by_key(|t| t.position);
                ListWithTasks { list, tasks }
            })
            .collect())
    }

    async fn rename_list(&self, id: Uuid, title: &str) -> StoreResult<Option<List>> {
        let mut state = self.state.lock().await;
        let Some(list) = state.lists.get_mut(&id) else {
            return Ok(None);
        };
        list.title = title.to_string();
        list.updated_at = Utc::now();
        Ok(Some(list.clone()))
    }

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        Ok(self.state.lock().await.tasks.get(&id).cloned())
    }

    async fn search_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let state = self.state.lock().await;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|t| state.owner_of_task(t) == Some(filter.owner_id))
            .filter(|t| filter.list_id.map_or(true, |l| t.list_id == l))
            .filter(|t| filter.status.map_or(true, |s| t.status == s))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.list_id.cmp(&b.list_id).then(a.position.cmp(&b.position)));
        Ok(paginate(tasks, filter.offset, filter.limit))
    }

    async fn update_task(&self, id: Uuid, changes: &UpdateTaskRequest) -> StoreResult<Option<Task>> {
        let mut state = self.state.lock().await;
        let Some(task) = state.tasks.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            task.title = title.clone();
        }
        if let Some(description) = &changes.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        if let Some(due_date) = changes.due_date {
            task.due_date = Some(due_date);
        }
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn positions(&self, scope: Scope) -> StoreResult<Vec<(Uuid, i32)>> {
        Ok(self.state.lock().await.placements(scope))
    }
}

/// Open transaction over a `MemoryStore`
pub struct MemoryTx {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn lock_parent(&mut self, scope: Scope) -> StoreResult<bool> {
        Ok(match scope.kind {
            SiblingKind::List => self.staged.boards.contains_key(&scope.parent),
            SiblingKind::Task => self.staged.lists.contains_key(&scope.parent),
        })
    }

    async fn count_children(&mut self, scope: Scope) -> StoreResult<i64> {
        let count = match scope.kind {
            SiblingKind::List => self
                .staged
                .lists
                .values()
                .filter(|l| l.board_id == scope.parent)
                .count(),
            SiblingKind::Task => self
                .staged
                .tasks
                .values()
                .filter(|t| t.list_id == scope.parent)
                .count(),
        };
        Ok(count as i64)
    }

    async fn find_child(&mut self, kind: SiblingKind, id: Uuid) -> StoreResult<Option<Placement>> {
        Ok(match kind {
            SiblingKind::List => self.staged.lists.get(&id).map(|l| Placement {
                parent: l.board_id,
                position: l.position,
            }),
            SiblingKind::Task => self.staged.tasks.get(&id).map(|t| Placement {
                parent: t.list_id,
                position: t.position,
            }),
        })
    }

    async fn shift_siblings(&mut self, shift: &Shift) -> StoreResult<u64> {
        let mut touched = 0;
        match shift.scope.kind {
            SiblingKind::List => {
                for list in self.staged.lists.values_mut() {
                    if shift.applies_to(list.board_id, list.position) {
                        list.position += shift.delta;
                        touched += 1;
                    }
                }
            }
            SiblingKind::Task => {
                for task in self.staged.tasks.values_mut() {
                    if shift.applies_to(task.list_id, task.position) {
                        task.position += shift.delta;
                        touched += 1;
                    }
                }
            }
        }
        Ok(touched)
    }

    async fn set_placement(&mut self, kind: SiblingKind, id: Uuid, placement: Placement) -> StoreResult<()> {
        let now = Utc::now();
        match kind {
            SiblingKind::List => {
                if let Some(list) = self.staged.lists.get_mut(&id) {
                    list.board_id = placement.parent;
                    list.position = placement.position;
                    list.updated_at = now;
                }
            }
            SiblingKind::Task => {
                if let Some(task) = self.staged.tasks.get_mut(&id) {
                    task.list_id = placement.parent;
                    task.position = placement.position;
                    task.updated_at = now;
                }
            }
        }
        Ok(())
    }

    async fn delete_child(&mut self, kind: SiblingKind, id: Uuid) -> StoreResult<bool> {
        Ok(match kind {
            SiblingKind::List => self.staged.remove_list(id),
            SiblingKind::Task => self.staged.tasks.remove(&id).is_some(),
        })
    }

    async fn insert_list(&mut self, board_id: Uuid, title: &str, position: i32) -> StoreResult<List> {
        let now = Utc::now();
        let list = List {
            id: Uuid::new_v4(),
            title: title.to_string(),
            position,
            board_id,
            created_at: now,
            updated_at: now,
        };
        self.staged.lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn insert_task(&mut self, task: &CreateTaskRequest, position: i32) -> StoreResult<Task> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            due_date: task.due_date,
            position,
            list_id: task.list.id,
            created_at: now,
            updated_at: now,
        };
        self.staged.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn fetch_list(&mut self, id: Uuid) -> StoreResult<Option<List>> {
        Ok(self.staged.lists.get(&id).cloned())
    }

    async fn fetch_task(&mut self, id: Uuid) -> StoreResult<Option<Task>> {
        Ok(self.staged.tasks.get(&id).cloned())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let MemoryTx { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}
