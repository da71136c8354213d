//! Ownership checks
//!
//! A board belongs to its owner, a list to its board's owner and a task to
//! its list's board's owner. Each loader returns 404 when the resource is
//! missing and 403 when it belongs to someone else, and runs before any
//! ordering operation touches the store.

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::Store;
use crate::shared::board::Board;
use crate::shared::list::List;
use crate::shared::task::Task;

pub async fn load_owned_board(store: &dyn Store, caller: Uuid, board_id: Uuid) -> Result<Board, BackendError> {
    let board = store
        .find_board(board_id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("Board {} not found", board_id)))?;
    if board.owner_id != caller {
        tracing::warn!(%caller, %board_id, "Access to a foreign board");
        return Err(BackendError::forbidden("You do not have access to this board"));
    }
    Ok(board)
}

pub async fn load_owned_list(store: &dyn Store, caller: Uuid, list_id: Uuid) -> Result<List, BackendError> {
    let list = store
        .find_list(list_id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("List {} not found", list_id)))?;
    ensure_board_owner(store, caller, list.board_id, "list").await?;
    Ok(list)
}

pub async fn load_owned_task(store: &dyn Store, caller: Uuid, task_id: Uuid) -> Result<Task, BackendError> {
    let task = store
        .find_task(task_id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("Task {} not found", task_id)))?;
    let list = store
        .find_list(task.list_id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("Task {} not found", task_id)))?;
    ensure_board_owner(store, caller, list.board_id, "task").await?;
    Ok(task)
}

async fn ensure_board_owner(
    store: &dyn Store,
    caller: Uuid,
    board_id: Uuid,
    what: &str,
) -> Result<(), BackendError> {
    let owner = store.find_board(board_id).await?.map(|b| b.owner_id);
    if owner != Some(caller) {
        tracing::warn!(%caller, %board_id, "Access to a foreign {}", what);
        return Err(BackendError::forbidden(format!("You do not have access to this {}", what)));
    }
    Ok(())
}
