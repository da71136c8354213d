//! List operations

use uuid::Uuid;

use crate::backend::access::{load_owned_board, load_owned_list};
use crate::backend::error::BackendError;
use crate::backend::ordering::{move_child, remove_child, reserve_slot, Scope, SiblingKind};
use crate::backend::store::Store;
use crate::shared::list::{CreateListRequest, List, ListQuery, MoveListRequest, UpdateListRequest};

/// Create a list, appended to the board unless `position` is given
pub async fn create_list(store: &dyn Store, caller: Uuid, request: CreateListRequest) -> Result<List, BackendError> {
    request.validate()?;
    load_owned_board(store, caller, request.board_id).await?;

    let mut tx = store.begin().await?;
    let scope = Scope::new(SiblingKind::List, request.board_id);
    let position = reserve_slot(tx.as_mut(), scope, request.position).await?;
    let list = tx.insert_list(request.board_id, request.title.trim(), position).await?;
    tx.commit().await?;

    tracing::info!(list_id = %list.id, board_id = %list.board_id, position, "List created");
    Ok(list)
}

/// Move a list to another position within its board
pub async fn move_list(
    store: &dyn Store,
    caller: Uuid,
    list_id: Uuid,
    request: MoveListRequest,
) -> Result<List, BackendError> {
    request.validate()?;
    load_owned_list(store, caller, list_id).await?;

    let mut tx = store.begin().await?;
    move_child(tx.as_mut(), SiblingKind::List, list_id, None, request.position).await?;
    let list = tx
        .fetch_list(list_id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("List {} not found", list_id)))?;
    tx.commit().await?;

    tracing::info!(%list_id, position = list.position, "List moved");
    Ok(list)
}

/// Delete a list with its tasks and close the gap among its siblings
pub async fn delete_list(store: &dyn Store, caller: Uuid, list_id: Uuid) -> Result<(), BackendError> {
    load_owned_list(store, caller, list_id).await?;

    let mut tx = store.begin().await?;
    remove_child(tx.as_mut(), SiblingKind::List, list_id).await?;
    tx.commit().await?;

    tracing::info!(%list_id, "List deleted");
    Ok(())
}

pub async fn get_list(store: &dyn Store, caller: Uuid, list_id: Uuid) -> Result<List, BackendError> {
    load_owned_list(store, caller, list_id).await
}

/// Rename a list; position is not editable here
pub async fn update_list(
    store: &dyn Store,
    caller: Uuid,
    list_id: Uuid,
    request: UpdateListRequest,
) -> Result<List, BackendError> {
    request.validate()?;
    let list = load_owned_list(store, caller, list_id).await?;
    let Some(title) = request.title else {
        return Ok(list);
    };
    store
        .rename_list(list_id, title.trim())
        .await?
        .ok_or_else(|| BackendError::not_found(format!("List {} not found", list_id)))
}

/// The caller's lists, optionally narrowed to one board
pub async fn search_lists(store: &dyn Store, caller: Uuid, query: ListQuery) -> Result<Vec<List>, BackendError> {
    if let Some(board_id) = query.board_id {
        load_owned_board(store, caller, board_id).await?;
    }
    let filter = query.into_filter(caller)?;
    Ok(store.search_lists(&filter).await?)
}
