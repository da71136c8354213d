//! Board operations

use uuid::Uuid;

use crate::backend::access::load_owned_board;
use crate::backend::error::BackendError;
use crate::backend::store::{NewBoard, Store};
use crate::shared::board::{Board, BoardQuery, CreateBoardRequest, UpdateBoardRequest};
use crate::shared::list::ListWithTasks;

pub async fn create_board(store: &dyn Store, caller: Uuid, request: CreateBoardRequest) -> Result<Board, BackendError> {
    request.validate()?;
    let board = store
        .insert_board(NewBoard {
            owner_id: caller,
            title: request.title.trim().to_string(),
            description: request.description,
        })
        .await?;
    tracing::info!(board_id = %board.id, owner = %caller, "Board created");
    Ok(board)
}

/// The caller's boards, newest first
pub async fn search_boards(store: &dyn Store, caller: Uuid, query: BoardQuery) -> Result<Vec<Board>, BackendError> {
    let filter = query.into_filter(caller)?;
    Ok(store.search_boards(&filter).await?)
}

pub async fn get_board(store: &dyn Store, caller: Uuid, board_id: Uuid) -> Result<Board, BackendError> {
    load_owned_board(store, caller, board_id).await
}

/// Lists of the board by position, each with its tasks by position
pub async fn board_lists(store: &dyn Store, caller: Uuid, board_id: Uuid) -> Result<Vec<ListWithTasks>, BackendError> {
    load_owned_board(store, caller, board_id).await?;
    Ok(store.lists_with_tasks(board_id).await?)
}

pub async fn update_board(
    store: &dyn Store,
    caller: Uuid,
    board_id: Uuid,
    mut request: UpdateBoardRequest,
) -> Result<Board, BackendError> {
    request.validate()?;
    load_owned_board(store, caller, board_id).await?;
    request.title = request.title.map(|t| t.trim().to_string());
    store
        .update_board(board_id, &request)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("Board {} not found", board_id)))
}

pub async fn delete_board(store: &dyn Store, caller: Uuid, board_id: Uuid) -> Result<(), BackendError> {
    load_owned_board(store, caller, board_id).await?;
    if !store.delete_board(board_id).await? {
        return Err(BackendError::not_found(format!("Board {} not found", board_id)));
    }
    tracing::info!(%board_id, "Board deleted");
    Ok(())
}
