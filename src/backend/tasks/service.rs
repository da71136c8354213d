//! Task operations

use uuid::Uuid;

use crate::backend::access::{load_owned_list, load_owned_task};
use crate::backend::error::BackendError;
use crate::backend::ordering::{move_child, remove_child, reserve_slot, Scope, SiblingKind};
use crate::backend::store::Store;
use crate::shared::task::{CreateTaskRequest, MoveTaskRequest, Task, TaskQuery, UpdateTaskRequest};

/// Create a task, appended to its list unless `position` is given
pub async fn create_task(store: &dyn Store, caller: Uuid, mut request: CreateTaskRequest) -> Result<Task, BackendError> {
    request.validate()?;
    load_owned_list(store, caller, request.list.id).await?;
    request.title = request.title.trim().to_string();

    let mut tx = store.begin().await?;
    let scope = Scope::new(SiblingKind::Task, request.list.id);
    let position = reserve_slot(tx.as_mut(), scope, request.position).await?;
    let task = tx.insert_task(&request, position).await?;
    tx.commit().await?;

    tracing::info!(task_id = %task.id, list_id = %task.list_id, position, "Task created");
    Ok(task)
}

/// Move a task within its list, or into another list when `listId` differs
pub async fn move_task(
    store: &dyn Store,
    caller: Uuid,
    task_id: Uuid,
    request: MoveTaskRequest,
) -> Result<Task, BackendError> {
    request.validate()?;
    let task = load_owned_task(store, caller, task_id).await?;
    if let Some(target) = request.list_id.filter(|id| *id != task.list_id) {
        load_owned_list(store, caller, target).await?;
    }

    let mut tx = store.begin().await?;
    move_child(tx.as_mut(), SiblingKind::Task, task_id, request.list_id, request.position).await?;
    let moved = tx
        .fetch_task(task_id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("Task {} not found", task_id)))?;
    tx.commit().await?;

    tracing::info!(
        %task_id,
        from_list = %task.list_id,
        to_list = %moved.list_id,
        position = moved.position,
        "Task moved"
    );
    Ok(moved)
}

/// Delete a task and close the gap among its siblings
pub async fn delete_task(store: &dyn Store, caller: Uuid, task_id: Uuid) -> Result<(), BackendError> {
    load_owned_task(store, caller, task_id).await?;

    let mut tx = store.begin().await?;
    remove_child(tx.as_mut(), SiblingKind::Task, task_id).await?;
    tx.commit().await?;

    tracing::info!(%task_id, "Task deleted");
    Ok(())
}

pub async fn get_task(store: &dyn Store, caller: Uuid, task_id: Uuid) -> Result<Task, BackendError> {
    load_owned_task(store, caller, task_id).await
}

/// Edit title, description, status or due date
pub async fn update_task(
    store: &dyn Store,
    caller: Uuid,
    task_id: Uuid,
    mut request: UpdateTaskRequest,
) -> Result<Task, BackendError> {
    request.validate()?;
    load_owned_task(store, caller, task_id).await?;
    request.title = request.title.map(|t| t.trim().to_string());

    store
        .update_task(task_id, &request)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("Task {} not found", task_id)))
}

/// The caller's tasks, optionally narrowed to one list or status
pub async fn search_tasks(store: &dyn Store, caller: Uuid, query: TaskQuery) -> Result<Vec<Task>, BackendError> {
    if let Some(list_id) = query.list_id {
        load_owned_list(store, caller, list_id).await?;
    }
    let filter = query.into_filter(caller)?;
    Ok(store.search_tasks(&filter).await?)
}
