//! Applies position plans inside one transaction.
//!
//! The caller owns the transaction: these functions never commit, so an
//! error leaves everything to be rolled back when the `StoreTx` is dropped.

use tracing::debug;
use uuid::Uuid;

use crate::backend::ordering::plan::{plan_delete, plan_insert, plan_move, Placement, Scope, SiblingKind};
use crate::backend::ordering::OrderingError;
use crate::backend::store::StoreTx;

/// Lock `scope`'s parent and free the slot a new child will take.
///
/// Returns the position to insert the child at.
pub async fn reserve_slot(
    tx: &mut dyn StoreTx,
    scope: Scope,
    desired: Option<i32>,
) -> Result<i32, OrderingError> {
    if !tx.lock_parent(scope).await? {
        return Err(OrderingError::ParentNotFound {
            kind: scope.kind.parent_name(),
            id: scope.parent,
        });
    }

    let count = tx.count_children(scope).await?;
    let plan = plan_insert(scope, count, desired)?;
    if let Some(shift) = plan.shift {
        tx.shift_siblings(&shift).await?;
    }

    debug!(kind = scope.kind.name(), parent = %scope.parent, position = plan.position, "Reserved slot");
    Ok(plan.position)
}

/// Move a child to `position` under `target_parent` (its current parent when `None`).
pub async fn move_child(
    tx: &mut dyn StoreTx,
    kind: SiblingKind,
    id: Uuid,
    target_parent: Option<Uuid>,
    position: i32,
) -> Result<Placement, OrderingError> {
    let seen = find(tx, kind, id).await?;
    let target_parent = target_parent.unwrap_or(seen.parent);

    let mut parents = vec![seen.parent, target_parent];
    parents.sort();
    parents.dedup();
    for parent in parents {
        if !tx.lock_parent(Scope::new(kind, parent)).await? {
            return Err(OrderingError::ParentNotFound {
                kind: kind.parent_name(),
                id: parent,
            });
        }
    }

    let current = locked(tx, kind, id, seen).await?;
    let source_count = tx.count_children(Scope::new(kind, current.parent)).await?;
    let dest_count = if target_parent == current.parent {
        source_count
    } else {
        tx.count_children(Scope::new(kind, target_parent)).await?
    };

    let plan = plan_move(kind, current, target_parent, position, source_count, dest_count)?;
    for shift in &plan.shifts {
        tx.shift_siblings(shift).await?;
    }
    if plan.target != current {
        tx.set_placement(kind, id, plan.target).await?;
    }

    debug!(
        kind = kind.name(),
        %id,
        from = current.position,
        to = plan.target.position,
        "Moved child"
    );
    Ok(plan.target)
}

/// Delete a child and close the gap it leaves.
pub async fn remove_child(
    tx: &mut dyn StoreTx,
    kind: SiblingKind,
    id: Uuid,
) -> Result<Placement, OrderingError> {
    let seen = find(tx, kind, id).await?;
    if !tx.lock_parent(Scope::new(kind, seen.parent)).await? {
        return Err(OrderingError::ChildNotFound { kind: kind.name(), id });
    }

    let current = locked(tx, kind, id, seen).await?;
    if !tx.delete_child(kind, id).await? {
        return Err(OrderingError::ChildNotFound { kind: kind.name(), id });
    }
    tx.shift_siblings(&plan_delete(kind, current)).await?;

    debug!(kind = kind.name(), %id, position = current.position, "Removed child");
    Ok(current)
}

async fn find(tx: &mut dyn StoreTx, kind: SiblingKind, id: Uuid) -> Result<Placement, OrderingError> {
    tx.find_child(kind, id)
        .await?
        .ok_or(OrderingError::ChildNotFound { kind: kind.name(), id })
}

/// Re-read a child once its parent is locked
async fn locked(
    tx: &mut dyn StoreTx,
    kind: SiblingKind,
    id: Uuid,
    seen: Placement,
) -> Result<Placement, OrderingError> {
    let current = find(tx, kind, id).await?;
    if current.parent != seen.parent {
        return Err(OrderingError::Conflict { kind: kind.name(), id });
    }
    Ok(current)
}
