//! Ordered Sibling Positions
//!
//! Lists within a board and tasks within a list carry an integer `position`.
//! After every committed operation the positions of one parent's children
//! are exactly `0..N` with no gaps or duplicates.
//!
//! # Structure
//!
//! ```text
//! ordering/
//! ├── mod.rs       - Error type and re-exports
//! ├── plan.rs      - Pure planning of sibling shifts
//! └── executor.rs  - Applies plans inside a StoreTx
//! ```
//!
//! # Locking
//!
//! Every mutation first takes the exclusive lock on the affected parent
//! rows, ascending by id when two parents are involved, and re-reads the
//! moving child afterwards. Concurrent mutations of the same parent are
//! therefore serialized.

use thiserror::Error;
use uuid::Uuid;

use crate::backend::store::StoreError;

pub mod executor;
pub mod plan;

pub use executor::{move_child, remove_child, reserve_slot};
pub use plan::{
    plan_delete, plan_insert, plan_move, InsertPlan, MovePlan, Placement, PositionRange, Scope,
    Shift, SiblingKind,
};

#[derive(Debug, Error)]
pub enum OrderingError {
    #[error("{kind} {id} not found")]
    ParentNotFound { kind: &'static str, id: Uuid },

    #[error("{kind} {id} not found")]
    ChildNotFound { kind: &'static str, id: Uuid },

    /// The requested position lies outside `0..=max`
    #[error("Position {requested} is out of range (0..={max})")]
    OutOfRange { requested: i32, max: i64 },

    /// The child changed parent while the lock was being acquired
    #[error("{kind} {id} was moved concurrently")]
    Conflict { kind: &'static str, id: Uuid },

    #[error(transparent)]
    Store(#[from] StoreError),
}
