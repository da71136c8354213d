//! Shared Module
//!
//! Data types and request bodies used by the backend and by API clients.
//! Everything here is plain data with validation; no I/O.

/// Board data structure
pub mod board;

/// Shared error types
pub mod error;

/// List data structure
pub mod list;

/// `{"success": true}` body
pub mod response;

/// Task data structure
pub mod task;

/// User data structure
pub mod user;

/// Field validation helpers
pub mod validation;

pub use board::Board;
pub use error::SharedError;
pub use list::{List, ListWithTasks};
pub use response::SuccessResponse;
pub use task::{Task, TaskStatus};
pub use user::{User, UserResponse};
