//! Tasks
//!
//! Tasks are ordered within their list and can move between lists. Moving
//! to another list closes the gap in the source and opens one in the
//! destination inside a single transaction.
//!
//! - **`service`** - Operations with ownership checks and transactions
//! - **`handlers`** - Axum handlers for `/tasks`

pub mod handlers;
pub mod service;
