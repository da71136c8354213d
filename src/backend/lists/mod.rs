//! Lists
//!
//! Lists are ordered within their board. Creating, moving and deleting a
//! list go through the ordering core so the board's list positions stay
//! `0..N`; renaming and reads go straight to the store.
//!
//! - **`service`** - Operations with ownership checks and transactions
//! - **`handlers`** - Axum handlers for `/lists`

pub mod handlers;
pub mod service;
