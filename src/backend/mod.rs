//! Backend Module
//!
//! The HTTP server: configuration, routing, authentication, the ordering
//! core and the stores behind it.
//!
//! - **`ordering`** - Dense sibling positions for lists and tasks
//! - **`store`** - `Store`/`StoreTx` traits with PostgreSQL and in-memory implementations
//! - **`boards`**, **`lists`**, **`tasks`**, **`users`** - Resource services and handlers
//! - **`access`** - Ownership checks
//! - **`auth`**, **`middleware`** - Registration, login, tokens
//! - **`server`**, **`routes`**, **`error`** - Wiring

pub mod access;
pub mod auth;
pub mod boards;
pub mod error;
pub mod lists;
pub mod middleware;
pub mod ordering;
pub mod routes;
pub mod server;
pub mod store;
pub mod tasks;
pub mod users;

pub use error::BackendError;
pub use server::create_app;
