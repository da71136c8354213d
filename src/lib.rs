//! Boardwalk - Board, List and Task Backend
//!
//! A REST backend for Trello-style boards. Users own boards, boards hold
//! ordered lists and lists hold ordered tasks. Lists and tasks can be
//! reordered, and tasks can move between lists, while the positions of one
//! parent's children always stay exactly `0..N`.
//!
//! # Module Structure
//!
//! - **`shared`** - Data types, request bodies and validation
//! - **`backend`** - Axum server, ordering core and storage
//!
//! # Usage
//!
//! ```rust,no_run
//! use boardwalk::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Storage
//!
//! With `DATABASE_URL` set the server uses PostgreSQL and applies the
//! migrations in `migrations/` on startup. Without it, everything lives in
//! memory.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
