//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs         - Module exports
//! ├── router.rs      - Router assembly, CORS and tracing layers
//! └── api_routes.rs  - Public auth routes and protected resource routes
//! ```
//!
//! # Routes
//!
//! Public:
//! - `POST /auth/register`, `POST /auth/login`
//!
//! Behind the auth middleware:
//! - `GET /auth/me`
//! - `/users`, `/users/me`, `/users/{id}`
//! - `/boards`, `/boards/{id}`, `/boards/{id}/lists`
//! - `/lists`, `/lists/{id}`, `/lists/{id}/move`
//! - `/tasks`, `/tasks/{id}`, `/tasks/{id}/move`

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
