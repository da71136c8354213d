//! Authentication Module
//!
//! Registration, login and access tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports
//! ├── users.rs        - Password hashing and email normalisation
//! ├── sessions.rs     - JWT issue and verify
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email and password → user created → token returned
//! 2. **Login**: email and password → credentials verified → token returned
//! 3. **Me**: bearer token → verified by the middleware → user returned
//!
//! Passwords are hashed with bcrypt. Invalid credentials always produce the
//! same 401.

/// Password hashing and email normalisation
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, RegisterRequest};
pub use handlers::{get_me, login, register};
pub use sessions::{Claims, SessionKeys};
