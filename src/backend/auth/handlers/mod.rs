//! Authentication Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports
//! ├── types.rs     - Request and response types
//! ├── register.rs  - POST /auth/register
//! ├── login.rs     - POST /auth/login
//! └── me.rs        - GET /auth/me
//! ```
//!
//! Register and login are public. `me` sits behind the auth middleware.

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

pub use types::{AuthResponse, LoginRequest, RegisterRequest};

pub use login::login;
pub use me::get_me;
pub use register::register;
