//! Server Module
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs     - Module exports
//! ├── state.rs   - AppState and FromRef implementations
//! ├── config.rs  - ServerConfig from the environment
//! └── init.rs    - Store selection and app creation
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{build_router, create_app};
pub use state::AppState;
