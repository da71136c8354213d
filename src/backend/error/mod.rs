//! Backend Error Module
//!
//! HTTP-facing errors. Handlers return `Result<_, BackendError>`; store,
//! ordering and validation errors convert into it with `?`.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - BackendError and its status mapping
//! └── conversion.rs - IntoResponse and extractor rejections
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use conversion::{ApiJson, ApiPath, ApiQuery};
pub use types::BackendError;
