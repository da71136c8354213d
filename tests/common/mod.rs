//! Common test utilities and helpers
//!
//! - In-memory test server
//! - Registration and fixture helpers
//! - Assertion helpers for error bodies and positions

pub mod assertions;
pub mod auth_helpers;
pub mod database;

pub use app::*;
pub use assertions::*;
pub use auth_helpers::*;
