//! Body returned by operations that have nothing else to report.

use serde::{Deserialize, Serialize};

/// `{"success": true}`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
