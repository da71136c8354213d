//! Users
//!
//! Profile reads for any authenticated caller; edits and deletion only on
//! one's own account.

pub mod handlers;
