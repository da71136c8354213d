//! PostgreSQL store tests
//!
//! Each test returns early when `DATABASE_URL` is not set.
