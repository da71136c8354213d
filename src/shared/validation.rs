//! Field validation helpers used by the request types.

use crate::shared::error::SharedError;

/// Maximum length of titles and names
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum page size accepted by search endpoints
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when only `page` is given
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Check that a trimmed string has between `min` and `max` characters.
pub fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), SharedError> {
    let len = value.trim().chars().count();
    if len < min {
        if min == 1 {
            return Err(SharedError::validation(field, format!("{} is required", label(field))));
        }
        return Err(SharedError::validation(
            field,
            format!("{} must be at least {} characters", label(field), min),
        ));
    }
    if len > max {
        return Err(SharedError::validation(
            field,
            format!("{} must be at most {} characters", label(field), max),
        ));
    }
    Ok(())
}

/// Check a title-like field (1..=100 characters)
pub fn check_title(field: &str, value: &str) -> Result<(), SharedError> {
    check_length(field, value, 1, MAX_TITLE_LEN)
}

/// Basic email shape check: one '@', non-empty local part, dotted domain.
pub fn check_email(value: &str) -> Result<(), SharedError> {
    let invalid = || SharedError::validation("email", "Invalid email address");
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Positions come from clients as signed integers; negatives are rejected here.
pub fn check_position(value: i32) -> Result<(), SharedError> {
    if value < 0 {
        return Err(SharedError::validation("position", "Position must be a non-negative integer"));
    }
    Ok(())
}

/// Resolve `page`/`limit` query parameters into `(offset, limit)`.
///
/// Without a page or limit the result is unbounded.
pub fn resolve_page(page: Option<u32>, limit: Option<u32>) -> Result<(i64, Option<i64>), SharedError> {
    if page == Some(0) {
        return Err(SharedError::validation("page", "Page must be at least 1"));
    }
    if let Some(limit) = limit {
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(SharedError::validation(
                "limit",
                format!("Limit must be between 1 and {}", MAX_PAGE_SIZE),
            ));
        }
    }
    let size = limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = page.map(|p| i64::from(p - 1) * i64::from(size)).unwrap_or(0);
    let limit = if page.is_some() || limit.is_some() {
        Some(i64::from(size))
    } else {
        None
    };
    Ok((offset, limit))
}

fn label(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
