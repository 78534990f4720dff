//! Input rules shared by the session and event services.

use shared::DateOnly;

use super::error::{DomainError, DomainResult};

pub const MAX_TITLE_LENGTH: usize = 256;
pub const MAX_COLOR_LENGTH: usize = 32;

/// Trimmed, non-empty title of at most [`MAX_TITLE_LENGTH`] characters
pub fn validate_title(title: &str) -> DomainResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation("Title cannot be empty".to_string()));
    }
    let length = trimmed.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(DomainError::Validation(format!(
            "Title is too long ({} characters, maximum {})",
            length, MAX_TITLE_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_color(color: &str) -> DomainResult<String> {
    let trimmed = color.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation("Color cannot be empty".to_string()));
    }
    if trimmed.len() > MAX_COLOR_LENGTH {
        return Err(DomainError::Validation(format!(
            "Color is too long (maximum {} characters)",
            MAX_COLOR_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// The end date, when present, may not precede the start date
pub fn validate_date_range(start: DateOnly, end: Option<DateOnly>) -> DomainResult<()> {
    match end {
        Some(end) if end < start => Err(DomainError::Validation(format!(
            "End date {} is before start date {}",
            end, start
        ))),
        _ => Ok(()),
    }
}
