//! Typed errors for pagination and page-jump validation.
//!
//! Application-level failures go through `anyhow`; these are the errors
//! callers match on.

use thiserror::Error;

/// Precondition violation when computing a page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("invalid pagination argument: page {current_page} of {total_pages}")]
    InvalidArgument {
        current_page: usize,
        total_pages: usize,
    },
}

/// Validation failure for the "go to page" input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JumpError {
    #[error("Please enter a valid number")]
    NotANumber,
    #[error("Enter a number between 1 and {total_pages}")]
    OutOfRange { total_pages: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_error_messages() {
        assert_eq!(JumpError::NotANumber.to_string(), "Please enter a valid number");
        assert_eq!(
            JumpError::OutOfRange { total_pages: 10 }.to_string(),
            "Enter a number between 1 and 10"
        );
    }
}
