//! Pagination state shared by every paginated list in the explorer.

use crate::error::JumpError;

use super::window::{clamp_page, page_window, total_pages, PageEntry, DEFAULT_DELTA};

/// Longest accepted "go to page" input, in digits.
const MAX_JUMP_DIGITS: usize = 6;

/// Current page plus the "go to page" form of one paginated list.
///
/// `current_page` is kept within `1..=total_pages` by every mutator, so
/// [`Paginator::window`] never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    total_pages: usize,
    per_page: usize,
    total_items: usize,
    delta: usize,
    jump_input: String,
    jump_error: Option<JumpError>,
}

impl Paginator {
    pub fn new(total_items: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        Self {
            current_page: 1,
            total_pages: total_pages(total_items, per_page),
            per_page,
            total_items,
            delta: DEFAULT_DELTA,
            jump_input: String::new(),
            jump_error: None,
        }
    }

    pub fn with_delta(mut self, delta: usize) -> Self {
        self.delta = delta;
        self
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn is_first(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last(&self) -> bool {
        self.current_page == self.total_pages
    }

    /// Move to `page`, clamped into range.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = clamp_page(page, self.total_pages);
    }

    pub fn next(&mut self) {
        self.set_page(self.current_page.saturating_add(1));
    }

    pub fn previous(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    /// Update the item count (e.g. after a fresh fetch) and re-clamp the page.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.total_pages = total_pages(total_items, self.per_page);
        self.set_page(self.current_page);
    }

    /// Validate `input` and jump to the page it names.
    ///
    /// On success the page changes and the jump form is reset. On failure
    /// the page is untouched and the error is kept for display.
    pub fn jump(&mut self, input: &str) -> Result<(), JumpError> {
        match parse_page_input(input, self.total_pages) {
            Ok(page) => {
                self.current_page = page;
                self.jump_input.clear();
                self.jump_error = None;
                Ok(())
            }
            Err(e) => {
                self.jump_error = Some(e);
                Err(e)
            }
        }
    }

    /// Submit the buffered jump input. An empty buffer does nothing.
    pub fn submit_jump(&mut self) -> Result<(), JumpError> {
        if self.jump_input.is_empty() {
            return Ok(());
        }
        let input = self.jump_input.clone();
        self.jump(&input)
    }

    pub fn jump_input(&self) -> &str {
        &self.jump_input
    }

    pub fn jump_error(&self) -> Option<JumpError> {
        self.jump_error
    }

    /// Append a typed character to the jump input. Non-digits are ignored.
    pub fn push_jump_char(&mut self, c: char) {
        if c.is_ascii_digit() && self.jump_input.len() < MAX_JUMP_DIGITS {
            self.jump_input.push(c);
        }
        self.jump_error = None;
    }

    pub fn pop_jump_char(&mut self) {
        self.jump_input.pop();
        self.jump_error = None;
    }

    pub fn clear_jump(&mut self) {
        self.jump_input.clear();
        self.jump_error = None;
    }

    /// Page controls for the current position.
    pub fn window(&self) -> Vec<PageEntry> {
        page_window(self.current_page, self.total_pages, self.delta)
            .unwrap_or_else(|_| vec![PageEntry::Page(1)])
    }

    /// One-based (first, last) item numbers on the current page.
    pub fn showing(&self) -> (usize, usize) {
        if self.total_items == 0 {
            return (0, 0);
        }
        let first = (self.current_page - 1) * self.per_page + 1;
        let last = (self.current_page * self.per_page).min(self.total_items);
        (first, last)
    }
}

/// Parse a page number the way a form's integer field reads it: leading
/// whitespace is skipped and parsing stops at the first non-digit.
pub fn parse_page_input(input: &str, total_pages: usize) -> Result<usize, JumpError> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return Err(JumpError::NotANumber);
    }

    let out_of_range = JumpError::OutOfRange { total_pages };
    if negative {
        return Err(out_of_range);
    }

    match digits.parse::<usize>() {
        Ok(page) if (1..=total_pages).contains(&page) => Ok(page),
        _ => Err(out_of_range),
    }
}
