//! Pure pagination math and page-window shaping.

use std::fmt;

use serde::Serialize;

use crate::error::PaginationError;

/// Page numbers shown on each side of the current page.
pub const DEFAULT_DELTA: usize = 2;

/// One control in a rendered page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageEntry {
    /// A navigable page number (1-based).
    Page(usize),
    /// Placeholder for an elided run of pages.
    Ellipsis,
}

impl PageEntry {
    pub fn page(self) -> Option<usize> {
        match self {
            PageEntry::Page(n) => Some(n),
            PageEntry::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageEntry::Page(n) => write!(f, "{}", n),
            PageEntry::Ellipsis => f.write_str("..."),
        }
    }
}

/// Compute the page controls to render for `current_page` of `total_pages`.
///
/// The result always starts with page 1 and ends with `total_pages`. Up to
/// `delta` pages are shown on each side of the current page, and any gap
/// wider than one page collapses into a single [`PageEntry::Ellipsis`].
///
/// Fails with [`PaginationError::InvalidArgument`] when `total_pages` is 0
/// or `current_page` is outside `1..=total_pages`.
pub fn page_window(
    current_page: usize,
    total_pages: usize,
    delta: usize,
) -> Result<Vec<PageEntry>, PaginationError> {
    if total_pages < 1 || current_page < 1 || current_page > total_pages {
        return Err(PaginationError::InvalidArgument {
            current_page,
            total_pages,
        });
    }

    let start = current_page.saturating_sub(delta).max(2);
    let end = current_page
        .saturating_add(delta)
        .min(total_pages.saturating_sub(1));

    let mut window = Vec::with_capacity(delta.saturating_mul(2).saturating_add(5).min(total_pages + 2));
    window.push(PageEntry::Page(1));

    // current - delta > 2, rearranged to stay in unsigned range
    if current_page > delta.saturating_add(2) {
        window.push(PageEntry::Ellipsis);
    }

    window.extend((start..=end).map(PageEntry::Page));

    if total_pages > 1 {
        if current_page.saturating_add(delta) < total_pages - 1 {
            window.push(PageEntry::Ellipsis);
        }
        window.push(PageEntry::Page(total_pages));
    }

    Ok(window)
}

/// Number of pages needed for `item_count` items. An empty list still has one page.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1)).max(1)
}

/// Clamp a requested page into `1..=total_pages`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Start/end item indices for a page, suitable for slicing.
pub fn item_range(page: usize, per_page: usize, total_items: usize) -> (usize, usize) {
    let per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(per_page);
    let end = start.saturating_add(per_page).min(total_items);
    (start.min(total_items), end)
}
