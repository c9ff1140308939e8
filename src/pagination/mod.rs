//! Page windows and the reusable pagination controller.

mod controller;
mod window;

pub use controller::Paginator;
pub use window::{item_range, total_pages, DEFAULT_DELTA};
