// Browser-facing module.
// Page definitions, path routing, and the axum handlers that tie the
// cache, fetchers, and chart renderer together.

pub mod handlers;
pub mod pages;

pub use handlers::{AppState, router};
pub use pages::{CANADA_PAGE, Page, WORLD_PAGE, route};
