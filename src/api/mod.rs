// Upstream COVID statistics API module.
// Provides the HTTP client and types for the country-report and global
// statistics endpoints.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::CovidClient;
pub use types::*;
