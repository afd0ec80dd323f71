// ContentCal - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: app or platform, or touch the filesystem directly.

pub mod criteria;
pub mod date_range;
pub mod export;
pub mod filter;
pub mod model;
pub mod record;
pub mod summary;
