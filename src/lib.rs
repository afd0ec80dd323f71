// ContentCal - lib.rs
//
// Library entry point, exposing the search engine, record sources, and
// supporting layers for integration testing and embedding.
//
// The `contentcal` binary in `main.rs` is a thin CLI over this surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
