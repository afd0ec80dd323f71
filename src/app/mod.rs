// ContentCal - app/mod.rs
//
// Application layer: record sources and the search pipeline.
// Dependencies: core layer, platform fs helpers.

pub mod search;
pub mod source;
