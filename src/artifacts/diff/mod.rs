//! The diff pipeline
//!
//! - `engine`: tokenizes both sides, matches blocks, builds operations and renders them in
//!   the requested output mode
//!
//! Everything inside one call is owned by that call; an engine only keeps its options and
//! compiled markup patterns, so it can be reused and shared freely.

pub mod engine;
