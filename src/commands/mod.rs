//! Command implementations
//!
//! Commands are `impl Session` blocks, split the usual way:
//!
//! - `plumbing`: low-level views of the engine's intermediate results (tokens, operations)
//! - `porcelain`: the user-facing document diff

pub mod plumbing;
pub mod porcelain;
