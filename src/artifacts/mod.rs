//! Diff data structures and algorithms
//!
//! This module contains the markup diff pipeline, leaves first:
//!
//! - `markup`: tag shapes and the attributes injected by the scoring collaborator
//! - `tokens`: tokens, the tokenizer and the score side table
//! - `matching`: the word index and the block matcher
//! - `operations`: edit operations built from matching blocks
//! - `render`: inline, split, changeset and terminal renderers
//! - `diff`: the engine running the whole pipeline
//! - `core`: shared utilities (pager wrapper)

pub mod core;
pub mod diff;
pub mod markup;
pub mod matching;
pub mod operations;
pub mod render;
pub mod tokens;
