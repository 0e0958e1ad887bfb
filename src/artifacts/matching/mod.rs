//! Token alignment
//!
//! - `word_index`: positions of every token text in the new sequence
//! - `block_matcher`: longest-common-run search and recursive block matching

pub mod block_matcher;
pub mod word_index;
