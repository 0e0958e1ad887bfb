//! Markup tokenization
//!
//! - `token`: the lexical unit shared by both sides of a diff
//! - `tokenizer`: the text/tag/whitespace scanning state machine
//! - `score_table`: the id -> score side table filled while tokenizing

pub mod score_table;
pub mod token;
pub mod tokenizer;
