//! Plumbing commands
//!
//! - `tokenize`: list the tokens of a document with their tracking ids
//! - `opcodes`: list the operations turning one document into another

pub mod opcodes;
pub mod tokenize;
