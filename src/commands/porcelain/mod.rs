//! Porcelain commands
//!
//! - `diff`: compare two documents and print the rendered result

pub mod diff;
