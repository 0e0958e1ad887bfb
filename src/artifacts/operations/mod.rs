//! Edit operations derived from matching blocks

pub mod operation;
