//! Stateful components around the diff engine
//!
//! - `document`: loading documents, finding their elements, injecting and stripping tracking
//!   metadata
//! - `scorer`: the content scorer boundary and the id generator
//! - `session`: output writer, engine and scorer shared by the commands

pub mod document;
pub mod scorer;
pub mod session;
