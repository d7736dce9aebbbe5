//! Line topology engine.
//!
//! Pure functions from (current line, request) to (new line | rejection).
//! Nothing here performs I/O or looks up stations: the caller resolves
//! identifiers first, runs the engine on a snapshot of the line, and
//! writes the result back only when it succeeds. A rejected request
//! therefore never leaves a partially edited chain behind.

mod insert;
mod remove;

pub use insert::insert;
pub use remove::remove;
