//! testimpact CLI - command and output plumbing
//!
//! The binary in `main.rs` is a thin argument parser; everything it calls
//! lives here so the output formatters stay testable.

pub mod commands;
pub mod output;
