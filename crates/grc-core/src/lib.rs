//! GRC Cards Core Library
//!
//! Host-side plumbing around the card engine:
//! - Exit codes for CLI operations
//! - Structured logging setup
//! - Item loading and response envelopes
//! - Markdown and summary rendering of the overview
//! - JSON Schema generation for output types
//!
//! The binary entry point is in `main.rs`.

pub mod exit_codes;
pub mod input;
pub mod logging;
pub mod output;
pub mod render;
pub mod schema;
