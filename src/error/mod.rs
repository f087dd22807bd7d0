//! Error handling
//!
//! Defines error types and their HTTP mapping for the file manager.

pub mod handlers;
pub mod types;

pub use types::*;
