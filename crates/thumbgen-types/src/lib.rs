//! Shared domain types for the thumbgen workspace.

pub mod config;
pub mod snapshot;

mod errors;

pub use errors::{Result, ThumbgenError};
