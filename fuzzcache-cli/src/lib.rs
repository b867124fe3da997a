//! Library entry for fuzzcache-cli used by integration tests and embedding.

pub mod commands;

// Re-export commonly used items
pub use crate::commands::{pack, unpack, ConsoleProgress};
