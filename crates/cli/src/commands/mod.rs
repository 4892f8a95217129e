//! Command handlers for the promptreg CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod latest;
pub mod search;
pub mod sync;

// Re-export command types for convenience
pub use latest::LatestCommand;
pub use search::SearchCommand;
pub use sync::SyncCommand;
