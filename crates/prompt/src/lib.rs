//! Prompt metadata registry.
//!
//! This crate indexes plain-text prompt files that carry a YAML header and
//! answers metadata queries over them:
//! - Header parsing into typed metadata
//! - Comment-stripping file loading
//! - Cached directory scans with filtered search
//! - Prompt injection into exported workflow JSON

pub mod frontmatter;
pub mod loader;
pub mod registry;
pub mod types;
pub mod workflow;

// Re-export main types
pub use frontmatter::split_front_matter;
pub use loader::load_prompt_file;
pub use registry::{PromptRegistry, SearchFilter};
pub use types::{MetadataValue, PromptMetadata, PromptRecord};
pub use workflow::{inject_prompt, sync_workflow, SyncMode, SyncReport};
