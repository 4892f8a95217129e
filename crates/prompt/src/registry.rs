//! Prompt registry: scans a directory of prompt files and answers
//! metadata queries over the parsed set.
//!
//! The parsed records are cached on first use and reused until
//! [`PromptRegistry::invalidate`] is called. Files that cannot be read or
//! whose header does not parse are logged and left out; a scan never fails
//! as a whole.

use crate::frontmatter::split_front_matter;
use crate::types::{PromptRecord, RESERVED_KEYS};
use promptreg_core::{AppError, AppResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Filters for [`PromptRegistry::search`].
///
/// Every field is optional and all supplied filters must match. Empty
/// strings and an empty tag list count as "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Exact match on `workflow`
    pub workflow: Option<String>,
    /// Exact match on `version`
    pub version: Option<String>,
    /// Case-insensitive substring of `purpose`
    pub purpose: Option<String>,
    /// Case-insensitive substring of `agent_role`
    pub agent_role: Option<String>,
    /// Record must carry every one of these tags
    pub tags: Vec<String>,
    /// Case-insensitive substring of any model hint
    pub model_hint: Option<String>,
    /// Inclusive lower bound on `created_at`
    pub created_after: Option<String>,
    /// Inclusive upper bound on `created_at`
    pub created_before: Option<String>,
}

impl SearchFilter {
    /// Filter on a single workflow name.
    pub fn workflow(workflow: impl Into<String>) -> Self {
        Self {
            workflow: Some(workflow.into()),
            ..Self::default()
        }
    }

    /// Check whether `record` passes every supplied filter.
    pub fn matches(&self, record: &PromptRecord) -> bool {
        if let Some(workflow) = supplied(&self.workflow) {
            if record.workflow() != Some(workflow) {
                return false;
            }
        }

        if let Some(version) = supplied(&self.version) {
            if record.version() != Some(version) {
                return false;
            }
        }

        if let Some(purpose) = supplied(&self.purpose) {
            if !contains_ignore_case(record.purpose().unwrap_or_default(), purpose) {
                return false;
            }
        }

        if let Some(role) = supplied(&self.agent_role) {
            if !contains_ignore_case(record.agent_role().unwrap_or_default(), role) {
                return false;
            }
        }

        let record_tags = record.tags();
        if !self.tags.iter().all(|tag| record_tags.contains(tag)) {
            return false;
        }

        if let Some(hint) = supplied(&self.model_hint) {
            if !record
                .model_hints()
                .iter()
                .any(|h| contains_ignore_case(h, hint))
            {
                return false;
            }
        }

        // Date bounds only apply to records that carry a date
        if let Some(created_at) = record.created_at().filter(|d| !d.is_empty()) {
            if let Some(after) = supplied(&self.created_after) {
                if created_at < after {
                    return false;
                }
            }
            if let Some(before) = supplied(&self.created_before) {
                if created_at > before {
                    return false;
                }
            }
        }

        true
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Registry of prompt files under a root directory.
///
/// # Example
/// ```no_run
/// use promptreg_prompt::{PromptRegistry, SearchFilter};
///
/// let mut registry = PromptRegistry::new("prompts");
/// let filter = SearchFilter {
///     tags: vec!["resume".to_string()],
///     ..SearchFilter::default()
/// };
/// for record in registry.search(&filter) {
///     println!("{}", record.relative_path.display());
/// }
/// ```
#[derive(Debug)]
pub struct PromptRegistry {
    root: PathBuf,
    extension: String,
    cache: Option<Vec<PromptRecord>>,
}

impl PromptRegistry {
    /// Create a registry over `root` indexing `*.txt` files.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_extension(root, "txt")
    }

    /// Create a registry over `root` indexing files with the given suffix.
    pub fn with_extension(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(&root))
                .unwrap_or(root)
        };

        Self {
            root,
            extension: extension.into().trim_start_matches('.').to_string(),
            cache: None,
        }
    }

    /// Registry root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a scan result is currently cached.
    pub fn is_loaded(&self) -> bool {
        self.cache.is_some()
    }

    /// Return all records, scanning the root on first use.
    ///
    /// Records appear in scan order. A cached result is returned unchanged.
    pub fn load(&mut self) -> &[PromptRecord] {
        if self.cache.is_none() {
            self.cache = Some(self.scan());
        }
        self.cache.as_deref().unwrap_or_default()
    }

    /// Drop the cached records so the next access rescans the root.
    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            tracing::debug!("Invalidated prompt cache for {:?}", self.root);
        }
    }

    /// List every record. Same as [`search`](Self::search) with no filters.
    pub fn list_all(&mut self) -> &[PromptRecord] {
        self.load()
    }

    /// Return the records matching every supplied filter, in scan order.
    pub fn search(&mut self, filter: &SearchFilter) -> Vec<&PromptRecord> {
        tracing::debug!("Searching prompts: {:?}", filter);
        self.load()
            .iter()
            .filter(|record| filter.matches(record))
            .collect()
    }

    /// Return every record for `workflow`.
    pub fn get_by_workflow(&mut self, workflow: &str) -> Vec<&PromptRecord> {
        self.search(&SearchFilter::workflow(workflow))
    }

    /// Return the record for `workflow` with the greatest `version` string.
    ///
    /// Versions compare as plain strings, so `"v2"` ranks above `"v10"`.
    /// Among equal versions the first in scan order wins; records without
    /// a version rank last. Returns `None` when the workflow has no records.
    pub fn get_latest_version(&mut self, workflow: &str) -> Option<&PromptRecord> {
        let mut records = self.get_by_workflow(workflow);
        records.sort_by(|a, b| {
            let a = a.version().unwrap_or_default();
            let b = b.version().unwrap_or_default();
            b.cmp(a)
        });
        records.into_iter().next()
    }

    fn scan(&self) -> Vec<PromptRecord> {
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read entry under {:?}: {}", self.root, e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.is_prompt_file(entry.path()) {
                continue;
            }

            match self.load_record(entry.path()) {
                Ok(record) => {
                    tracing::debug!("Indexed prompt {:?}", record.relative_path);
                    records.push(record);
                }
                Err(e) => {
                    skipped += 1;
                    tracing::warn!("Failed to load {:?}: {}", entry.path(), e);
                }
            }
        }

        tracing::info!(
            "Indexed {} prompt(s) from {:?} ({} skipped)",
            records.len(),
            self.root,
            skipped
        );

        records
    }

    fn is_prompt_file(&self, path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some(self.extension.as_str())
    }

    fn load_record(&self, path: &Path) -> AppResult<PromptRecord> {
        let text = std::fs::read_to_string(path)?;
        let (mut metadata, content) = split_front_matter(&text)?;

        for key in RESERVED_KEYS {
            if metadata.extra.remove(key).is_some() {
                tracing::warn!("Ignoring reserved header key '{}' in {:?}", key, path);
            }
        }

        let relative_path = path
            .strip_prefix(&self.root)
            .map_err(|_| AppError::Other(format!("{:?} is outside the registry root", path)))?
            .to_path_buf();

        Ok(PromptRecord {
            file_path: path.to_path_buf(),
            relative_path,
            content,
            metadata,
        })
    }
}
