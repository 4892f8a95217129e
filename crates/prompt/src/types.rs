//! Prompt types for the prompt registry.
//!
//! This module defines the record produced for every indexed prompt file
//! and the typed view of its header metadata.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Header keys that name structural record fields and are never taken from metadata.
pub const RESERVED_KEYS: [&str; 3] = ["file_path", "relative_path", "content"];

/// An opaque header value that has no typed field on [`PromptMetadata`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<MetadataValue>),
    Map(BTreeMap<String, MetadataValue>),
}

impl MetadataValue {
    /// Render a scalar as a string; `None` for null, lists and maps.
    pub fn as_scalar_string(&self) -> Option<String> {
        match self {
            MetadataValue::Bool(b) => Some(b.to_string()),
            MetadataValue::Integer(i) => Some(i.to_string()),
            MetadataValue::Float(f) => Some(f.to_string()),
            MetadataValue::String(s) => Some(s.clone()),
            MetadataValue::Null | MetadataValue::List(_) | MetadataValue::Map(_) => None,
        }
    }
}

/// Metadata parsed from a prompt file header.
///
/// Every field is optional; a key missing from the header is `None` here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptMetadata {
    /// Workflow the prompt belongs to
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub workflow: Option<String>,

    /// Version label (e.g., "v1")
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,

    /// Free-text purpose
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub purpose: Option<String>,

    /// Free-text agent role
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub agent_role: Option<String>,

    /// Tags; compared as a set
    #[serde(
        default,
        deserialize_with = "string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Vec<String>>,

    /// Model hints in header order
    #[serde(
        default,
        deserialize_with = "string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub model_hints: Option<Vec<String>>,

    /// Creation date, `YYYY-MM-DD`
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    /// Any other header keys, preserved without validation
    #[serde(flatten)]
    pub extra: BTreeMap<String, MetadataValue>,
}

/// One indexed prompt file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptRecord {
    /// Location of the source file
    pub file_path: PathBuf,

    /// Location relative to the registry root
    pub relative_path: PathBuf,

    /// Prompt body with the header removed
    pub content: String,

    /// Header metadata, serialized inline with the structural fields
    #[serde(flatten)]
    pub metadata: PromptMetadata,
}

impl PromptRecord {
    pub fn workflow(&self) -> Option<&str> {
        self.metadata.workflow.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.metadata.version.as_deref()
    }

    pub fn purpose(&self) -> Option<&str> {
        self.metadata.purpose.as_deref()
    }

    pub fn agent_role(&self) -> Option<&str> {
        self.metadata.agent_role.as_deref()
    }

    pub fn created_at(&self) -> Option<&str> {
        self.metadata.created_at.as_deref()
    }

    /// Tags, empty when the header has none.
    pub fn tags(&self) -> &[String] {
        self.metadata.tags.as_deref().unwrap_or_default()
    }

    /// Model hints, empty when the header has none.
    pub fn model_hints(&self) -> &[String] {
        self.metadata.model_hints.as_deref().unwrap_or_default()
    }
}

fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match MetadataValue::deserialize(deserializer)? {
        MetadataValue::Null => Ok(None),
        value => value
            .as_scalar_string()
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected a scalar value")),
    }
}

fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match MetadataValue::deserialize(deserializer)? {
        MetadataValue::Null => Ok(None),
        MetadataValue::List(items) => items
            .iter()
            .map(|item| {
                item.as_scalar_string()
                    .ok_or_else(|| D::Error::custom("expected a list of scalar values"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        MetadataValue::Map(_) => Err(D::Error::custom("expected a list, found a mapping")),
        scalar => Ok(scalar.as_scalar_string().map(|s| vec![s])),
    }
}
