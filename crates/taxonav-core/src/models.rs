use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::indexer::TaxonomyIndex;

/// Metadata extracted from a post's leading frontmatter block.
///
/// `source_id` is the opaque document handle (a file path for scanned
/// posts). The two taxonomy fields keep their raw shape until an index
/// build normalizes them, so a wrong-shaped value fails at build time
/// instead of being silently coerced during parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub source_id: String,
    #[serde(default, skip_serializing_if = "FieldValue::is_absent")]
    pub categories: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_absent")]
    pub tags: FieldValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MetadataRecord {
    #[must_use]
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            categories: FieldValue::Absent,
            tags: FieldValue::Absent,
            date: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn field(&self, axis: TaxonomyAxis) -> &FieldValue {
        match axis {
            TaxonomyAxis::Category => &self.categories,
            TaxonomyAxis::Tag => &self.tags,
        }
    }
}

/// Raw shape of a taxonomy field as found in frontmatter.
///
/// Frontmatter authors write `tags: rust` and `tags: [rust, cli]`
/// interchangeably; both are in contract. Anything else (a number, a
/// mapping, a mixed list) is captured as `Other` and rejected when an
/// index is built over that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
    #[default]
    Absent,
    Other(Value),
}

impl FieldValue {
    /// Canonical term list, or `None` for an out-of-contract shape.
    #[must_use]
    pub fn as_terms(&self) -> Option<&[String]> {
        match self {
            Self::Absent => Some(&[]),
            Self::Scalar(one) => Some(std::slice::from_ref(one)),
            Self::List(many) => Some(many),
            Self::Other(_) => None,
        }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Human-readable shape label used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Absent => "absent".to_string(),
            Self::Scalar(_) => "a string".to_string(),
            Self::List(_) => "a list of strings".to_string(),
            Self::Other(value) => match value {
                Value::Null => "null".to_string(),
                Value::Bool(_) => "a boolean".to_string(),
                Value::Number(n) => format!("a number ({n})"),
                Value::String(_) => "a string".to_string(),
                Value::Array(_) => "a mixed list".to_string(),
                Value::Object(_) => "a mapping".to_string(),
            },
        }
    }
}

/// The two independent classification dimensions of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyAxis {
    Category,
    Tag,
}

impl TaxonomyAxis {
    /// Frontmatter key read for this axis.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Tag => "tags",
        }
    }
}

impl std::fmt::Display for TaxonomyAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Category => "category",
            Self::Tag => "tag",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    pub source_id: String,
}

impl FileNode {
    #[must_use]
    pub fn from_source_id(source_id: impl Into<String>) -> Self {
        let source_id = source_id.into();
        let name = Path::new(&source_id)
            .file_name()
            .map_or_else(|| source_id.clone(), |n| n.to_string_lossy().to_string());
        Self { name, source_id }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermNode {
    pub name: String,
    pub files: Vec<FileNode>,
}

/// Two-level expandable view (term -> files) for a host UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyTree {
    pub axis: TaxonomyAxis,
    pub terms: Vec<TermNode>,
}

impl TaxonomyTree {
    #[must_use]
    pub fn from_index(index: &TaxonomyIndex) -> Self {
        let terms = index
            .entries()
            .iter()
            .map(|entry| TermNode {
                name: entry.name.clone(),
                files: entry
                    .files
                    .iter()
                    .map(FileNode::from_source_id)
                    .collect(),
            })
            .collect();
        Self {
            axis: index.axis(),
            terms,
        }
    }
}
