use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Result, TaxonavError};
use crate::models::{MetadataRecord, TaxonomyAxis};

/// One term and the posts carrying it, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct TermEntry {
    pub name: String,
    pub files: Vec<String>,
}

/// Term -> source lookup for one taxonomy axis.
///
/// Term order follows first appearance across the input record list and
/// file order within a term follows record order, so two builds over the
/// same records produce identical indexes. Each build is independent;
/// there is no incremental patching.
#[derive(Debug, Clone)]
pub struct TaxonomyIndex {
    axis: TaxonomyAxis,
    entries: Vec<TermEntry>,
    positions: HashMap<String, usize>,
}

impl TaxonomyIndex {
    #[must_use]
    pub fn empty(axis: TaxonomyAxis) -> Self {
        Self {
            axis,
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Builds the index for `axis` over `records`.
    ///
    /// The axis field may be absent, a single string, or a list of
    /// strings. Any other shape fails with `MalformedMetadata` rather
    /// than being coerced. Term identity is exact string equality; no
    /// trimming or case folding. A record naming the same term twice
    /// appends its source twice, matching the literal source contract.
    pub fn build(records: &[MetadataRecord], axis: TaxonomyAxis) -> Result<Self> {
        let mut index = Self::empty(axis);
        for record in records {
            let field = record.field(axis);
            let terms = field
                .as_terms()
                .ok_or_else(|| TaxonavError::MalformedMetadata {
                    source_id: record.source_id.clone(),
                    field: axis.field_name(),
                    found: field.describe(),
                })?;
            for term in terms {
                index.append(term, &record.source_id);
            }
        }
        Ok(index)
    }

    fn append(&mut self, term: &str, source_id: &str) {
        let position = match self.positions.get(term) {
            Some(position) => *position,
            None => {
                self.positions.insert(term.to_string(), self.entries.len());
                self.entries.push(TermEntry {
                    name: term.to_string(),
                    files: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        self.entries[position].files.push(source_id.to_string());
    }

    /// Exact-match lookup by term name.
    ///
    /// An unknown term is `NotFound`, never an empty list: terms only
    /// exist in the index with at least one file.
    pub fn lookup(&self, term: &str) -> Result<&[String]> {
        self.positions
            .get(term)
            .map(|position| self.entries[*position].files.as_slice())
            .ok_or_else(|| TaxonavError::NotFound(format!("{} term: {term}", self.axis)))
    }

    #[must_use]
    pub fn axis(&self) -> TaxonomyAxis {
        self.axis
    }

    #[must_use]
    pub fn entries(&self) -> &[TermEntry] {
        &self.entries
    }

    /// Term names in first-appearance order.
    #[must_use]
    pub fn terms(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
