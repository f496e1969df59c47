// Public fallible APIs in this crate share one concrete error contract (`TaxonavError`).
// Repeating per-function `# Errors` boilerplate obscures behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod client;
pub(crate) mod config;
pub mod error;
pub mod frontmatter;
pub mod indexer;
pub mod models;
pub mod scan;
pub mod workspace;

pub use client::Taxonav;
pub use error::{Result, TaxonavError};
pub use indexer::{TaxonomyIndex, TermEntry};
pub use models::{FieldValue, MetadataRecord, TaxonomyAxis, TaxonomyTree};
pub use scan::{PostScanner, ScanOptions, ScanOutcome};
pub use workspace::BlogWorkspace;
