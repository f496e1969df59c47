use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaxonavError>;

#[derive(Debug, Error)]
pub enum TaxonavError {
    #[error("malformed metadata in {source_id}: field `{field}` is {found}, expected a string or a list of strings")]
    MalformedMetadata {
        source_id: String,
        field: &'static str,
        found: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("frontmatter error: {0}")]
    Frontmatter(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TaxonavError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedMetadata { .. } => "MALFORMED_METADATA",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Frontmatter(_) => "FRONTMATTER_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }
}
