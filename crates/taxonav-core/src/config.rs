use std::path::PathBuf;

pub(crate) const POSTS_DIR_ENV: &str = "TAXONAV_POSTS_DIR";
pub(crate) const INCLUDE_HIDDEN_ENV: &str = "TAXONAV_INCLUDE_HIDDEN";
pub(crate) const EXCLUDE_ENV: &str = "TAXONAV_EXCLUDE";

/// Environment overrides applied on top of scan defaults.
#[derive(Debug, Clone, Default)]
pub(crate) struct EnvOverrides {
    pub(crate) posts_dir: Option<PathBuf>,
    pub(crate) include_hidden: Option<bool>,
    pub(crate) exclude_globs: Vec<String>,
}

impl EnvOverrides {
    #[must_use]
    pub(crate) fn from_env() -> Self {
        Self {
            posts_dir: read_non_empty_env(POSTS_DIR_ENV).map(PathBuf::from),
            include_hidden: read_non_empty_env(INCLUDE_HIDDEN_ENV)
                .as_deref()
                .map(parse_env_bool),
            exclude_globs: read_non_empty_env(EXCLUDE_ENV)
                .map(|raw| split_globs(&raw))
                .unwrap_or_default(),
        }
    }
}

#[must_use]
pub(crate) fn read_non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[must_use]
pub(crate) fn parse_env_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

#[must_use]
pub(crate) fn split_globs(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_bool_accepts_common_truthy_spellings() {
        for raw in ["1", "true", "TRUE", " on ", "yes"] {
            assert!(parse_env_bool(raw), "{raw} must parse as true");
        }
        for raw in ["0", "false", "off", "", "nope"] {
            assert!(!parse_env_bool(raw), "{raw} must parse as false");
        }
    }

    #[test]
    fn split_globs_drops_empty_segments() {
        assert_eq!(
            split_globs("drafts/**, ,*.bak,"),
            vec!["drafts/**".to_string(), "*.bak".to_string()]
        );
        assert!(split_globs("  ").is_empty());
    }
}
