use std::path::{Path, PathBuf};

/// An eligible blog workspace rooted at an explicit directory.
///
/// Eligibility is the precondition for any scan: the root must carry a
/// `_config.yml` and a `source/_posts` directory. Callers pass the root
/// in; there is no ambient workspace state.
#[derive(Debug, Clone)]
pub struct BlogWorkspace {
    root: PathBuf,
    posts_dir: PathBuf,
}

impl BlogWorkspace {
    #[must_use]
    pub fn detect(root: impl Into<PathBuf>) -> Option<Self> {
        let root = root.into();
        let config = root.join("_config.yml");
        let posts_dir = root.join("source").join("_posts");
        if config.is_file() && posts_dir.is_dir() {
            Some(Self { root, posts_dir })
        } else {
            None
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn detect_requires_config_and_posts_dir() {
        let temp = tempdir().expect("tempdir");
        assert!(BlogWorkspace::detect(temp.path()).is_none());

        fs::write(temp.path().join("_config.yml"), "title: blog\n").expect("config");
        assert!(
            BlogWorkspace::detect(temp.path()).is_none(),
            "config alone is not enough"
        );

        fs::create_dir_all(temp.path().join("source").join("_posts")).expect("posts dir");
        let workspace = BlogWorkspace::detect(temp.path()).expect("eligible");
        assert!(workspace.posts_dir().ends_with("source/_posts"));
        assert_eq!(workspace.root(), temp.path());
    }

    #[test]
    fn detect_rejects_config_as_directory() {
        let temp = tempdir().expect("tempdir");
        fs::create_dir_all(temp.path().join("_config.yml")).expect("dir");
        fs::create_dir_all(temp.path().join("source").join("_posts")).expect("posts dir");
        assert!(BlogWorkspace::detect(temp.path()).is_none());
    }
}
