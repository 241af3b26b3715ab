//! Resource lookup by name

use std::path::{Path, PathBuf};

/// Resolves a resource name to a readable file
pub trait ResourceLocator {
    /// Path of the named resource, `None` when it cannot be found
    fn locate(&self, name: &str) -> Option<PathBuf>;
}

/// Searches a list of directories in order
///
/// Absolute names and names that already exist relative to the working
/// directory are returned as-is.
#[derive(Debug, Clone, Default)]
pub struct SearchPathLocator {
    dirs: Vec<PathBuf>,
}

impl SearchPathLocator {
    /// Search the given directories in order
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Directories searched, in order
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl ResourceLocator for SearchPathLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        let direct = Path::new(name);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }
        if direct.is_absolute() {
            return None;
        }
        self.dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join("icon.png"), b"x").unwrap();
        std::fs::write(first.path().join("both.png"), b"x").unwrap();
        std::fs::write(second.path().join("both.png"), b"x").unwrap();

        let locator = SearchPathLocator::new([first.path(), second.path()]);
        assert_eq!(locator.locate("icon.png"), Some(second.path().join("icon.png")));
        assert_eq!(locator.locate("both.png"), Some(first.path().join("both.png")));
        assert_eq!(locator.locate("missing.png"), None);
    }
}
