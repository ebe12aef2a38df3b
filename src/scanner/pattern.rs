//! Glob-style match patterns for asset discovery.

use std::fmt;
use std::path::Path;

/// Which files under the asset directory are eligible for caching.
///
/// Renders as a shell glob (`*.jpg`, `**/*.obj`, `*`), and matches the way
/// such a glob would: recursive patterns reach any depth and non-recursive
/// ones only direct children. Dotfiles are eligible like any other file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern {
    extension: Option<String>,
    recursive: bool,
}

impl GlobPattern {
    /// Build a pattern from an optional extension filter and a recursive flag.
    ///
    /// The extension may be given with or without its leading dot.
    ///
    /// # Example
    ///
    /// ```
    /// use asset_cache::scanner::GlobPattern;
    ///
    /// assert_eq!(GlobPattern::new(Some("jpg"), true).to_string(), "**/*.jpg");
    /// assert_eq!(GlobPattern::new(None, false).to_string(), "*");
    /// ```
    #[must_use]
    pub fn new(extension: Option<&str>, recursive: bool) -> Self {
        let extension = extension
            .map(|e| e.trim_start_matches('.'))
            .filter(|e| !e.is_empty())
            .map(str::to_string);
        Self {
            extension,
            recursive,
        }
    }

    /// The extension filter, without its dot.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Whether the pattern descends into subdirectories.
    #[must_use]
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Deepest directory level a match can sit at (1 = direct children).
    #[must_use]
    pub fn max_depth(&self) -> usize {
        if self.recursive {
            usize::MAX
        } else {
            1
        }
    }

    /// Whether a file name passes the pattern's filters.
    #[must_use]
    pub fn matches_name(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        match &self.extension {
            Some(ext) => name
                .strip_suffix(ext.as_str())
                .is_some_and(|rest| rest.ends_with('.')),
            None => true,
        }
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.recursive {
            write!(f, "**/")?;
        }
        match &self.extension {
            Some(ext) => write!(f, "*.{}", ext),
            None => write!(f, "*"),
        }
    }
}
