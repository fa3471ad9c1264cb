//! Ignore rules for files that should not reach the diff or the prompt.

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::ConfigError;

/// Files that never contribute to release notes (generated or lock files).
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "CHANGELOG.md",
    "CHANGELOG*.md",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
];

/// Compiled ignore patterns.
///
/// A path is ignored when a pattern matches either the full path or its
/// basename, so `CHANGELOG.md` also hides `docs/CHANGELOG.md`.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    patterns: Vec<String>,
    set: GlobSet,
}

impl IgnoreRules {
    /// Compile the given patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let mut builder = GlobSetBuilder::new();

        for pattern in &patterns {
            let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidIgnorePattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }

        let set = builder
            .build()
            .map_err(|e| ConfigError::InvalidIgnorePattern {
                pattern: patterns.join(", "),
                source: e,
            })?;

        Ok(Self { patterns, set })
    }

    /// Default patterns plus any extra ones supplied by the user.
    pub fn with_defaults(extra: &[String]) -> Result<Self, ConfigError> {
        Self::new(
            DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .chain(extra.iter().cloned()),
        )
    }

    /// Source patterns in declaration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        if self.set.is_match(path) {
            return true;
        }
        let basename = path.rsplit('/').next().unwrap_or(path);
        basename != path && self.set.is_match(basename)
    }

    /// Split `files` into (kept, ignored), preserving order.
    pub fn partition(&self, files: &[String]) -> (Vec<String>, Vec<String>) {
        files.iter().cloned().partition(|f| !self.is_ignored(f))
    }
}
