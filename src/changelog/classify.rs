//! Keyword-based commit classification.

use crate::git::CommitRecord;

use super::category::Category;

/// Commits whose message contains any of these are dropped entirely.
pub const SKIP_KEYWORDS: &[&str] = &["merge", "version", "版本", "release"];

/// Classification rules, evaluated in order; the first matching rule wins.
///
/// This order is independent of the display order in [`Category::ALL`]:
/// documentation is tested before styling and configuration.
pub const CLASSIFICATION_RULES: &[(Category, &[&str])] = &[
    (
        Category::NewFeatures,
        &["新增", "添加", "add", "feat", "feature", "功能", "new", "implement", "支持"],
    ),
    (
        Category::BugFixes,
        &["修复", "修正", "fix", "bug", "问题", "issue", "错误", "resolve", "hotfix"],
    ),
    (
        Category::Performance,
        &["优化", "性能", "perf", "performance", "提升", "改进", "improve", "optimize", "加速"],
    ),
    (
        Category::Refactoring,
        &["重构", "refactor", "调整", "重写", "rewrite", "restructure", "改造"],
    ),
    (
        Category::Documentation,
        &["文档", "doc", "documentation", "注释", "comment", "readme", "changelog"],
    ),
    (
        Category::Styling,
        &["样式", "style", "css", "ui", "界面", "美化", "format", "布局"],
    ),
    (
        Category::Configuration,
        &["配置", "config", "configuration", "设置", "setting", "build", "ci", "chore", "deps"],
    ),
];

/// Commits grouped by category.
///
/// Each non-skipped input commit appears in exactly one bucket, in input
/// order. Skipped commits are only counted.
#[derive(Debug, Clone)]
pub struct ClassificationResult<'a> {
    buckets: [Vec<&'a CommitRecord>; Category::ALL.len()],
    skipped: usize,
}

impl<'a> ClassificationResult<'a> {
    fn empty() -> Self {
        Self {
            buckets: Default::default(),
            skipped: 0,
        }
    }

    /// Commits assigned to `category`.
    pub fn get(&self, category: Category) -> &[&'a CommitRecord] {
        &self.buckets[category.order()]
    }

    /// Non-empty categories in display order.
    pub fn sections(&self) -> impl Iterator<Item = (Category, &[&'a CommitRecord])> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.get(c)))
            .filter(|(_, commits)| !commits.is_empty())
    }

    /// Number of classified (non-skipped) commits.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Whether the message marks a commit as noise (merges, version bumps).
pub fn should_skip(message: &str) -> bool {
    let lower = message.to_lowercase();
    SKIP_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Category for a single message, ignoring skip rules.
pub fn categorize(message: &str) -> Category {
    let lower = message.to_lowercase();
    CLASSIFICATION_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Others)
}

/// Classify commits by message keywords.
pub fn classify(commits: &[CommitRecord]) -> ClassificationResult<'_> {
    let mut result = ClassificationResult::empty();

    for commit in commits {
        if should_skip(&commit.message) {
            result.skipped += 1;
            continue;
        }
        let category = categorize(&commit.message);
        result.buckets[category.order()].push(commit);
    }

    result
}
