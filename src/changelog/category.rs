//! Changelog categories.

/// Display categories for classified commits.
///
/// Variant order is the rendering order of the basic report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    NewFeatures,
    BugFixes,
    Performance,
    Refactoring,
    Styling,
    Configuration,
    Documentation,
    Others,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 8] = [
        Category::NewFeatures,
        Category::BugFixes,
        Category::Performance,
        Category::Refactoring,
        Category::Styling,
        Category::Configuration,
        Category::Documentation,
        Category::Others,
    ];

    /// Heading shown in the report.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NewFeatures => "✨ New Features",
            Self::BugFixes => "🐛 Bug Fixes",
            Self::Performance => "⚡ Performance",
            Self::Refactoring => "🔨 Refactoring",
            Self::Styling => "🎨 Styling",
            Self::Configuration => "🔧 Configuration",
            Self::Documentation => "📝 Documentation",
            Self::Others => "📦 Other Changes",
        }
    }

    /// Position in display order.
    pub fn order(&self) -> usize {
        match self {
            Self::NewFeatures => 0,
            Self::BugFixes => 1,
            Self::Performance => 2,
            Self::Refactoring => 3,
            Self::Styling => 4,
            Self::Configuration => 5,
            Self::Documentation => 6,
            Self::Others => 7,
        }
    }
}
