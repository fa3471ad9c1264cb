//! Commit classification, the basic categorized report and file output.

pub mod category;
pub mod classify;
pub mod format;
pub mod report;
pub mod writer;

pub use category::Category;
pub use classify::{ClassificationResult, classify};
pub use format::format_message;
pub use report::{NO_CHANGES_NOTICE, build_basic, details_block};
pub use writer::write_changelog;
