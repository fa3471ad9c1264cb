//! Commit message normalization for display.

/// Conventional-commit prefixes removed before display, checked in order.
pub const COMMIT_PREFIXES: &[&str] = &[
    "feat:", "fix:", "chore:", "docs:", "style:", "refactor:", "perf:", "test:",
];

/// Normalize a commit subject for a report bullet.
///
/// Strips at most one prefix from [`COMMIT_PREFIXES`] (case-insensitive),
/// trims whitespace and upper-cases the first character.
pub fn format_message(message: &str) -> String {
    let stripped = COMMIT_PREFIXES
        .iter()
        .find_map(|prefix| {
            message
                .get(..prefix.len())
                .filter(|head| head.eq_ignore_ascii_case(prefix))
                .map(|_| &message[prefix.len()..])
        })
        .unwrap_or(message)
        .trim();

    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
