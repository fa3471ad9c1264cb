//! Integration tests for the git2-backed VCS source.

mod common;

use changelog_ai::git::{GitSource, VcsSource, is_repository, select_recent};
use changelog_ai::pipeline::{ChangelogRequest, Mode, generate_changelog};
use changelog_ai::{IgnoreRules, Provider, ProviderConfig};
use common::{DAY, JAN_1_2024, StubCompleter, TestRepo};

/// v1.0.0 on the first commit, v1.1.0 three commits later.
fn release_repo() -> TestRepo {
    let repo = TestRepo::new();
    let base = repo.commit_at("initial import", "src/lib.rs", "fn a() {}\n", JAN_1_2024);
    repo.tag_lightweight("v1.0.0", base);

    repo.commit_at(
        "feat: add export",
        "src/export.rs",
        "pub fn export() {}\n",
        JAN_1_2024 + DAY,
    );
    repo.commit_at(
        "docs: update changelog",
        "CHANGELOG.md",
        "# Changelog\n",
        JAN_1_2024 + 2 * DAY,
    );
    let head = repo.commit_at(
        "fix: handle empty input",
        "src/lib.rs",
        "fn a() { if true {} }\n",
        JAN_1_2024 + 4 * DAY,
    );
    repo.tag_lightweight("v1.1.0", head);

    repo
}

#[test]
fn test_commits_between_is_newest_first() {
    let repo = release_repo();
    let source = GitSource::open(repo.path()).unwrap();

    let commits = source.commits_between("v1.0.0", "v1.1.0").unwrap();
    let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();

    assert_eq!(
        messages,
        vec!["fix: handle empty input", "docs: update changelog", "feat: add export"]
    );
    assert_eq!(commits[0].date, "2024-01-05");
    assert_eq!(commits[2].date, "2024-01-02");
    assert_eq!(commits[0].author, "Test User");
    assert_eq!(commits[0].hash.len(), 40);
}

#[test]
fn test_identical_refs_have_no_commits() {
    let repo = release_repo();
    let source = GitSource::open(repo.path()).unwrap();

    assert!(source.commits_between("v1.0.0", "v1.0.0").unwrap().is_empty());
}

#[test]
fn test_changed_files_include_ignored_paths() {
    let repo = release_repo();
    let source = GitSource::open(repo.path()).unwrap();

    let mut files = source.changed_files("v1.0.0", "v1.1.0").unwrap();
    files.sort();

    assert_eq!(files, vec!["CHANGELOG.md", "src/export.rs", "src/lib.rs"]);
}

#[test]
fn test_diff_is_scoped_to_given_files() {
    let repo = release_repo();
    let source = GitSource::open(repo.path()).unwrap();
    let files = vec!["src/lib.rs".to_string()];

    let diff = source.diff_text("v1.0.0", "v1.1.0", &files).unwrap();
    assert!(diff.contains("+fn a() { if true {} }"));
    assert!(diff.contains("-fn a() {}"));
    assert!(!diff.contains("export"));

    let stat = source.diff_stat("v1.0.0", "v1.1.0", &files).unwrap();
    assert!(stat.contains("src/lib.rs"));
    assert!(stat.contains("1 file changed"));
    assert!(!stat.contains("CHANGELOG.md"));
}

#[test]
fn test_empty_file_list_gives_empty_diff() {
    let repo = release_repo();
    let source = GitSource::open(repo.path()).unwrap();

    assert_eq!(source.diff_text("v1.0.0", "v1.1.0", &[]).unwrap(), "");
    assert_eq!(source.diff_stat("v1.0.0", "v1.1.0", &[]).unwrap(), "");
}

#[test]
fn test_diff_line_cap() {
    let repo = TestRepo::new();
    let base = repo.commit_at("initial", "data.txt", "", JAN_1_2024);
    repo.tag_lightweight("start", base);
    let body: String = (0..50).map(|i| format!("line {}\n", i)).collect();
    let head = repo.commit_at("add data", "data.txt", &body, JAN_1_2024 + DAY);
    repo.tag_lightweight("end", head);

    let source = GitSource::open(repo.path()).unwrap().with_max_diff_lines(10);
    let diff = source
        .diff_text("start", "end", &["data.txt".to_string()])
        .unwrap();

    assert!(diff.contains("... (diff too long, truncated, total"));
    assert!(!diff.contains("+line 49"));
}

#[test]
fn test_list_tags_newest_first() {
    let repo = TestRepo::new();
    let first = repo.commit_at("one", "a.txt", "1", JAN_1_2024);
    let second = repo.commit_at("two", "a.txt", "2", JAN_1_2024 + DAY);
    let third = repo.commit_at("three", "a.txt", "3", JAN_1_2024 + 2 * DAY);

    repo.tag_lightweight("v0.1.0", first);
    repo.tag_lightweight("v0.3.0", third);
    // Annotated tags are dated by the tagger, not the commit
    repo.tag_annotated_at("v0.2.0", second, JAN_1_2024 + 10 * DAY);

    let source = GitSource::open(repo.path()).unwrap();
    let tags = source.list_tags().unwrap();

    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["v0.2.0", "v0.3.0", "v0.1.0"]);
    assert_eq!(tags[0].date, "2024-01-11");
    assert_eq!(tags[2].date, "2024-01-01");

    let (from, to) = select_recent(&tags, 2).unwrap();
    assert_eq!(from.name, "v0.3.0");
    assert_eq!(to.name, "v0.2.0");
}

#[test]
fn test_ci_tag_uses_embedded_timestamp() {
    let repo = TestRepo::new();
    let oid = repo.commit_at("build", "a.txt", "1", JAN_1_2024);
    repo.tag_lightweight("web-rc_ci_202403151045", oid);

    let source = GitSource::open(repo.path()).unwrap();
    let tags = source.list_tags().unwrap();

    assert_eq!(tags[0].date, "2024-03-15 10:45");
}

#[test]
fn test_ref_exists() {
    let repo = release_repo();
    let source = GitSource::open(repo.path()).unwrap();

    assert!(source.ref_exists("v1.0.0"));
    assert!(source.ref_exists("HEAD"));
    assert!(!source.ref_exists("v9.9.9"));
}

#[test]
fn test_is_repository() {
    let repo = release_repo();
    assert!(is_repository(repo.path()));

    let plain = tempfile::tempdir().unwrap();
    assert!(!is_repository(plain.path()));
}

#[tokio::test]
async fn test_basic_changelog_from_real_repository() {
    let repo = release_repo();
    let source = GitSource::open(repo.path()).unwrap();
    let completer = StubCompleter::failing();

    let request = ChangelogRequest {
        from_ref: "v1.0.0".to_string(),
        to_ref: "v1.1.0".to_string(),
        mode: Mode::Basic,
        verbose: false,
        provider: ProviderConfig::new(Provider::Gemini),
        ignore: IgnoreRules::with_defaults(&[]).unwrap(),
    };

    let mut diagnostics = Vec::new();
    let doc = generate_changelog(&source, &completer, &request, &mut diagnostics)
        .await
        .unwrap();

    assert!(doc.starts_with(
        "# Changelog\n\n**v1.0.0 → v1.1.0**\n\n📅 Change period: 2024-01-02 ~ 2024-01-05\n\n"
    ));
    assert!(doc.contains("## ✨ New Features\n\n- Add export"));
    assert!(doc.contains("## 🐛 Bug Fixes\n\n- Handle empty input"));
    assert!(doc.contains("## 📝 Documentation\n\n- Update changelog"));
    // CHANGELOG.md is ignored, so only two files count
    assert!(doc.contains("**Change stats**: 3 changes across 2 files"));
    assert!(!doc.contains("CHANGELOG.md |"));
    assert_eq!(completer.calls(), 0);
}
