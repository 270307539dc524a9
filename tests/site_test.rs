use std::fs;
use std::path::Path;

use gh_market::catalog::CatalogSnapshot;
use gh_market::site::{SiteContext, build_site};

const FIXTURE: &str = include_str!("fixtures/actions.json");

fn fixture_context() -> SiteContext {
    let snapshot: CatalogSnapshot = serde_json::from_str(FIXTURE).unwrap();
    SiteContext::new("Test catalog".to_owned(), snapshot)
}

fn read(dir: &Path, rel: &str) -> String {
    fs::read_to_string(dir.join(rel)).unwrap_or_else(|_| panic!("missing {rel}"))
}

#[test]
fn build_writes_the_full_tree() {
    let dir = tempfile::tempdir().unwrap();
    build_site(&fixture_context(), dir.path()).unwrap();

    assert!(dir.path().join("index.html").is_file());
    assert!(dir.path().join("style.css").is_file());
    for slug in ["deploy-helper", "lint-suite", "release-notes"] {
        assert!(
            dir.path().join(format!("actions/{slug}.html")).is_file(),
            "missing detail page for {slug}"
        );
    }
}

#[test]
fn listing_shows_the_whole_catalog() {
    let dir = tempfile::tempdir().unwrap();
    build_site(&fixture_context(), dir.path()).unwrap();
    let index = read(dir.path(), "index.html");

    assert!(index.contains("<h1>Test catalog</h1>"));
    assert!(index.contains("test-gha-market"));
    assert!(index.contains("last updated 2024-03-15 09:30"));
    assert!(index.contains("Showing 3 of 3 actions"));
    assert!(index.contains("3 actions"));
    assert!(index.contains("1 private"));
    assert!(index.contains("2 public"));

    for (slug, name) in [
        ("deploy-helper", "Deploy Helper"),
        ("lint-suite", "Lint Suite"),
        ("release-notes", "Release Notes"),
    ] {
        assert!(index.contains(&format!("href=\"actions/{slug}.html\"")));
        assert!(index.contains(name));
    }
}

#[test]
fn listing_escapes_hostile_descriptions() {
    let dir = tempfile::tempdir().unwrap();
    build_site(&fixture_context(), dir.path()).unwrap();
    let index = read(dir.path(), "index.html");

    assert!(index.contains("release notes &amp; changelogs"));
    assert!(index.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!index.contains("<script>alert"));
}

#[test]
fn detail_page_renders_the_readme() {
    let dir = tempfile::tempdir().unwrap();
    build_site(&fixture_context(), dir.path()).unwrap();
    let page = read(dir.path(), "actions/deploy-helper.html");

    assert!(page.contains("<h2>Deploy Helper</h2>"));
    assert!(page.contains("<h1>Deploy Helper</h1>"));
    assert!(page.contains("<strong>zero</strong>"));
    assert!(page.contains("<pre><code>uses: test-gha-market/deploy-helper@v2"));
    assert!(page.contains(">View action.yml</a>"));
    // Detail pages live one level down, so links go back up.
    assert!(page.contains("href=\"../index.html\""));
    assert!(page.contains("href=\"../style.css\""));
}

#[test]
fn detail_page_links_the_fork_origin() {
    let dir = tempfile::tempdir().unwrap();
    build_site(&fixture_context(), dir.path()).unwrap();
    let page = read(dir.path(), "actions/lint-suite.html");

    assert!(page.contains("<h3>Forked from</h3>"));
    assert!(page.contains("href=\"https://github.com/upstream-org/lint-suite\""));
    assert!(page.contains(
        "<a href=\"https://example.com/lint\" target=\"_blank\" rel=\"noopener noreferrer\">the docs</a>"
    ));
}

#[test]
fn detail_page_tolerates_sparse_records() {
    let dir = tempfile::tempdir().unwrap();
    build_site(&fixture_context(), dir.path()).unwrap();
    let page = read(dir.path(), "actions/release-notes.html");

    // Malformed fork origin renders no fork line; a missing runtime shows
    // the sentinel.
    assert!(!page.contains("<h3>Forked from</h3>"));
    assert!(page.contains("badge-runtime\">unknown<"));
    assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!page.contains("<script>alert"));
}
