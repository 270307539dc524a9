use std::path::Path;

use anyhow::{Context, Result};

use crate::catalog::CatalogSnapshot;
use crate::facet::{FacetIndex, FacetTally, index_records};
use crate::html::Fragment;
use crate::render;

/// Everything derived from one loaded snapshot, computed once and immutable
/// afterwards. Both output modes hang off this; there is no other
/// load-scoped state.
pub struct SiteContext {
    pub title: String,
    pub snapshot: CatalogSnapshot,
    pub indexes: Vec<FacetIndex>,
    pub tally: FacetTally,
}

impl SiteContext {
    pub fn new(title: String, snapshot: CatalogSnapshot) -> Self {
        let indexes = index_records(&snapshot.actions);
        let tally = FacetTally::tally(&indexes);
        Self {
            title,
            snapshot,
            indexes,
            tally,
        }
    }
}

/// Filesystem-safe detail page name for a repo: ASCII alphanumerics, `.`,
/// `_`, and `-` pass through, anything else becomes `-`.
pub fn slug(repo: &str) -> String {
    repo.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Write the static site: `index.html`, one `actions/<slug>.html` per
/// record, and the stylesheet.
pub fn build_site(ctx: &SiteContext, out_dir: &Path) -> Result<()> {
    let actions_dir = out_dir.join("actions");
    std::fs::create_dir_all(&actions_dir)
        .with_context(|| format!("creating {}", actions_dir.display()))?;

    let css_path = out_dir.join("style.css");
    std::fs::write(&css_path, render::STYLESHEET)
        .with_context(|| format!("writing {}", css_path.display()))?;

    let index_path = out_dir.join("index.html");
    std::fs::write(&index_path, static_listing(ctx))
        .with_context(|| format!("writing {}", index_path.display()))?;

    for record in &ctx.snapshot.actions {
        let path = actions_dir.join(format!("{}.html", slug(&record.repo)));
        let page = render::detail_page(&ctx.title, record, "../index.html", "../style.css");
        std::fs::write(&path, page).with_context(|| format!("writing {}", path.display()))?;
    }

    tracing::info!(
        "wrote listing and {} detail pages to {}",
        ctx.snapshot.actions.len(),
        out_dir.display()
    );
    Ok(())
}

/// The static listing shows the whole catalog; filtering needs the server.
fn static_listing(ctx: &SiteContext) -> String {
    let total = ctx.snapshot.actions.len();
    let mut body = Fragment::new();
    body.fragment(&render::listing_header(
        &ctx.title,
        &ctx.snapshot,
        total,
        total,
    ));
    body.fragment(&render::tally_line(&ctx.tally));
    for (record, entry) in ctx.snapshot.actions.iter().zip(&ctx.indexes) {
        let href = format!("actions/{}.html", slug(&record.repo));
        body.fragment(&render::action_panel(record, entry, &href));
    }
    render::page(&ctx.title, "style.css", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_passes_safe_chars_through() {
        assert_eq!(slug("deploy-helper"), "deploy-helper");
        assert_eq!(slug("My_Action.v2"), "My_Action.v2");
    }

    #[test]
    fn slug_replaces_everything_else() {
        assert_eq!(slug("a/b c"), "a-b-c");
        assert_eq!(slug("naïve"), "na-ve");
        assert_eq!(slug("../../etc/passwd"), "..-..-etc-passwd");
    }
}
