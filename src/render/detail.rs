use crate::catalog::{ActionRecord, decode_readme};
use crate::facet::UNKNOWN_RUNTIME;
use crate::html::{Fragment, is_safe_url};
use crate::markdown;

use super::panel::badge_strip;

/// Render the full detail view for one record.
///
/// Optional fields degrade by omission: no author, no section; a
/// `forkedFrom` that is not `owner/repo` renders no fork line; a download
/// url outside the link allow-list renders no link. A README that fails to
/// decode renders a scoped notice in place of the README body, leaving the
/// rest of the page intact.
pub fn action_detail(record: &ActionRecord) -> Fragment {
    let mut f = Fragment::new();
    f.markup("<article class=\"detail\" id=\"");
    f.text(&record.repo);
    f.markup("\">\n<h2>");
    f.text(&record.name);
    f.markup("</h2>\n");
    f.fragment(&badge_strip(
        record.effective_visibility(),
        record.is_fork,
        record.is_archived,
        record.using.as_deref().unwrap_or(UNKNOWN_RUNTIME),
    ));

    f.markup("<div class=\"section\"><h3>Description</h3><p>");
    f.text(&record.description);
    f.markup("</p></div>\n");

    f.markup("<div class=\"section\"><h3>Repository</h3><p><a href=\"");
    f.text(&record.repo_url());
    f.markup("\" target=\"_blank\" rel=\"noopener noreferrer\">");
    f.text(&record.owner);
    f.markup("/");
    f.text(&record.repo);
    f.markup("</a></p></div>\n");

    if let Some(author) = record.author.as_deref() {
        f.markup("<div class=\"section\"><h3>Author</h3><p>");
        f.text(author);
        f.markup("</p></div>\n");
    }

    if let Some(path) = record.path.as_deref() {
        f.markup("<div class=\"section\"><h3>Path</h3><p><code>");
        f.text(path);
        f.markup("</code></p></div>\n");
    }

    if let Some((owner, repo)) = record.forked_from_parts() {
        f.markup("<div class=\"section\"><h3>Forked from</h3><p><a href=\"");
        f.text(&format!("https://github.com/{owner}/{repo}"));
        f.markup("\" target=\"_blank\" rel=\"noopener noreferrer\">");
        f.text(owner);
        f.markup("/");
        f.text(repo);
        f.markup("</a></p></div>\n");
    }

    if let Some(url) = record.download_url.as_deref()
        && is_safe_url(url)
    {
        f.markup("<div class=\"section\"><h3>Action file</h3><p><a href=\"");
        f.text(url);
        f.markup("\" target=\"_blank\" rel=\"noopener noreferrer\">View action.yml</a></p></div>\n");
    }

    if let Some(payload) = record.readme.as_deref() {
        f.markup("<div class=\"section readme\"><h3>README</h3>\n");
        match decode_readme(payload) {
            Ok(source) => {
                f.fragment(&markdown::render(&source));
            }
            Err(err) => {
                tracing::warn!("readme for {} did not decode: {err}", record.repo);
                f.markup("<p class=\"readme-error\">README could not be decoded.</p>\n");
            }
        }
        f.markup("</div>\n");
    }

    f.markup("</article>\n");
    f
}
