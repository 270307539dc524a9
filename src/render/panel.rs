use crate::catalog::{ActionRecord, Visibility};
use crate::facet::{FacetIndex, runtime_family};
use crate::html::Fragment;

/// Render one listing panel.
///
/// The panel is keyed by `repo`, the stable identity shared with the detail
/// lookup. `detail_href` points at the action's detail page; the caller owns
/// link layout, since static pages and the server disagree on where details
/// live.
pub fn action_panel(record: &ActionRecord, entry: &FacetIndex, detail_href: &str) -> Fragment {
    let mut f = Fragment::new();
    f.markup("<div class=\"panel\" id=\"");
    f.text(&record.repo);
    f.markup("\">\n");

    f.markup("<div class=\"line\"><span class=\"label\">Action:</span> <span class=\"value\"><a href=\"");
    f.text(detail_href);
    f.markup("\">");
    f.text(&record.name);
    f.markup("</a></span></div>\n");

    f.markup("<div class=\"line\"><span class=\"label\">Repository:</span> <span class=\"value\"><a href=\"");
    f.text(&record.repo_url());
    f.markup("\" target=\"_blank\" rel=\"noopener noreferrer\">");
    f.text(&record.owner);
    f.markup("/");
    f.text(&record.repo);
    f.markup("</a></span></div>\n");

    f.markup("<div class=\"line\"><span class=\"label\">Author:</span> <span class=\"value\">");
    f.text(record.author.as_deref().unwrap_or("Not set"));
    f.markup("</span></div>\n");

    f.markup("<div class=\"line\"><span class=\"label\">Description:</span> <span class=\"value\">");
    f.text(&record.description);
    f.markup("</span></div>\n");

    f.fragment(&badge_strip(
        entry.visibility,
        entry.is_fork,
        entry.is_archived,
        runtime_family(&entry.runtime),
    ));
    f.markup("</div>\n");
    f
}

/// The badge row shared by panels and detail pages. `runtime` is whatever
/// granularity the caller displays (family on panels, raw kind on details).
pub(super) fn badge_strip(
    visibility: Visibility,
    is_fork: bool,
    is_archived: bool,
    runtime: &str,
) -> Fragment {
    let mut f = Fragment::new();
    f.markup("<div class=\"badges\">");
    f.markup(&format!(
        "<span class=\"badge badge-{}\">{}</span>",
        visibility.as_str(),
        visibility.label()
    ));
    if is_fork {
        f.markup("<span class=\"badge badge-fork\">Fork</span>");
    }
    if is_archived {
        f.markup("<span class=\"badge badge-archived\">Archived</span>");
    }
    f.markup("<span class=\"badge badge-runtime\">");
    f.text(runtime);
    f.markup("</span></div>\n");
    f
}
