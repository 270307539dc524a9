use crate::catalog::{ActionRecord, CatalogSnapshot};
use crate::facet::FacetTally;
use crate::html::Fragment;

use super::detail::action_detail;

/// Shared stylesheet, written to `style.css` by the site builder and served
/// at `/style.css` by the server.
pub const STYLESHEET: &str = r#"* { box-sizing: border-box; }
body {
  margin: 0 auto;
  max-width: 56rem;
  padding: 1rem 1.5rem 3rem;
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
  color: #1f2328;
  background: #f6f8fa;
  line-height: 1.5;
}
a { color: #0969da; text-decoration: none; }
a:hover { text-decoration: underline; }
header h1 { margin-bottom: 0.25rem; }
.meta, .count, .tally { color: #57606a; font-size: 0.9rem; margin: 0.15rem 0; }
.search { margin: 1rem 0; display: flex; gap: 0.5rem; }
.search input[type="search"] {
  flex: 1;
  padding: 0.45rem 0.6rem;
  border: 1px solid #d0d7de;
  border-radius: 6px;
}
.search button {
  padding: 0.45rem 0.9rem;
  border: 1px solid #d0d7de;
  border-radius: 6px;
  background: #fff;
  cursor: pointer;
}
.facets { margin: 0.5rem 0 1.5rem; }
.facet-group { margin: 0.3rem 0; }
.facet-title { color: #57606a; font-size: 0.85rem; margin-right: 0.5rem; }
.facet {
  display: inline-block;
  margin: 0.1rem 0.25rem 0.1rem 0;
  padding: 0.15rem 0.6rem;
  border: 1px solid #d0d7de;
  border-radius: 2rem;
  background: #fff;
  font-size: 0.85rem;
}
.facet.active { background: #0969da; border-color: #0969da; color: #fff; }
.facet.active .facet-count { color: #d0e3ff; }
.facet-count { color: #57606a; }
.facet.clear { border-style: dashed; }
.panel, .detail {
  background: #fff;
  border: 1px solid #d0d7de;
  border-radius: 6px;
  padding: 1rem 1.25rem;
  margin-bottom: 1rem;
}
.line { margin: 0.15rem 0; }
.label { color: #57606a; }
.badges { margin-top: 0.5rem; }
.badge {
  display: inline-block;
  margin-right: 0.4rem;
  padding: 0.05rem 0.55rem;
  border-radius: 2rem;
  font-size: 0.78rem;
  background: #eaeef2;
  color: #57606a;
}
.badge-private { background: #fff8c5; color: #7d4e00; }
.badge-internal { background: #ddf4ff; color: #0a3069; }
.badge-archived { background: #ffebe9; color: #a40e26; }
.badge-fork { background: #ddf4ff; color: #0a3069; }
.detail .section { margin-top: 1rem; }
.detail h3 { margin: 0 0 0.25rem; font-size: 1rem; color: #57606a; }
.detail-error { text-align: center; padding: 3rem 0; }
.readme pre {
  background: #f6f8fa;
  border-radius: 6px;
  padding: 0.75rem;
  overflow-x: auto;
}
.readme code { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; font-size: 0.9em; }
.readme-error { color: #a40e26; }
.back { margin-bottom: 1rem; }
"#;

/// Wrap `body` in the shared document shell.
pub fn page(title: &str, stylesheet_href: &str, body: &Fragment) -> String {
    let mut doc = Fragment::new();
    doc.markup(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>",
    );
    doc.text(title);
    doc.markup("</title>\n<link rel=\"stylesheet\" href=\"");
    doc.text(stylesheet_href);
    doc.markup("\">\n</head>\n<body>\n");
    doc.fragment(body);
    doc.markup("</body>\n</html>\n");
    doc.into_string()
}

/// Listing page header with feed provenance and the shown/total count.
pub fn listing_header(
    site_title: &str,
    snapshot: &CatalogSnapshot,
    shown: usize,
    total: usize,
) -> Fragment {
    let mut f = Fragment::new();
    f.markup("<header>\n<h1>");
    f.text(site_title);
    f.markup("</h1>\n<p class=\"meta\">");
    if let Some(owner) = snapshot.owner_label() {
        f.text(owner);
        f.markup(" &middot; ");
    }
    f.markup("last updated ");
    // A stamp the feed got wrong is shown raw rather than dropped.
    let updated = match snapshot.parsed_last_updated() {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => snapshot.last_updated.clone(),
    };
    f.text(&updated);
    f.markup("</p>\n");
    f.markup(&format!(
        "<p class=\"count\">Showing {shown} of {total} actions</p>\n</header>\n"
    ));
    f
}

/// One-line catalog composition summary from the load-time tally.
pub fn tally_line(tally: &FacetTally) -> Fragment {
    let mut f = Fragment::new();
    f.markup("<p class=\"tally\">");
    f.markup(&format!("{} actions", tally.total));
    for (visibility, count) in &tally.visibility {
        f.markup(&format!(" &middot; {count} {}", visibility.as_str()));
    }
    f.markup(&format!(" &middot; {} forks", tally.forks));
    f.markup(&format!(" &middot; {} archived", tally.archived));
    for (family, count) in &tally.runtimes {
        f.markup(&format!(" &middot; {count} "));
        f.text(family);
    }
    f.markup("</p>\n");
    f
}

/// The search form. `hidden` carries the active facet selections as hidden
/// fields so submitting a term does not drop them.
pub fn search_form(term: &str, hidden: &[(&str, String)]) -> Fragment {
    let mut f = Fragment::new();
    f.markup(
        "<form class=\"search\" method=\"get\" action=\"/\">\n\
         <input type=\"search\" name=\"q\" placeholder=\"Search actions\" value=\"",
    );
    f.text(term);
    f.markup("\">\n");
    for (name, value) in hidden {
        f.markup("<input type=\"hidden\" name=\"");
        f.text(name);
        f.markup("\" value=\"");
        f.text(value);
        f.markup("\">\n");
    }
    f.markup("<button type=\"submit\">Search</button>\n</form>\n");
    f
}

// ---------------------------------------------------------------------------
// Facet controls
// ---------------------------------------------------------------------------

/// One facet filter control: a link to the state reached by toggling the
/// value it stands for.
#[derive(Debug, Clone)]
pub struct FacetButton {
    pub label: String,
    pub count: usize,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct FacetGroup {
    pub title: &'static str,
    pub buttons: Vec<FacetButton>,
}

pub fn facet_controls(groups: &[FacetGroup], clear_href: Option<&str>) -> Fragment {
    let mut f = Fragment::new();
    f.markup("<nav class=\"facets\">\n");
    for group in groups {
        f.markup("<div class=\"facet-group\"><span class=\"facet-title\">");
        f.text(group.title);
        f.markup("</span>");
        for button in &group.buttons {
            f.markup(if button.active {
                "<a class=\"facet active\" href=\""
            } else {
                "<a class=\"facet\" href=\""
            });
            f.text(&button.href);
            f.markup("\">");
            f.text(&button.label);
            f.markup(&format!(
                " <span class=\"facet-count\">{}</span></a>",
                button.count
            ));
        }
        f.markup("</div>\n");
    }
    if let Some(href) = clear_href {
        f.markup("<a class=\"facet clear\" href=\"");
        f.text(href);
        f.markup("\">Clear filters</a>\n");
    }
    f.markup("</nav>\n");
    f
}

// ---------------------------------------------------------------------------
// Whole documents
// ---------------------------------------------------------------------------

/// Detail page for one record.
pub fn detail_page(
    site_title: &str,
    record: &ActionRecord,
    listing_href: &str,
    stylesheet_href: &str,
) -> String {
    let mut body = Fragment::new();
    body.markup("<p class=\"back\"><a href=\"");
    body.text(listing_href);
    body.markup("\">&larr; All actions</a></p>\n");
    body.fragment(&action_detail(record));
    let title = format!("{} - {site_title}", record.name);
    page(&title, stylesheet_href, &body)
}

/// Full-page notice for a detail request that cannot be served, with a way
/// back to the listing.
pub fn error_page(
    site_title: &str,
    message: &str,
    listing_href: &str,
    stylesheet_href: &str,
) -> String {
    let mut body = Fragment::new();
    body.markup("<div class=\"detail-error\"><p>");
    body.text(message);
    body.markup("</p>\n<p><a href=\"");
    body.text(listing_href);
    body.markup("\">Return to the catalog</a></p>\n</div>\n");
    page(site_title, stylesheet_href, &body)
}
