// Presentation assembly: record data to HTML. Every external value enters
// the output through `Fragment`, which escapes it; handlers and the site
// builder only ever see finished fragments or whole documents.

mod detail;
mod page;
mod panel;

pub use detail::action_detail;
pub use page::{
    FacetButton, FacetGroup, STYLESHEET, detail_page, error_page, facet_controls, listing_header,
    page, search_form, tally_line,
};
pub use panel::action_panel;
