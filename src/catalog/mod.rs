// Catalog wire model, shared by the feed client and both output modes.

mod record;
mod snapshot;

pub use record::{ActionRecord, ReadmeError, Visibility, decode_readme};
pub use snapshot::{CatalogSnapshot, TimestampError, parse_last_updated};
