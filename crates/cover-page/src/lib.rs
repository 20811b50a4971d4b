// ABOUTME: The composable cover page content object.
// ABOUTME: Resolves layout tiles, initializes layouts from templates and builds searchable text.

pub mod events;
pub mod indexer;
pub mod page;

pub use events::on_added;
pub use indexer::{reindex, searchable_text, Catalog, SEARCHABLE_TEXT_INDEX};
pub use page::{Cover, PageError};
