// ABOUTME: Tile subsystem interfaces used by cover pages.
// ABOUTME: Tile storage, data management, text transformation and sortable reference lists.

pub mod sortable;
pub mod tile;
pub mod transform;

pub use sortable::{ContentLookup, OverrideSource, SortableEntry, SortableSelection};
pub use tile::{InMemoryTiles, TileData, TileDataManager, TileError, TileHandle, TileStore};
pub use transform::{StripTags, TextTransformer, TEXT_PLAIN};
