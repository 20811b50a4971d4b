// ABOUTME: Layout tree management for cover pages.
// ABOUTME: Parses persisted layouts, assigns tile ids and answers tile queries.

mod error;
mod ids;
mod parse;
mod tree;

pub use error::LayoutError;
pub use ids::{assign_tile_ids, IdGenerator, SequentialIds, UuidIds};
pub use parse::{parse, serialize};
pub use tree::{
    collect_tiles, ContainerNode, LayoutNode, LayoutTree, TileFilter, TileNode, TileRef, TILE,
};
