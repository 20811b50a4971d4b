// ABOUTME: Recursive layout tree of containers and tiles.
// ABOUTME: Supports tile enumeration, type filtering and id lookup.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::LayoutError;

/// Discriminator value of tile nodes
pub const TILE: &str = "tile";

/// A leaf referencing a tile managed by the tile subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct TileNode {
    /// Unique within the tree once assigned; templates carry tiles without ids
    pub id: Option<String>,
    pub tile_type: String,
    /// Other persisted fields, kept in their original order
    pub extra: Map<String, Value>,
}

impl TileNode {
    pub fn new(tile_type: impl Into<String>) -> Self {
        Self {
            id: None,
            tile_type: tile_type.into(),
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A row, group or any other non-tile node.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerNode {
    pub kind: String,
    /// `None` and an empty list are both leaves, but persist differently
    pub children: Option<Vec<LayoutNode>>,
    pub extra: Map<String, Value>,
}

impl ContainerNode {
    pub fn new(kind: impl Into<String>, children: Vec<LayoutNode>) -> Self {
        Self {
            kind: kind.into(),
            children: Some(children),
            extra: Map::new(),
        }
    }

    pub fn children(&self) -> &[LayoutNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub enum LayoutNode {
    Tile(TileNode),
    Container(ContainerNode),
}

impl LayoutNode {
    pub fn tile(tile_type: impl Into<String>, id: impl Into<String>) -> Self {
        LayoutNode::Tile(TileNode::new(tile_type).with_id(id))
    }

    pub fn container(kind: impl Into<String>, children: Vec<LayoutNode>) -> Self {
        LayoutNode::Container(ContainerNode::new(kind, children))
    }

    /// The persisted `type` of this node
    pub fn kind(&self) -> &str {
        match self {
            LayoutNode::Tile(_) => TILE,
            LayoutNode::Container(container) => &container.kind,
        }
    }
}

/// Persisted shape of a node, shared by tiles and containers.
#[derive(Serialize, Deserialize)]
struct RawNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "tile-type", default, skip_serializing_if = "Option::is_none")]
    tile_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<LayoutNode>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawNode> for LayoutNode {
    type Error = String;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        if raw.kind == TILE {
            let mut extra = raw.extra;
            match raw.children {
                Some(children) if !children.is_empty() => {
                    return Err(format!(
                        "tile {} cannot have children",
                        raw.id.as_deref().unwrap_or("without id")
                    ));
                }
                // an empty list is harmless, keep it so the node persists as read
                Some(_) => {
                    extra.insert("children".to_string(), Value::Array(Vec::new()));
                }
                None => {}
            }
            let tile_type = raw.tile_type.ok_or_else(|| {
                format!(
                    "tile {} has no tile-type",
                    raw.id.as_deref().unwrap_or("without id")
                )
            })?;
            return Ok(LayoutNode::Tile(TileNode {
                id: raw.id,
                tile_type,
                extra,
            }));
        }

        // Containers have no use for tile fields but must persist them untouched
        let mut extra = raw.extra;
        if let Some(id) = raw.id {
            extra.insert("id".to_string(), Value::String(id));
        }
        if let Some(tile_type) = raw.tile_type {
            extra.insert("tile-type".to_string(), Value::String(tile_type));
        }
        Ok(LayoutNode::Container(ContainerNode {
            kind: raw.kind,
            children: raw.children,
            extra,
        }))
    }
}

impl From<LayoutNode> for RawNode {
    fn from(node: LayoutNode) -> Self {
        match node {
            LayoutNode::Tile(tile) => RawNode {
                kind: TILE.to_string(),
                id: tile.id,
                tile_type: Some(tile.tile_type),
                children: None,
                extra: tile.extra,
            },
            LayoutNode::Container(container) => {
                let mut extra = container.extra;
                let id = take_string(&mut extra, "id");
                let tile_type = take_string(&mut extra, "tile-type");
                RawNode {
                    kind: container.kind,
                    id,
                    tile_type,
                    children: container.children,
                    extra,
                }
            }
        }
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(_)) => match map.remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
    }
}

/// Which tile types a query selects.
///
/// An empty `Types` set selects nothing, unlike `All`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TileFilter {
    #[default]
    All,
    Types(BTreeSet<String>),
}

impl TileFilter {
    pub fn types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TileFilter::Types(types.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, tile_type: &str) -> bool {
        match self {
            TileFilter::All => true,
            TileFilter::Types(types) => types.contains(tile_type),
        }
    }
}

impl From<&str> for TileFilter {
    fn from(tile_type: &str) -> Self {
        TileFilter::types([tile_type])
    }
}

impl From<String> for TileFilter {
    fn from(tile_type: String) -> Self {
        TileFilter::types([tile_type])
    }
}

impl From<Option<&str>> for TileFilter {
    fn from(tile_type: Option<&str>) -> Self {
        tile_type.map(TileFilter::from).unwrap_or_default()
    }
}

impl From<&[&str]> for TileFilter {
    fn from(types: &[&str]) -> Self {
        TileFilter::types(types.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for TileFilter {
    fn from(types: [&str; N]) -> Self {
        TileFilter::types(types)
    }
}

impl From<Vec<&str>> for TileFilter {
    fn from(types: Vec<&str>) -> Self {
        TileFilter::types(types)
    }
}

impl From<Vec<String>> for TileFilter {
    fn from(types: Vec<String>) -> Self {
        TileFilter::types(types)
    }
}

/// A tile found in the layout: its id and tile type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileRef {
    pub id: String,
    pub tile_type: String,
}

/// Walk `nodes` in document order, appending every selected tile to `out`.
///
/// Containers are always descended into, whatever the filter. A selected tile
/// without an id is malformed; unselected ones are never inspected.
pub fn collect_tiles(
    nodes: &[LayoutNode],
    filter: &TileFilter,
    out: &mut Vec<TileRef>,
) -> Result<(), LayoutError> {
    for node in nodes {
        match node {
            LayoutNode::Tile(tile) => {
                if !filter.matches(&tile.tile_type) {
                    continue;
                }
                let id = tile.id.as_ref().ok_or_else(|| {
                    LayoutError::Malformed(format!("tile of type `{}` has no id", tile.tile_type))
                })?;
                out.push(TileRef {
                    id: id.clone(),
                    tile_type: tile.tile_type.clone(),
                });
            }
            LayoutNode::Container(container) => {
                collect_tiles(container.children(), filter, out)?;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutTree {
    nodes: Vec<LayoutNode>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<LayoutNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<LayoutNode> {
        &mut self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All tiles selected by `filter`, in document order
    pub fn get_tiles(&self, filter: &TileFilter) -> Result<Vec<TileRef>, LayoutError> {
        let mut tiles = Vec::new();
        collect_tiles(&self.nodes, filter, &mut tiles)?;
        Ok(tiles)
    }

    /// Ids of the tiles selected by `filter`
    pub fn list_tiles(&self, filter: &TileFilter) -> Result<Vec<String>, LayoutError> {
        Ok(self
            .get_tiles(filter)?
            .into_iter()
            .map(|tile| tile.id)
            .collect())
    }

    /// Tile type of the tile carrying `id`.
    ///
    /// More than one match means the id invariant was broken and is reported
    /// as `DuplicateId` rather than picking one of them.
    pub fn tile_type(&self, id: &str) -> Result<String, LayoutError> {
        let mut matches = self
            .get_tiles(&TileFilter::All)?
            .into_iter()
            .filter(|tile| tile.id == id);

        let first = matches
            .next()
            .ok_or_else(|| LayoutError::NotFound(id.to_string()))?;
        let others = matches.count();
        if others > 0 {
            return Err(LayoutError::DuplicateId {
                id: id.to_string(),
                count: others + 1,
            });
        }
        Ok(first.tile_type)
    }
}
