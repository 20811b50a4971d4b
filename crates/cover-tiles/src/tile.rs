// ABOUTME: Tile handles and the storage seams of the tile subsystem.
// ABOUTME: Includes an in-memory store used by tools and tests.

use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Arbitrary key/value data held by a tile
pub type TileData = Map<String, Value>;

/// A live tile resolved from its type and id
#[derive(Debug, Clone, PartialEq)]
pub struct TileHandle {
    pub tile_type: String,
    pub id: String,
    pub data: TileData,
}

impl TileHandle {
    /// A string field of the tile data
    pub fn text(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TileError {
    #[error("Unknown tile type: {0}")]
    UnknownType(String),

    #[error("Tile {tile_type}/{id} is not available")]
    Missing { tile_type: String, id: String },

    #[error("Tile subsystem error: {0}")]
    Subsystem(String),
}

/// Resolves `(tile type, id)` pairs to live tiles
pub trait TileStore {
    fn tile(&self, tile_type: &str, id: &str) -> Result<TileHandle, TileError>;
}

/// Persists data onto a tile, replacing what it held
pub trait TileDataManager {
    fn set(&mut self, tile: &TileHandle, data: TileData) -> Result<(), TileError>;
}

/// Tiles kept in a map, keyed by type and id.
///
/// Any id of a registered type resolves; tiles that were never written have
/// empty data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTiles {
    types: HashSet<String>,
    tiles: HashMap<(String, String), TileData>,
}

impl InMemoryTiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            tiles: HashMap::new(),
        }
    }

    /// Store data for a tile, registering its type
    pub fn insert(&mut self, tile_type: impl Into<String>, id: impl Into<String>, data: TileData) {
        let tile_type = tile_type.into();
        self.types.insert(tile_type.clone());
        self.tiles.insert((tile_type, id.into()), data);
    }

    pub fn data(&self, tile_type: &str, id: &str) -> Option<&TileData> {
        self.tiles.get(&(tile_type.to_string(), id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl TileStore for InMemoryTiles {
    fn tile(&self, tile_type: &str, id: &str) -> Result<TileHandle, TileError> {
        if !self.types.contains(tile_type) {
            return Err(TileError::UnknownType(tile_type.to_string()));
        }
        Ok(TileHandle {
            tile_type: tile_type.to_string(),
            id: id.to_string(),
            data: self.data(tile_type, id).cloned().unwrap_or_default(),
        })
    }
}

impl TileDataManager for InMemoryTiles {
    fn set(&mut self, tile: &TileHandle, data: TileData) -> Result<(), TileError> {
        if !self.types.contains(&tile.tile_type) {
            return Err(TileError::Missing {
                tile_type: tile.tile_type.clone(),
                id: tile.id.clone(),
            });
        }
        tracing::debug!("Writing {} fields to tile {}/{}", data.len(), tile.tile_type, tile.id);
        self.tiles
            .insert((tile.tile_type.clone(), tile.id.clone()), data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> TileData {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn unwritten_tile_has_empty_data() {
        let tiles = InMemoryTiles::with_types(["collective.cover.basic"]);
        let tile = tiles.tile("collective.cover.basic", "abc").unwrap();
        assert_eq!(tile.id, "abc");
        assert!(tile.data.is_empty());
    }

    #[test]
    fn unknown_type_is_an_error() {
        let tiles = InMemoryTiles::new();
        let err = tiles.tile("nope", "abc").unwrap_err();
        assert!(matches!(err, TileError::UnknownType(t) if t == "nope"));
    }

    #[test]
    fn set_replaces_data() {
        let mut tiles = InMemoryTiles::new();
        tiles.insert("basic", "t1", data(json!({"title": "old", "uuid": "u1"})));

        let handle = tiles.tile("basic", "t1").unwrap();
        tiles.set(&handle, data(json!({"title": "new"}))).unwrap();

        let tile = tiles.tile("basic", "t1").unwrap();
        assert_eq!(tile.text("title"), Some("new"));
        assert!(tile.data.get("uuid").is_none());
        assert_eq!(tiles.len(), 1);
    }
}
