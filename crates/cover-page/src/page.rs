// ABOUTME: Cover page object owning a persisted layout.
// ABOUTME: Enumerates, filters and resolves the tiles placed on the page.

use serde::{Deserialize, Serialize};

use cover_core::RefreshSettings;
use cover_layout::{
    collect_tiles, LayoutError, LayoutNode, LayoutTree, TileFilter, TileRef,
};
use cover_tiles::{TileData, TileDataManager, TileError, TileHandle, TileStore};

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Tile(#[from] TileError),
}

impl PageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PageError::Layout(LayoutError::NotFound(_)))
    }
}

/// A composable page.
///
/// The layout is kept in its persisted text form and parsed again on every
/// query, so edits to `cover_layout` are always seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Persisted layout JSON; `None` until the page is initialized
    #[serde(default)]
    pub cover_layout: Option<String>,
    /// Name of the template the layout is initialized from
    #[serde(default)]
    pub template_layout: Option<String>,
    /// Present when the refresh behavior is enabled for the page type
    #[serde(default)]
    pub refresh_behavior: Option<RefreshSettings>,
}

impl Cover {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template_layout = Some(template.into());
        self
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.cover_layout = Some(layout.into());
        self
    }

    /// Whether the page should reload itself; false without the refresh behavior
    pub fn refresh(&self) -> bool {
        self.refresh_behavior
            .as_ref()
            .is_some_and(|behavior| behavior.enable_refresh)
    }

    /// Parse the current layout; a page without one has an empty layout
    pub fn layout(&self) -> Result<LayoutTree, PageError> {
        match cover_layout::parse(self.cover_layout.as_deref()) {
            Ok(tree) => Ok(tree),
            Err(LayoutError::Empty) => {
                tracing::debug!("cover_layout of {} was empty", self.id);
                Ok(LayoutTree::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Store `tree` as the page's layout
    pub fn set_layout(&mut self, tree: &LayoutTree) -> Result<(), PageError> {
        self.cover_layout = Some(cover_layout::serialize(tree)?);
        Ok(())
    }

    /// Tiles on the page selected by `types`, in document order
    pub fn get_tiles(&self, types: impl Into<TileFilter>) -> Result<Vec<TileRef>, PageError> {
        Ok(self.layout()?.get_tiles(&types.into())?)
    }

    /// Tiles selected by `types` within an already parsed part of the layout
    pub fn get_tiles_in(
        &self,
        types: impl Into<TileFilter>,
        layout: &[LayoutNode],
    ) -> Result<Vec<TileRef>, PageError> {
        let mut tiles = Vec::new();
        collect_tiles(layout, &types.into(), &mut tiles)?;
        Ok(tiles)
    }

    /// Ids of the tiles selected by `types`
    pub fn list_tiles(&self, types: impl Into<TileFilter>) -> Result<Vec<String>, PageError> {
        Ok(self
            .get_tiles(types)?
            .into_iter()
            .map(|tile| tile.id)
            .collect())
    }

    /// Tile type of the tile `id`
    pub fn get_tile_type(&self, id: &str) -> Result<String, PageError> {
        Ok(self.layout()?.tile_type(id)?)
    }

    /// Resolve tile `id` through the tile subsystem
    pub fn get_tile(&self, id: &str, store: &impl TileStore) -> Result<TileHandle, PageError> {
        let tile_type = self.get_tile_type(id)?;
        Ok(store.tile(&tile_type, id)?)
    }

    /// Write `data` onto tile `id`
    pub fn set_tile_data<T>(&self, id: &str, data: TileData, tiles: &mut T) -> Result<(), PageError>
    where
        T: TileStore + TileDataManager,
    {
        let tile = self.get_tile(id, &*tiles)?;
        tiles.set(&tile, data)?;
        Ok(())
    }
}
