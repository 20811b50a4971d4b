// ABOUTME: Page lifecycle handlers.
// ABOUTME: Initializes a new page's layout from its template and assigns tile ids.

use cover_core::TemplateRegistry;
use cover_layout::{assign_tile_ids, IdGenerator};

use crate::{Cover, PageError};

/// Handle a page being added to the site.
///
/// Copies the page's template, gives every tile an id and stores the result.
/// A page that already has a layout is left alone: new versions of a page
/// are added too, and their tiles are already referenced by id. Returns
/// whether a layout was stored.
pub fn on_added(
    cover: &mut Cover,
    registry: &impl TemplateRegistry,
    generator: &mut impl IdGenerator,
) -> Result<bool, PageError> {
    if cover.cover_layout.as_deref().is_some_and(|l| !l.is_empty()) {
        tracing::debug!("{} already has a layout, keeping it", cover.id);
        return Ok(false);
    }

    let Some(name) = cover.template_layout.clone() else {
        return Ok(false);
    };
    let Some(template) = registry.layout(&name).filter(|t| !t.is_empty()) else {
        tracing::warn!("Template {:?} of {} is not registered", name, cover.id);
        return Ok(false);
    };

    let mut layout = match cover_layout::parse(Some(template)) {
        Ok(layout) => layout,
        Err(cover_layout::LayoutError::Empty) => return Ok(false),
        Err(e) => return Err(e.into()),
    };
    let assigned = assign_tile_ids(&mut layout, generator)?;
    cover.set_layout(&layout)?;

    tracing::info!(
        "Initialized {} from template {:?}, assigned {} tile ids",
        cover.id,
        name,
        assigned
    );
    Ok(true)
}
