// ABOUTME: Full-text indexing of cover pages.
// ABOUTME: Flattens page metadata and rich text tile content into one searchable string.

use serde_json::Value;

use cover_tiles::{TextTransformer, TileHandle, TileStore, TEXT_PLAIN};

use crate::{Cover, PageError};

/// Index field the searchable text is registered under
pub const SEARCHABLE_TEXT_INDEX: &str = "SearchableText";

/// Receives indexed values for a page
pub trait Catalog {
    fn index(&mut self, page_id: &str, field: &str, value: String);
}

/// Text used to find the page: its id, title, description and the plain text
/// of every tile of `richtext_type`.
///
/// Empty parts are left out and the rest joined with a single space. Tile
/// texts are concatenated in layout order without a separator.
pub fn searchable_text(
    cover: &Cover,
    tiles: &impl TileStore,
    transformer: &impl TextTransformer,
    richtext_type: &str,
) -> Result<String, PageError> {
    let mut tiles_text = String::new();
    for id in cover.list_tiles(richtext_type)? {
        let tile = tiles.tile(richtext_type, &id)?;
        match raw_text(&tile) {
            Some(raw) => tiles_text.push_str(&transformer.transform(raw, TEXT_PLAIN)),
            None => tracing::debug!("Rich text tile {} of {} has no text", id, cover.id),
        }
    }

    let entries = [
        cover.id.as_str(),
        cover.title.as_str(),
        cover.description.as_str(),
        tiles_text.as_str(),
    ];
    Ok(entries
        .into_iter()
        .filter(|entry| !entry.is_empty())
        .collect::<Vec<_>>()
        .join(" "))
}

/// Compute the searchable text and hand it to the catalog
pub fn reindex(
    cover: &Cover,
    tiles: &impl TileStore,
    transformer: &impl TextTransformer,
    richtext_type: &str,
    catalog: &mut impl Catalog,
) -> Result<(), PageError> {
    let text = searchable_text(cover, tiles, transformer, richtext_type)?;
    catalog.index(&cover.id, SEARCHABLE_TEXT_INDEX, text);
    Ok(())
}

/// Raw rich text of a tile: either a plain string or a rich text value
/// holding its source in `data`
fn raw_text(tile: &TileHandle) -> Option<&str> {
    match tile.data.get("text")? {
        Value::String(text) => Some(text),
        Value::Object(value) => value.get("data").and_then(Value::as_str),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cover_tiles::{InMemoryTiles, StripTags, TileData};
    use serde_json::json;
    use std::collections::HashMap;

    const RICHTEXT: &str = "collective.cover.richtext";

    const LAYOUT: &str = r#"[
        {"type": "row", "children": [
            {"type": "group", "children": [
                {"type": "tile", "id": "r1", "tile-type": "collective.cover.richtext"},
                {"type": "tile", "id": "b1", "tile-type": "collective.cover.basic"}
            ]},
            {"type": "group", "children": [
                {"type": "tile", "id": "r2", "tile-type": "collective.cover.richtext"}
            ]}
        ]}
    ]"#;

    #[derive(Default)]
    struct FakeCatalog(HashMap<(String, String), String>);

    impl Catalog for FakeCatalog {
        fn index(&mut self, page_id: &str, field: &str, value: String) {
            self.0.insert((page_id.to_string(), field.to_string()), value);
        }
    }

    fn data(value: Value) -> TileData {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn tiles() -> InMemoryTiles {
        let mut tiles = InMemoryTiles::new();
        tiles.insert(RICHTEXT, "r1", data(json!({"text": "<p>Hello</p>"})));
        tiles.insert(
            RICHTEXT,
            "r2",
            data(json!({"text": {"data": "<p>World</p>", "mimeType": "text/html"}})),
        );
        tiles.insert("collective.cover.basic", "b1", data(json!({"text": "ignored"})));
        tiles
    }

    #[test]
    fn metadata_and_tile_text() {
        let page = Cover::new("home", "Home Page").with_layout(LAYOUT);
        let text = searchable_text(&page, &tiles(), &StripTags, RICHTEXT).unwrap();
        assert_eq!(text, "home Home Page HelloWorld");
    }

    #[test]
    fn uses_the_given_transformer() {
        let page = Cover::new("home", "Home Page")
            .with_description("Welcome")
            .with_layout(LAYOUT);
        let shout = |raw: &str, _: &str| StripTags.transform(raw, TEXT_PLAIN).to_uppercase();
        let text = searchable_text(&page, &tiles(), &shout, RICHTEXT).unwrap();
        assert_eq!(text, "home Home Page Welcome HELLOWORLD");
    }

    #[test]
    fn page_without_tiles() {
        let page = Cover::new("about", "").with_description("All about us");
        let text = searchable_text(&page, &InMemoryTiles::new(), &StripTags, RICHTEXT).unwrap();
        assert_eq!(text, "about All about us");
    }

    #[test]
    fn tiles_without_text_are_skipped() {
        let page = Cover::new("home", "Home").with_layout(LAYOUT);
        let mut tiles = InMemoryTiles::with_types([RICHTEXT]);
        tiles.insert(RICHTEXT, "r2", data(json!({"text": "only"})));
        let text = searchable_text(&page, &tiles, &StripTags, RICHTEXT).unwrap();
        assert_eq!(text, "home Home only");
    }

    #[test]
    fn reindex_registers_the_field() {
        let page = Cover::new("home", "Home Page").with_layout(LAYOUT);
        let mut catalog = FakeCatalog::default();
        reindex(&page, &tiles(), &StripTags, RICHTEXT, &mut catalog).unwrap();

        let key = ("home".to_string(), SEARCHABLE_TEXT_INDEX.to_string());
        assert_eq!(catalog.0[&key], "home Home Page HelloWorld");
    }
}
