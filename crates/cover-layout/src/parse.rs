// ABOUTME: Conversion between persisted layout text and layout trees.
// ABOUTME: Absent text is reported as an empty layout, bad JSON as malformed.

use crate::{LayoutError, LayoutTree};

/// Parse the persisted form of a layout.
///
/// `None`, blank text and a JSON `null` all mean "no layout yet" and yield
/// `LayoutError::Empty`; callers substitute an empty tree.
pub fn parse(text: Option<&str>) -> Result<LayoutTree, LayoutError> {
    let text = match text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(LayoutError::Empty),
    };
    let tree: Option<LayoutTree> = serde_json::from_str(text)?;
    tree.ok_or(LayoutError::Empty)
}

/// Serialize a tree to its persisted form.
pub fn serialize(tree: &LayoutTree) -> Result<String, LayoutError> {
    Ok(serde_json::to_string(tree)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LayoutNode, TileFilter};
    use serde_json::Value;

    const LAYOUT: &str = r#"[
        {"type": "row", "children": [
            {"type": "group", "column-size": 8, "roles": ["Manager"], "children": [
                {"type": "tile", "id": "a1", "tile-type": "collective.cover.richtext"}
            ]},
            {"type": "group", "column-size": 8, "children": [
                {"tile-type": "collective.cover.basic", "type": "tile", "id": "b2", "class": "tile-edge"},
                {"type": "tile", "id": "c3", "tile-type": "collective.cover.richtext"}
            ]}
        ]},
        {"type": "row"}
    ]"#;

    #[test]
    fn missing_text_is_empty() {
        assert!(matches!(parse(None), Err(LayoutError::Empty)));
        assert!(matches!(parse(Some("")), Err(LayoutError::Empty)));
        assert!(matches!(parse(Some("null")), Err(LayoutError::Empty)));
    }

    #[test]
    fn invalid_text_is_malformed() {
        let err = parse(Some("{not json")).unwrap_err();
        assert!(err.is_malformed());
        // the top level must be a list of nodes
        let err = parse(Some(r#"{"type": "row"}"#)).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn node_without_type_is_malformed() {
        assert!(parse(Some(r#"[{"id": "x"}]"#)).unwrap_err().is_malformed());
    }

    #[test]
    fn parses_nested_layout() {
        let tree = parse(Some(LAYOUT)).unwrap();
        assert_eq!(tree.nodes().len(), 2);
        assert_eq!(tree.nodes()[0].kind(), "row");
        assert_eq!(tree.list_tiles(&TileFilter::All).unwrap(), vec!["a1", "b2", "c3"]);
    }

    #[test]
    fn roundtrip_preserves_structure_and_fields() {
        let tree = parse(Some(LAYOUT)).unwrap();
        let text = serialize(&tree).unwrap();
        let reparsed = parse(Some(&text)).unwrap();
        assert_eq!(reparsed, tree);

        // same JSON document, field for field
        let original: Value = serde_json::from_str(LAYOUT).unwrap();
        let written: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(original, written);
    }

    #[test]
    fn absent_and_empty_children_persist_differently() {
        let text = r#"[{"type": "row"}, {"type": "row", "children": []}]"#;
        let tree = parse(Some(text)).unwrap();
        let written = serialize(&tree).unwrap();
        assert_eq!(written, r#"[{"type":"row"},{"type":"row","children":[]}]"#);
    }

    #[test]
    fn serialize_empty_tree() {
        assert_eq!(serialize(&LayoutTree::new()).unwrap(), "[]");
        assert!(parse(Some("[]")).unwrap().is_empty());
    }

    #[test]
    fn tile_serializes_with_persisted_names() {
        let tree = LayoutTree::from_nodes(vec![LayoutNode::tile("collective.cover.basic", "x")]);
        assert_eq!(
            serialize(&tree).unwrap(),
            r#"[{"type":"tile","id":"x","tile-type":"collective.cover.basic"}]"#
        );
    }
}
