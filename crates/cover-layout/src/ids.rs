// ABOUTME: Tile id assignment for layouts copied from a template.
// ABOUTME: Gives every id-less tile a fresh id that is unique within the tree.

use std::collections::HashSet;

use uuid::Uuid;

use crate::{LayoutError, LayoutNode, LayoutTree};

const MAX_ATTEMPTS: usize = 1000;

/// Source of candidate tile ids
pub trait IdGenerator {
    fn generate(&mut self) -> String;
}

/// Random 32-digit hex ids
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn generate(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Monotonic `<prefix><n>` ids, useful where output must be reproducible
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("tile-")
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Assign an id to every tile that lacks one, returns how many were assigned.
///
/// Existing ids are kept; new ids never collide with them or with each other.
/// An empty id string counts as missing.
pub fn assign_tile_ids(
    tree: &mut LayoutTree,
    generator: &mut impl IdGenerator,
) -> Result<usize, LayoutError> {
    let mut used = HashSet::new();
    collect_ids(tree.nodes(), &mut used);

    let mut assigned = 0;
    assign(tree.nodes_mut(), generator, &mut used, &mut assigned)?;
    Ok(assigned)
}

fn collect_ids(nodes: &[LayoutNode], out: &mut HashSet<String>) {
    for node in nodes {
        match node {
            LayoutNode::Tile(tile) => {
                if let Some(id) = tile.id.as_ref().filter(|id| !id.is_empty()) {
                    out.insert(id.clone());
                }
            }
            LayoutNode::Container(container) => collect_ids(container.children(), out),
        }
    }
}

fn assign(
    nodes: &mut [LayoutNode],
    generator: &mut impl IdGenerator,
    used: &mut HashSet<String>,
    assigned: &mut usize,
) -> Result<(), LayoutError> {
    for node in nodes {
        match node {
            LayoutNode::Tile(tile) => {
                if tile.id.as_ref().is_some_and(|id| !id.is_empty()) {
                    continue;
                }
                tile.id = Some(unique_id(generator, used)?);
                *assigned += 1;
            }
            LayoutNode::Container(container) => {
                if let Some(children) = container.children.as_mut() {
                    assign(children, generator, used, assigned)?;
                }
            }
        }
    }
    Ok(())
}

fn unique_id(
    generator: &mut impl IdGenerator,
    used: &mut HashSet<String>,
) -> Result<String, LayoutError> {
    for _ in 0..MAX_ATTEMPTS {
        let id = generator.generate();
        if !id.is_empty() && used.insert(id.clone()) {
            return Ok(id);
        }
    }
    Err(LayoutError::IdsExhausted(MAX_ATTEMPTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, serialize, TileFilter, TileNode};

    const TEMPLATE: &str = r#"[
        {"type": "row", "children": [
            {"type": "group", "children": [
                {"type": "tile", "tile-type": "collective.cover.basic"},
                {"type": "tile", "id": "tile-2", "tile-type": "collective.cover.richtext"}
            ]}
        ]},
        {"type": "tile", "tile-type": "collective.cover.richtext"},
        {"type": "tile", "id": "", "tile-type": "collective.cover.collection"}
    ]"#;

    struct Constant;

    impl IdGenerator for Constant {
        fn generate(&mut self) -> String {
            "same".to_string()
        }
    }

    #[test]
    fn assigns_missing_ids_only() {
        let mut tree = parse(Some(TEMPLATE)).unwrap();
        let assigned = assign_tile_ids(&mut tree, &mut UuidIds).unwrap();
        assert_eq!(assigned, 3);

        let ids = tree.list_tiles(&TileFilter::All).unwrap();
        assert_eq!(ids.len(), 4);
        assert_eq!(ids[1], "tile-2");
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 4);
        assert!(ids.iter().all(|id| !id.is_empty()));
    }

    #[test]
    fn skips_ids_already_in_the_tree() {
        // the counter would hand out tile-2 second, which the template already uses
        let mut tree = parse(Some(TEMPLATE)).unwrap();
        assign_tile_ids(&mut tree, &mut SequentialIds::default()).unwrap();
        assert_eq!(
            tree.list_tiles(&TileFilter::All).unwrap(),
            vec!["tile-1", "tile-2", "tile-3", "tile-4"]
        );
    }

    #[test]
    fn fully_identified_tree_is_unchanged() {
        let mut tree = parse(Some(TEMPLATE)).unwrap();
        assign_tile_ids(&mut tree, &mut UuidIds).unwrap();
        let before = serialize(&tree).unwrap();

        assert_eq!(assign_tile_ids(&mut tree, &mut UuidIds).unwrap(), 0);
        assert_eq!(serialize(&tree).unwrap(), before);
    }

    #[test]
    fn uuid_ids_are_hex() {
        let id = UuidIds.generate();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn colliding_generator_gives_up() {
        let mut tree = LayoutTree::from_nodes(vec![
            LayoutNode::Tile(TileNode::new("a")),
            LayoutNode::Tile(TileNode::new("b")),
        ]);
        let err = assign_tile_ids(&mut tree, &mut Constant).unwrap_err();
        assert!(matches!(err, LayoutError::IdsExhausted(_)));
    }

    #[test]
    fn template_text_is_not_touched() {
        let master = TEMPLATE.to_string();
        let mut copy = parse(Some(&master)).unwrap();
        assign_tile_ids(&mut copy, &mut UuidIds).unwrap();
        assert_eq!(master, TEMPLATE);
        assert!(parse(Some(&master))
            .unwrap()
            .get_tiles(&TileFilter::All)
            .is_err());
    }
}
