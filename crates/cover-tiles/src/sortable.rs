// ABOUTME: Ordered list of curated content references with per-item overrides.
// ABOUTME: Backs list tiles where editors pick, sort and retitle site content.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-item data stored for a referenced content UUID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortableEntry {
    pub order: usize,
    pub custom_title: String,
    pub custom_description: String,
    pub custom_url: String,
}

/// Per-item override values submitted alongside the list
pub trait OverrideSource {
    fn custom_title(&self, uuid: &str) -> Option<String>;
    fn custom_description(&self, uuid: &str) -> Option<String>;
    fn custom_url(&self, uuid: &str) -> Option<String>;
}

/// Site content the references point to
pub trait ContentLookup {
    fn title(&self, uuid: &str) -> Option<String>;
    fn description(&self, uuid: &str) -> Option<String>;
    fn url(&self, uuid: &str) -> Option<String>;
    fn portal_type(&self, uuid: &str) -> Option<String>;
}

/// Curated references keyed by content UUID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortableSelection {
    uuids: BTreeMap<String, SortableEntry>,
}

impl SortableSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the selection from the submitted list, one UUID per line.
    ///
    /// Blank lines are dropped and `order` follows line position. A UUID
    /// listed twice keeps its last position.
    pub fn extract(lines: &str, overrides: &impl OverrideSource) -> Self {
        let mut uuids = BTreeMap::new();
        let listed = lines.lines().map(str::trim).filter(|line| !line.is_empty());
        for (order, uuid) in listed.enumerate() {
            let entry = SortableEntry {
                order,
                custom_title: overrides.custom_title(uuid).unwrap_or_default(),
                custom_description: overrides.custom_description(uuid).unwrap_or_default(),
                custom_url: overrides.custom_url(uuid).unwrap_or_default(),
            };
            uuids.insert(uuid.to_string(), entry);
        }
        Self { uuids }
    }

    pub fn insert(&mut self, uuid: impl Into<String>, entry: SortableEntry) {
        self.uuids.insert(uuid.into(), entry);
    }

    pub fn get(&self, uuid: &str) -> Option<&SortableEntry> {
        self.uuids.get(uuid)
    }

    pub fn len(&self) -> usize {
        self.uuids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uuids.is_empty()
    }

    /// UUIDs in display order
    pub fn sorted(&self) -> Vec<&str> {
        let mut entries: Vec<_> = self.uuids.iter().collect();
        entries.sort_by_key(|(_, entry)| entry.order);
        entries.into_iter().map(|(uuid, _)| uuid.as_str()).collect()
    }

    /// The override title, or the content's own title
    pub fn custom_title(&self, uuid: &str, content: &impl ContentLookup) -> Option<String> {
        self.override_of(uuid, |entry| &entry.custom_title)
            .or_else(|| content.title(uuid))
    }

    /// The override description, or the content's own description
    pub fn custom_description(&self, uuid: &str, content: &impl ContentLookup) -> Option<String> {
        self.override_of(uuid, |entry| &entry.custom_description)
            .or_else(|| content.description(uuid))
    }

    /// The override URL, or the content's URL.
    ///
    /// Content types listed in `use_view_action` link to their `/view`.
    pub fn custom_url(
        &self,
        uuid: &str,
        content: &impl ContentLookup,
        use_view_action: &[String],
    ) -> Option<String> {
        if let Some(url) = self.override_of(uuid, |entry| &entry.custom_url) {
            return Some(url);
        }
        let url = content.url(uuid)?;
        let needs_view = content
            .portal_type(uuid)
            .is_some_and(|portal_type| use_view_action.contains(&portal_type));
        Some(if needs_view { format!("{url}/view") } else { url })
    }

    fn override_of(&self, uuid: &str, field: impl Fn(&SortableEntry) -> &String) -> Option<String> {
        self.uuids
            .get(uuid)
            .map(field)
            .filter(|value| !value.is_empty())
            .cloned()
    }
}
