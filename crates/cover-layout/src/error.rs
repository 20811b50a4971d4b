// ABOUTME: Errors raised while parsing and querying layout trees.
// ABOUTME: Separates "no layout yet" from corrupted data and failed lookups.

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The persisted layout is absent; callers substitute an empty tree.
    #[error("layout is empty")]
    Empty,

    #[error("malformed layout: {0}")]
    Malformed(String),

    #[error("malformed layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tile `{0}` not found")]
    NotFound(String),

    #[error("tile id `{id}` is used by {count} tiles")]
    DuplicateId { id: String, count: usize },

    #[error("could not generate a unique tile id after {0} attempts")]
    IdsExhausted(usize),
}

impl LayoutError {
    /// True when the persisted data violates the layout format
    pub fn is_malformed(&self) -> bool {
        matches!(self, LayoutError::Malformed(_) | LayoutError::Json(_))
    }
}
