//! Relationship edges

use gpui::SharedString;

/// A relationship between two tables, identified by their names.
///
/// The edge list is currently seeded statically rather than derived from
/// foreign keys; the canvas only draws and reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: SharedString,
    /// Source table name
    pub source: String,
    /// Target table name
    pub target: String,
    /// Relationship label, e.g. "1:N"
    pub label: SharedString,
}

impl Edge {
    pub fn new(
        id: impl Into<SharedString>,
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<SharedString>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: label.into(),
        }
    }
}
