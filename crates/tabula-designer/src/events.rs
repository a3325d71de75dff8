//! Events emitted by the schema designer panel

use tabula_schema::Table;

/// Events emitted by the [`crate::SchemaDesignerPanel`].
#[derive(Debug, Clone)]
pub enum SchemaDesignerEvent {
    /// A column changed, was added, deleted or reordered. Carries the
    /// entire updated table record; the owner commits it to the store.
    SchemaChanged { table: Table },
}
