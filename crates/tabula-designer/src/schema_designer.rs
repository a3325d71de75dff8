//! Schema designer for Tabula
//!
//! A spreadsheet-like panel over one table's columns: inline cell editing,
//! nullable/primary-key toggles, row addition with unique-name generation,
//! positional row deletion and drag reordering.
//!
//! Every mutation is a read-modify-emit cycle: the panel rebuilds the
//! column list, wraps it in the full table record and emits
//! [`SchemaDesignerEvent::SchemaChanged`]. It never writes schema state
//! anywhere itself; the owner routes the event into the store and hands
//! the committed table back via [`SchemaDesignerPanel::set_table`].

pub mod events;
mod ops;
mod panel;

pub use events::SchemaDesignerEvent;
pub use panel::SchemaDesignerPanel;
