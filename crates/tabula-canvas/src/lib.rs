//! Diagram canvas for Tabula
//!
//! Renders one draggable node per table and a static edge list, and
//! forwards node clicks, edge clicks, drag stops and label edits to the
//! owner as tagged events. The canvas holds no authoritative schema state:
//! it re-derives its nodes whenever the owner hands it a new table list,
//! and every persistent change leaves through [`CanvasEvent`].

mod canvas;
mod edge;
mod node;

pub use canvas::{CanvasEvent, CanvasView};
pub use edge::Edge;
pub use node::{NODE_WIDTH, TableNode, node_size};
