//! Element tree: slotmap-backed arena of typed formspec elements.

pub mod node;
pub mod tree;

pub use node::{ButtonState, Element, ElementKind, InputState, InventoryGrid, NodeId, PromoteError};
pub use tree::ElementTree;
