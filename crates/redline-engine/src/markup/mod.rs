//! # Rendered Markup Tree
//!
//! A minimal document model over rendered output, standing in for the
//! structural tree a rendering surface builds. Selections and the inverse
//! resolver address nodes of this tree.
//!
//! ## Modules
//!
//! - **`tree`**: arena `MarkupTree` with `NodeId` handles and coordinate
//!   metadata lookup
//! - **`cursor`**: char cursor used by the reader
//! - **`reader`**: `parse_markup()` for strings produced by the renderer

pub mod cursor;
pub mod reader;
pub mod tree;

pub use reader::{MarkupError, parse_markup};
pub use tree::{Coords, Element, MarkupTree, Node, NodeId, NodeKind};
