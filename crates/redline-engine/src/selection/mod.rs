//! # Inverse Coordinate Resolution
//!
//! Maps a selection made over rendered markup back to offsets in the raw
//! text, using only the `data-position`/`data-warp` metadata the renderer
//! embedded in each element.
//!
//! - **`resolve`**: point-level resolution (`resolve_point`) and the
//!   rendered-offset to point helper
//! - **`watcher`**: `SelectionWatcher`, which scopes resolution to
//!   registered containers and rejects selections it cannot map exactly

pub mod resolve;
pub mod watcher;

pub use resolve::{Bound, Point, point_at_rendered_offset, resolve_point};
pub use watcher::{ResolvedSelection, Selection, SelectionRange, SelectionWatcher};
