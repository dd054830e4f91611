//! # Nesting Policies
//!
//! Deterministic rules the sweep renderer consults when it has to decide how
//! elements nest:
//!
//! - **`tags`**: block-level and paragraph tag classification
//! - **`ordering`**: processing order of annotations (`sort_annotations`) and
//!   nesting order of a batch opening at one position (`sort_openings`)
//! - **`containment`**: which annotation may nest inside which (`can_contain`)

pub mod containment;
pub mod ordering;
pub mod tags;

pub use containment::can_contain;
pub use ordering::{sort_annotations, sort_openings};
pub use tags::{is_block_tag, is_paragraph_tag};
