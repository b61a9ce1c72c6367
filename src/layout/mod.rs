//! Onion layering of file markers around their folder.
//!
//! `plan_layers` decides how many markers each concentric ring holds for a
//! given file count; `ring_offsets` turns that plan into per-marker offsets in
//! the folder's local frame.

mod onion;
mod placer;

pub use onion::{Blueprint, Layer, arc_length, plan_layers};
pub use placer::{ring_offsets, slot_offset};
