//! Helpers shared by every backend: anchor identity and text wrapping.

pub mod anchors;
pub mod wrap;
