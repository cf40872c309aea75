//! JSON configuration for the `sprite_slicer` tool.

pub mod slicer;
