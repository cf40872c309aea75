//! Extraction pipeline: grid image in, 36 transparent sprites out.
//!
//! Stages, in order:
//! 1. posterize a detection-only copy (`crate::posterize`),
//! 2. resolve the grid layout on that copy (`crate::layout`),
//! 3. per cell, on the original pixels: background segmentation
//!    (`crate::segment`), edge decontamination (`crate::matte`) and island
//!    pruning (`crate::islands`),
//! 4. crop and label.
//!
//! With [`SegmentationScope::WholeImage`] step 3 runs once on the full sheet
//! ([`clean_sheet`]), seeded inside the resolved cell rects, and the cells
//! are cropped from the result.
//!
//! Layout resolution needs the whole image and runs once; cells are
//! independent afterwards and are processed on rayon when the `parallel`
//! feature is on. Output order is always the row-major cell index.
//!
//! Modules
//! - [`params`] – `ExtractionConfig` and its validation.
//! - `pipeline` – the [`SpriteExtractor`] implementation.
//! - `compose` – cropping helpers and sheet recomposition.

mod compose;
pub mod params;
mod pipeline;

pub use compose::compose_sprite_sheet;
pub use params::{ExtractionConfig, SegmentationScope};
pub use pipeline::{clean_region, clean_sheet, extract_sprites, ExtractionOutput, SpriteExtractor};
