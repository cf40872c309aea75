#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod extractor;
pub mod image;
pub mod types;

// Stage modules: public so tools can run and inspect a single stage.
pub mod bands;
pub mod islands;
pub mod layout;
pub mod matte;
pub mod posterize;
pub mod profile;
pub mod segment;

// Demo binary configuration.
pub mod config;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{ExtractError, Result};
pub use crate::extractor::{
    compose_sprite_sheet, extract_sprites, ExtractionConfig, ExtractionOutput, SegmentationScope,
    SpriteExtractor,
};
pub use crate::types::{ExtractedSprite, TemplateGeometry};

pub use crate::diagnostics::{ExtractionReport, TimingBreakdown};
pub use crate::layout::{AxisSource, GridLayout, LineStrategy};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use sprite_extractor::prelude::*;
///
/// # fn main() -> sprite_extractor::Result<()> {
/// let sheet = RasterImage::filled(2820, 2820, [128, 128, 128, 255]);
/// let geometry = TemplateGeometry {
///     cell_content_width: 468,
///     cell_content_height: 450,
///     header_height: 18,
///     divider_thickness: 2,
/// };
/// let labels: Vec<String> = (0..36).map(|i| i.to_string()).collect();
/// let sprites = SpriteExtractor::new(geometry, ExtractionConfig::default())?
///     .extract(&sheet, &labels)?;
/// let composed = compose_sprite_sheet(&sprites)?;
/// println!("sheet {}x{}", composed.w, composed.h);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::RasterImage;
    pub use crate::{
        compose_sprite_sheet, ExtractError, ExtractedSprite, ExtractionConfig, SpriteExtractor,
        TemplateGeometry,
    };
}
