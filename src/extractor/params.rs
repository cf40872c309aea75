//! Configuration for the extraction pipeline.
//!
//! One immutable [`ExtractionConfig`] is passed by value into
//! [`SpriteExtractor::new`](super::SpriteExtractor::new); every stage reads its
//! own sub-struct. Defaults are tuned for sheets around 2800 px square with a
//! background tolerance of 45.

use crate::error::{ExtractError, Result};
use crate::layout::LayoutOptions;
use crate::matte::MatteOptions;
use crate::segment::SegmentOptions;
use serde::{Deserialize, Serialize};

/// Whether matting runs per cropped cell or once on the whole sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentationScope {
    #[default]
    PerCell,
    WholeImage,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionConfig {
    /// Divider detection, scoring and the anti-alias inset.
    pub layout: LayoutOptions,
    /// Flood fill and interior void tolerances.
    pub segment: SegmentOptions,
    /// Edge decontamination.
    pub matte: MatteOptions,
    /// Opaque components below this many pixels are removed.
    pub min_island_area: usize,
    /// Bits per channel of the detection-only copy; `None` disables posterization.
    pub posterize_bits: Option<u8>,
    pub scope: SegmentationScope,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            segment: SegmentOptions::default(),
            matte: MatteOptions::default(),
            min_island_area: 32,
            posterize_bits: Some(4),
            scope: SegmentationScope::PerCell,
        }
    }
}

impl ExtractionConfig {
    /// Reject settings no stage can work with.
    pub fn validate(&self) -> Result<()> {
        if let Some(bits) = self.posterize_bits {
            if !(1..=8).contains(&bits) {
                return Err(ExtractError::InvalidConfig(format!(
                    "posterizeBits must be within 1..=8, got {bits}"
                )));
            }
        }
        if self.layout.profile.sample_stride == 0 {
            return Err(ExtractError::InvalidConfig(
                "sampleStride must be at least 1".into(),
            ));
        }
        let seg = &self.segment;
        if !(seg.bg_tolerance >= 0.0 && seg.interior_tolerance >= 0.0) {
            return Err(ExtractError::InvalidConfig(
                "background tolerances must be non-negative".into(),
            ));
        }
        if seg.interior_tolerance > seg.bg_tolerance {
            return Err(ExtractError::InvalidConfig(format!(
                "interiorTolerance {} must not exceed bgTolerance {}",
                seg.interior_tolerance, seg.bg_tolerance
            )));
        }
        if !(0.0..=1.0).contains(&self.matte.color_weight) {
            return Err(ExtractError::InvalidConfig(format!(
                "colorWeight must be within 0..=1, got {}",
                self.matte.color_weight
            )));
        }
        if !(self.layout.span_tolerance > 0.0 && self.layout.span_tolerance < 1.0) {
            return Err(ExtractError::InvalidConfig(format!(
                "spanTolerance must be within (0, 1), got {}",
                self.layout.span_tolerance
            )));
        }
        Ok(())
    }
}
