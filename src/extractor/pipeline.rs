//! Pipeline driving layout resolution and per-cell matting.
//!
//! Typical usage:
//! ```no_run
//! use sprite_extractor::{ExtractionConfig, SpriteExtractor, TemplateGeometry};
//! use sprite_extractor::image::RasterImage;
//!
//! # fn example(sheet: RasterImage, labels: Vec<String>) -> sprite_extractor::Result<()> {
//! let geometry = TemplateGeometry {
//!     cell_content_width: 468,
//!     cell_content_height: 450,
//!     header_height: 18,
//!     divider_thickness: 2,
//! };
//! let extractor = SpriteExtractor::new(geometry, ExtractionConfig::default())?;
//! let out = extractor.extract_with_diagnostics(&sheet, &labels)?;
//! println!("columns from {:?}", out.report.layout.columns.source);
//! # Ok(())
//! # }
//! ```
use super::params::{ExtractionConfig, SegmentationScope};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{CellReport, CellStats, ExtractionReport, InputDescriptor, TimingBreakdown};
use crate::error::{ExtractError, Result};
use crate::image::RasterImage;
use crate::islands::prune_islands;
use crate::layout::GridLayout;
use crate::matte::decontaminate;
use crate::posterize::posterize;
use crate::segment::{segment_background, segment_cells, Segmentation};
use crate::types::{CellRect, ExtractedSprite, TemplateGeometry, CELL_COUNT};
use log::debug;
use std::time::Instant;

/// Sprites plus the report describing how they were obtained.
#[derive(Clone, Debug)]
pub struct ExtractionOutput {
    pub sprites: Vec<ExtractedSprite>,
    pub report: ExtractionReport,
}

/// Stateless extractor bound to one template geometry and configuration.
#[derive(Clone, Debug)]
pub struct SpriteExtractor {
    geometry: TemplateGeometry,
    config: ExtractionConfig,
}

impl SpriteExtractor {
    pub fn new(geometry: TemplateGeometry, config: ExtractionConfig) -> Result<Self> {
        if geometry.cell_content_width == 0 || geometry.cell_content_height == 0 {
            return Err(ExtractError::InvalidConfig(format!(
                "template cell content must be non-empty, got {}x{}",
                geometry.cell_content_width, geometry.cell_content_height
            )));
        }
        config.validate()?;
        Ok(Self { geometry, config })
    }

    pub fn geometry(&self) -> &TemplateGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Posterize a detection copy of `image` and resolve the grid on it.
    pub fn resolve_layout(&self, image: &RasterImage) -> Result<GridLayout> {
        let detect = self.detection_copy(image);
        GridLayout::resolve(&detect, &self.geometry, &self.config.layout)
    }

    /// Extract the 36 sprites of `image`, labelled in row-major order.
    pub fn extract<S: AsRef<str>>(
        &self,
        image: &RasterImage,
        labels: &[S],
    ) -> Result<Vec<ExtractedSprite>> {
        self.extract_with_diagnostics(image, labels).map(|out| out.sprites)
    }

    pub fn extract_with_diagnostics<S: AsRef<str>>(
        &self,
        image: &RasterImage,
        labels: &[S],
    ) -> Result<ExtractionOutput> {
        if labels.len() != CELL_COUNT {
            return Err(ExtractError::LabelCountMismatch {
                expected: CELL_COUNT,
                actual: labels.len(),
            });
        }
        debug!(
            "SpriteExtractor::extract start w={} h={} scope={:?}",
            image.w, image.h, self.config.scope
        );
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();

        let mut t = Instant::now();
        let detect = self.detection_copy(image);
        t = timing.lap("posterize", t);

        let layout = GridLayout::resolve(&detect, &self.geometry, &self.config.layout)?;
        drop(detect);
        let rects = layout.cell_rects()?;
        t = timing.lap("layout", t);
        debug!(
            "SpriteExtractor::extract layout columns={:?} rows={:?}",
            layout.columns.source, layout.rows.source
        );

        let (cells, whole_image) = match self.config.scope {
            SegmentationScope::PerCell => {
                let cells = map_cells(&rects, |rect| {
                    let (pixels, stats) = clean_region(&image.crop(rect), &self.config);
                    (pixels, Some(stats))
                });
                (cells, None)
            }
            SegmentationScope::WholeImage => {
                let (clean, stats) = clean_sheet(image, &rects, &self.config);
                t = timing.lap("matte", t);
                let cells = rects.iter().map(|rect| (clean.crop(rect), None)).collect();
                (cells, Some(stats))
            }
        };
        timing.lap("cells", t);

        let mut sprites = Vec::with_capacity(CELL_COUNT);
        let mut reports = Vec::with_capacity(CELL_COUNT);
        for (index, ((pixels, stats), rect)) in cells.into_iter().zip(&rects).enumerate() {
            let label = labels[index].as_ref().to_string();
            reports.push(CellReport {
                index,
                label: label.clone(),
                rect: *rect,
                opaque_px: pixels.opaque_count(),
                stats,
            });
            sprites.push(ExtractedSprite {
                cell_index: index,
                label,
                pixels,
            });
        }

        timing.total_ms = elapsed_ms(total_start);
        debug!(
            "SpriteExtractor::extract done sprites={} total_ms={:.3}",
            sprites.len(),
            timing.total_ms
        );

        let report = ExtractionReport {
            input: InputDescriptor {
                width: image.w,
                height: image.h,
                posterize_bits: self.config.posterize_bits,
            },
            scope: self.config.scope,
            layout,
            cells: reports,
            whole_image,
            timing,
        };
        Ok(ExtractionOutput { sprites, report })
    }

    fn detection_copy(&self, image: &RasterImage) -> RasterImage {
        match self.config.posterize_bits {
            Some(bits) => posterize(image, bits),
            None => image.clone(),
        }
    }
}

/// One-shot convenience wrapper around [`SpriteExtractor`].
pub fn extract_sprites<S: AsRef<str>>(
    image: &RasterImage,
    geometry: TemplateGeometry,
    config: ExtractionConfig,
    labels: &[S],
) -> Result<Vec<ExtractedSprite>> {
    SpriteExtractor::new(geometry, config)?.extract(image, labels)
}

/// Segment, decontaminate and prune one region of original pixels.
pub fn clean_region(region: &RasterImage, config: &ExtractionConfig) -> (RasterImage, CellStats) {
    let seg = segment_background(region, &config.segment);
    finish_region(region, seg, config)
}

/// Clean a whole sheet in one pass, seeding the background inside `rects`.
pub fn clean_sheet(
    image: &RasterImage,
    rects: &[CellRect],
    config: &ExtractionConfig,
) -> (RasterImage, CellStats) {
    let seg = segment_cells(image, rects, &config.segment);
    finish_region(image, seg, config)
}

fn finish_region(
    region: &RasterImage,
    seg: Segmentation,
    config: &ExtractionConfig,
) -> (RasterImage, CellStats) {
    let (matted, matte) = decontaminate(region, &seg.mask, seg.background, &config.matte);
    let (pixels, islands) = prune_islands(&matted, config.min_island_area);
    let stats = CellStats {
        seeds_accepted: seg.anchors.iter().filter(|a| a.accepted).count(),
        edge_filled: seg.edge_filled,
        interior_filled: seg.interior_filled,
        background: seg.background,
        matte,
        islands,
    };
    (pixels, stats)
}

#[cfg(feature = "parallel")]
fn map_cells<T, F>(rects: &[CellRect], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&CellRect) -> T + Sync + Send,
{
    use rayon::prelude::*;

    rects.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_cells<T, F>(rects: &[CellRect], f: F) -> Vec<T>
where
    F: Fn(&CellRect) -> T,
{
    rects.iter().map(f).collect()
}
