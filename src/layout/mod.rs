//! Grid layout resolution: from a (posterized) grid image to 36 cell rects.
//!
//! Overview
//! - Per axis, expected divider centres come from the template geometry
//!   scaled to the image extent ([`expected_lines`]).
//! - Each configured [`LineStrategy`] searches a window around every expected
//!   centre. Missing lines are filled from the template, which produces one
//!   candidate set of 7 bands per strategy.
//! - Candidates are ranked by [`score_candidate`]: uneven spacing, template
//!   fill-ins and implausibly wide bands all cost. The best-ranked candidate
//!   whose six content spans are all within tolerance of the expected span
//!   wins.
//! - An axis with no acceptable candidate uses [`template_bands`]. Rows and
//!   columns decide independently, so one axis may be detected while the
//!   other falls back.
//! - Content spans are shrunk by the anti-alias inset on both sides before
//!   being combined into row-major [`CellRect`]s.

mod expected;
mod scoring;
mod strategy;

#[cfg(test)]
mod tests;

pub use expected::{axis_scale, content_spans, expected_lines, template_bands};
pub use scoring::{score_candidate, spacing_cv, CandidateScore};
pub use strategy::{LineStrategy, PreparedLocator};

use crate::error::{ExtractError, Result};
use crate::image::RasterImage;
use crate::profile::{AxisProfiles, ProfileOptions};
use crate::types::{Axis, Band, CellRect, TemplateGeometry, GRID_DIM};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Knobs for divider detection and candidate scoring.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub profile: ProfileOptions,
    /// Strategies evaluated per axis, in tie-break order.
    pub strategies: Vec<LineStrategy>,
    /// Search radius as a fraction of the scaled cell pitch.
    pub search_radius_frac: f32,
    /// Lower bound on the search radius in pixels.
    pub min_search_radius: usize,
    /// Brightness valley threshold as a fraction of the profile median.
    pub valley_ratio: f32,
    /// Saturation peaks must exceed `peak_min_factor * median deviation`...
    pub peak_min_factor: f32,
    /// ...and this absolute floor.
    pub peak_min_abs: f32,
    /// Peak bands grow while above this fraction of their own peak.
    pub peak_local_ratio: f32,
    /// Minimum darkness fraction of a divider row/column.
    pub darkness_threshold: f32,
    /// Largest gap (in samples) fused when merging darkness runs.
    pub merge_gap: usize,
    /// Score cost per unit fraction of template fill-ins.
    pub fallback_penalty: f32,
    /// Score cost when detected bands are wider than `width_factor` times expected.
    pub width_penalty: f32,
    pub width_factor: f32,
    /// Accepted relative deviation of each content span from its expected size.
    pub span_tolerance: f32,
    /// Pixels trimmed from both ends of every content span.
    pub aa_inset: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            profile: ProfileOptions::default(),
            strategies: LineStrategy::ALL.to_vec(),
            search_radius_frac: 0.08,
            min_search_radius: 4,
            valley_ratio: 0.6,
            peak_min_factor: 3.0,
            peak_min_abs: 0.05,
            peak_local_ratio: 0.5,
            darkness_threshold: 0.5,
            merge_gap: 3,
            fallback_penalty: 0.5,
            width_penalty: 0.5,
            width_factor: 3.0,
            span_tolerance: 0.35,
            aa_inset: 3,
        }
    }
}

/// Where an axis' dividers came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisSource {
    Detected(LineStrategy),
    Template,
}

/// One strategy's proposal for an axis.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineCandidate {
    pub strategy: LineStrategy,
    pub lines: Vec<Band>,
    pub detected: Vec<bool>,
    pub score: CandidateScore,
    /// Whether the candidate produced six in-tolerance content spans.
    pub accepted: bool,
}

/// Resolved dividers and content spans along one axis.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLayout {
    pub axis: Axis,
    pub source: AxisSource,
    pub lines: Vec<Band>,
    /// Content spans before the anti-alias inset.
    pub spans: Vec<Band>,
    pub candidates: Vec<LineCandidate>,
}

/// Both axes resolved for one grid image.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayout {
    pub columns: AxisLayout,
    pub rows: AxisLayout,
    pub aa_inset: usize,
}

impl GridLayout {
    /// Resolve both axes on `detect`, which is normally the posterized copy.
    pub fn resolve(
        detect: &RasterImage,
        geometry: &TemplateGeometry,
        opts: &LayoutOptions,
    ) -> Result<Self> {
        let columns = resolve_axis(detect, Axis::Columns, geometry, opts)?;
        let rows = resolve_axis(detect, Axis::Rows, geometry, opts)?;
        Ok(Self {
            columns,
            rows,
            aa_inset: opts.aa_inset,
        })
    }

    /// Template-only layout for an image of `w × h`.
    pub fn template(
        geometry: &TemplateGeometry,
        w: usize,
        h: usize,
        aa_inset: usize,
    ) -> Result<Self> {
        Ok(Self {
            columns: template_axis(geometry, Axis::Columns, w, Vec::new())?,
            rows: template_axis(geometry, Axis::Rows, h, Vec::new())?,
            aa_inset,
        })
    }

    /// The 36 content rectangles in row-major order, inset on every side.
    pub fn cell_rects(&self) -> Result<Vec<CellRect>> {
        let inset = self.aa_inset;
        let mut rects = Vec::with_capacity(GRID_DIM * GRID_DIM);
        for (r, row) in self.rows.spans.iter().enumerate() {
            for (c, col) in self.columns.spans.iter().enumerate() {
                let w = col.width() as i64 - 2 * inset as i64;
                let h = row.width() as i64 - 2 * inset as i64;
                if w <= 0 || h <= 0 {
                    return Err(ExtractError::InvalidCellDimensions {
                        cell: r * GRID_DIM + c,
                        width: w,
                        height: h,
                    });
                }
                rects.push(CellRect {
                    x: col.start + inset,
                    y: row.start + inset,
                    w: w as usize,
                    h: h as usize,
                });
            }
        }
        Ok(rects)
    }
}

/// Run every strategy on one axis and keep the best acceptable candidate.
pub fn resolve_axis(
    detect: &RasterImage,
    axis: Axis,
    geometry: &TemplateGeometry,
    opts: &LayoutOptions,
) -> Result<AxisLayout> {
    let extent = match axis {
        Axis::Columns => detect.w,
        Axis::Rows => detect.h,
    };
    let scale = axis_scale(geometry, axis, extent);
    if extent == 0 || scale <= 0.0 {
        return Err(ExtractError::GeometryDetectionFailure {
            axis,
            reason: format!(
                "image extent {extent} px against template extent {} px",
                geometry.extent(axis)
            ),
        });
    }

    let profiles = AxisProfiles::build(detect, axis, &opts.profile);
    let centers = expected_lines(geometry, axis, extent);
    let fallback = template_bands(geometry, axis, extent);
    let pitch = geometry.pitch(axis) as f32 * scale;
    let radius = ((pitch * opts.search_radius_frac).round() as usize).max(opts.min_search_radius);
    let expected_thickness = geometry.lead(axis) as f32 * scale;
    let expected_span = geometry.content(axis) as f32 * scale;

    let mut candidates: Vec<(LineCandidate, Option<Vec<Band>>)> = Vec::new();
    for &strategy in &opts.strategies {
        let locator = strategy.prepare(&profiles, opts);
        let found: Vec<Option<Band>> = centers.iter().map(|&c| locator.locate(c, radius)).collect();
        let detected: Vec<bool> = found.iter().map(Option::is_some).collect();
        if !detected.iter().any(|&d| d) {
            debug!("layout {axis}: {} found no dividers", strategy.name());
            continue;
        }
        let lines: Vec<Band> = found
            .iter()
            .zip(&fallback)
            .map(|(f, fb)| f.unwrap_or(*fb))
            .collect();
        let score = score_candidate(&lines, &detected, expected_thickness, opts);
        let spans = content_spans(&lines, geometry, axis, scale)
            .filter(|spans| spans_within_tolerance(spans, expected_span, opts.span_tolerance));
        debug!(
            "layout {axis}: {} score={:.4} cv={:.4} fallback={:.2} width={:.1} accepted={}",
            strategy.name(),
            score.total,
            score.spacing_cv,
            score.fallback_fraction,
            score.mean_detected_width,
            spans.is_some()
        );
        candidates.push((
            LineCandidate {
                strategy,
                lines,
                detected,
                score,
                accepted: spans.is_some(),
            },
            spans,
        ));
    }

    // stable: ties keep the configured strategy order
    candidates.sort_by(|a, b| a.0.score.total.total_cmp(&b.0.score.total));
    let winner = candidates.iter().position(|(_, spans)| spans.is_some());

    match winner {
        Some(idx) => {
            let (best, spans) = &candidates[idx];
            let source = AxisSource::Detected(best.strategy);
            let lines = best.lines.clone();
            let spans = spans.clone().unwrap_or_default();
            Ok(AxisLayout {
                axis,
                source,
                lines,
                spans,
                candidates: candidates.into_iter().map(|(c, _)| c).collect(),
            })
        }
        None => {
            warn!("layout {axis}: no acceptable divider candidate, using template geometry");
            template_axis(
                geometry,
                axis,
                extent,
                candidates.into_iter().map(|(c, _)| c).collect(),
            )
        }
    }
}

fn template_axis(
    geometry: &TemplateGeometry,
    axis: Axis,
    extent: usize,
    candidates: Vec<LineCandidate>,
) -> Result<AxisLayout> {
    let scale = axis_scale(geometry, axis, extent);
    if extent == 0 || scale <= 0.0 {
        return Err(ExtractError::GeometryDetectionFailure {
            axis,
            reason: format!("cannot scale template to extent {extent} px"),
        });
    }
    let lines = template_bands(geometry, axis, extent);
    let spans = content_spans(&lines, geometry, axis, scale).ok_or_else(|| {
        ExtractError::GeometryDetectionFailure {
            axis,
            reason: format!("template proportions leave an empty cell at extent {extent} px"),
        }
    })?;
    Ok(AxisLayout {
        axis,
        source: AxisSource::Template,
        lines,
        spans,
        candidates,
    })
}

fn spans_within_tolerance(spans: &[Band], expected: f32, tolerance: f32) -> bool {
    let lo = expected * (1.0 - tolerance);
    let hi = expected * (1.0 + tolerance);
    spans.len() == GRID_DIM
        && spans.iter().all(|s| {
            let w = s.width() as f32;
            w >= lo && w <= hi
        })
}
