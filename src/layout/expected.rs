//! Template-proportional geometry scaled to the actual image.
use crate::types::{Axis, Band, TemplateGeometry, GRID_DIM, LINES_PER_AXIS};

/// Per-axis scale between the template and the image.
#[inline]
pub fn axis_scale(geometry: &TemplateGeometry, axis: Axis, extent: usize) -> f32 {
    let template = geometry.extent(axis);
    if template == 0 {
        return 0.0;
    }
    extent as f32 / template as f32
}

/// Expected centre of each of the 7 dividers, in image pixels.
pub fn expected_lines(
    geometry: &TemplateGeometry,
    axis: Axis,
    extent: usize,
) -> [f32; LINES_PER_AXIS] {
    let s = axis_scale(geometry, axis, extent);
    let pitch = geometry.pitch(axis) as f32;
    let half = 0.5 * geometry.divider_thickness as f32;
    let mut out = [0.0; LINES_PER_AXIS];
    for (i, c) in out.iter_mut().enumerate() {
        *c = ((i as f32 * pitch + half) * s - 0.5).max(0.0);
    }
    out
}

/// Divider bands exactly where the template puts them. Bands 0..6 include
/// the header strip on the row axis; the closing band is the bare divider.
pub fn template_bands(geometry: &TemplateGeometry, axis: Axis, extent: usize) -> Vec<Band> {
    let s = axis_scale(geometry, axis, extent);
    let pitch = geometry.pitch(axis) as f32;
    let last = extent.saturating_sub(1);
    (0..LINES_PER_AXIS)
        .map(|i| {
            let lead = if i < GRID_DIM {
                geometry.lead(axis)
            } else {
                geometry.divider_thickness
            };
            let origin = i as f32 * pitch;
            let start = ((origin * s).round() as usize).min(last);
            let end = (((origin + lead as f32) * s).round() as usize)
                .saturating_sub(1)
                .clamp(start, last);
            Band::new(start, end)
        })
        .collect()
}

/// Content spans between consecutive divider bands, before any inset.
///
/// A span starts after its leading band, but never earlier than the scaled
/// divider+header lead from the band start: a locator that only caught the
/// thin grid line still skips the header. `None` if any span is empty.
pub fn content_spans(
    bands: &[Band],
    geometry: &TemplateGeometry,
    axis: Axis,
    scale: f32,
) -> Option<Vec<Band>> {
    if bands.len() != LINES_PER_AXIS {
        return None;
    }
    let lead = (geometry.lead(axis) as f32 * scale).round() as usize;
    bands
        .windows(2)
        .map(|pair| {
            let start = (pair[0].end + 1).max(pair[0].start + lead);
            let end = pair[1].start.checked_sub(1)?;
            (end >= start).then(|| Band::new(start, end))
        })
        .collect()
}
