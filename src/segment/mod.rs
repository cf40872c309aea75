//! Background segmentation of one cell (or a whole sheet).
//!
//! 1. Eight seeds sit on the corners and edge midpoints, inset past border
//!    bleed. Each seed gets an anchor color: the per-channel median of a small
//!    patch around it. A seed whose own pixel is not close to its anchor is
//!    skipped.
//! 2. A 4-connected flood fill grows from every accepted seed, admitting a
//!    pixel only if it is within `bg_tolerance` of that seed's anchor. Several
//!    anchors coexist, so a background gradient across the cell is tolerated.
//! 3. The aggregate background color is the per-channel median of a bounded,
//!    evenly strided sample of the filled pixels.
//! 4. Interior void pass: remaining pixels within the tighter
//!    `interior_tolerance` of the aggregate color are background too.
//!
//! For a whole sheet, [`segment_cells`] places the eight seeds inside every
//! cell rect instead of on the sheet border.

mod anchor;
mod flood;

#[cfg(test)]
mod tests;

pub use anchor::{anchor_color, median_color, seed_positions};
pub use flood::{fill_interior_voids, flood_from_seed};

use crate::image::{BitMask, RasterImage};
use crate::types::{CellRect, Rgb};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SegmentOptions {
    /// Euclidean RGB distance admitted by the edge-connected fill.
    pub bg_tolerance: f32,
    /// Tighter distance used by the interior void pass.
    pub interior_tolerance: f32,
    /// Seeds are pulled this many pixels in from the border.
    pub seed_inset: usize,
    /// Anchor patch radius (patch side is `2r + 1`).
    pub anchor_patch_radius: usize,
    /// Upper bound on pixels sampled for the aggregate background color.
    pub bg_sample_limit: usize,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            bg_tolerance: 45.0,
            interior_tolerance: 20.0,
            seed_inset: 2,
            anchor_patch_radius: 2,
            bg_sample_limit: 4096,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedAnchor {
    pub x: usize,
    pub y: usize,
    pub color: Rgb,
    pub accepted: bool,
}

/// Output of [`segment_background`].
#[derive(Clone, Debug)]
pub struct Segmentation {
    pub mask: BitMask,
    /// Median background color; `None` when nothing was classified.
    pub background: Option<Rgb>,
    pub anchors: Vec<SeedAnchor>,
    pub edge_filled: usize,
    pub interior_filled: usize,
}

pub fn segment_background(img: &RasterImage, opts: &SegmentOptions) -> Segmentation {
    let seeds = seed_positions(img.w, img.h, opts.seed_inset);
    segment_from_seeds(img, &seeds, opts)
}

/// Segment a whole sheet, seeding every cell rect instead of the sheet border.
///
/// The sheet border is a divider, so border seeds would flood the divider
/// network. Seeding inside each cell keeps the fill and the aggregate color
/// on the cell backgrounds; dividers and headers stay unclassified.
pub fn segment_cells(img: &RasterImage, rects: &[CellRect], opts: &SegmentOptions) -> Segmentation {
    let seeds: Vec<(usize, usize)> = rects
        .iter()
        .filter(|r| r.x + r.w <= img.w && r.y + r.h <= img.h)
        .flat_map(|r| {
            seed_positions(r.w, r.h, opts.seed_inset)
                .into_iter()
                .map(move |(x, y)| (r.x + x, r.y + y))
        })
        .collect();
    segment_from_seeds(img, &seeds, opts)
}

/// Anchor, fill and interior pass from explicit seed coordinates.
pub fn segment_from_seeds(
    img: &RasterImage,
    seeds: &[(usize, usize)],
    opts: &SegmentOptions,
) -> Segmentation {
    let mut mask = BitMask::new(img.w, img.h);
    let tol2 = squared(opts.bg_tolerance);
    let mut queue = VecDeque::new();
    let mut anchors = Vec::with_capacity(seeds.len());
    let mut edge_filled = 0;

    for &(x, y) in seeds {
        let color = anchor_color(img, x, y, opts.anchor_patch_radius);
        let seed = img.idx(x, y);
        let accepted = color.dist2(img.get_idx(seed)) <= tol2;
        if accepted {
            edge_filled += flood_from_seed(img, &mut mask, seed, color, tol2, &mut queue);
        }
        anchors.push(SeedAnchor {
            x,
            y,
            color,
            accepted,
        });
    }

    let background = sample_background(img, &mask, opts.bg_sample_limit);
    let interior_filled = match background {
        Some(bg) => fill_interior_voids(img, &mut mask, bg, squared(opts.interior_tolerance)),
        None => 0,
    };
    debug!(
        "segment {}x{}: seeds={}/{} edge={} interior={} bg={:?}",
        img.w,
        img.h,
        anchors.iter().filter(|a| a.accepted).count(),
        anchors.len(),
        edge_filled,
        interior_filled,
        background
    );

    Segmentation {
        mask,
        background,
        anchors,
        edge_filled,
        interior_filled,
    }
}

/// Median color over at most `limit` evenly strided background pixels.
pub fn sample_background(img: &RasterImage, mask: &BitMask, limit: usize) -> Option<Rgb> {
    let count = mask.count();
    if count == 0 {
        return None;
    }
    let step = count.div_ceil(limit.max(1));
    Some(median_color(
        mask.iter_set().step_by(step).map(|i| img.get_idx(i)),
    ))
}

#[inline]
fn squared(tol: f32) -> u32 {
    let t = tol.max(0.0);
    (t * t).round() as u32
}
