//! Edge decontamination.
//!
//! Hard background removal leaves a halo of background-tinted pixels around
//! every sprite. Pixels within `radius` hops of the background are treated as
//! a blend `observed = α·fg + (1-α)·bg`; α mixes a color estimate (distance
//! from the background color) with a spatial one (hop distance over the
//! radius), leaning on color. Solving for `fg` un-mixes the background and
//! `α` becomes the output alpha.
//!
//! Background pixels come out fully transparent. Foreground pixels farther
//! than `radius` from the background are copied unchanged.

mod distance;

pub use distance::{distance_field, DistanceField, UNREACHED};

use crate::image::{BitMask, RasterImage};
use crate::types::Rgb;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatteOptions {
    /// Max hop distance from the background that gets decontaminated.
    pub radius: u32,
    /// RGB distance from the background color that maps to full opacity.
    pub color_alpha_range: f32,
    /// Weight of the color estimate; the spatial estimate gets the rest.
    pub color_weight: f32,
}

impl Default for MatteOptions {
    fn default() -> Self {
        Self {
            radius: 4,
            color_alpha_range: 120.0,
            color_weight: 0.7,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatteStats {
    pub cleared: usize,
    pub decontaminated: usize,
}

/// Apply the background mask and un-mix edge pixels.
///
/// With `background == None` (nothing was classified) the image is returned
/// as is.
pub fn decontaminate(
    src: &RasterImage,
    mask: &BitMask,
    background: Option<Rgb>,
    opts: &MatteOptions,
) -> (RasterImage, MatteStats) {
    let mut out = src.clone();
    let mut stats = MatteStats::default();
    let Some(bg) = background else {
        return (out, stats);
    };
    let field = distance_field(mask);
    let radius = opts.radius;
    let w_color = opts.color_weight.clamp(0.0, 1.0);
    let range = opts.color_alpha_range.max(1.0);

    for (i, &d) in field.data.iter().enumerate() {
        if d == 0 {
            out.put_idx(i, [0, 0, 0, 0]);
            stats.cleared += 1;
            continue;
        }
        if d > radius {
            continue;
        }
        let px = src.get_idx(i);
        let alpha_color = ((bg.dist2(px) as f32).sqrt() / range).min(1.0);
        let alpha_space = (d as f32 / radius as f32).min(1.0);
        let alpha = (w_color * alpha_color + (1.0 - w_color) * alpha_space).clamp(0.0, 1.0);
        out.put_idx(i, unmix(px, bg, alpha));
        stats.decontaminated += 1;
    }
    (out, stats)
}

/// Solve `observed = α·fg + (1-α)·bg` for `fg` and pack `α` into the alpha channel.
#[inline]
pub fn unmix(px: [u8; 4], bg: Rgb, alpha: f32) -> [u8; 4] {
    let a8 = (alpha * px[3] as f32).round();
    if a8 < 1.0 {
        return [0, 0, 0, 0];
    }
    let inv = 1.0 - alpha;
    let mut out = [0u8; 4];
    for c in 0..3 {
        let fg = (px[c] as f32 - inv * bg.0[c] as f32) / alpha;
        out[c] = fg.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = a8.min(255.0) as u8;
    out
}
