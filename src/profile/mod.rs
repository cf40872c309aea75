//! 1-D signals across the rows or columns of a grid image.
//!
//! Three profiles are built per axis, each holding one score per column
//! (`Axis::Columns`) or per row (`Axis::Rows`):
//! - brightness: mean Rec.601 luminance of the sampled pixels,
//! - saturation: mean HSV saturation `(max - min) / max`,
//! - darkness: share of sampled pixels whose luminance is below a cutoff.
//!
//! Each line is sampled every `sample_stride` pixels; dividers are several
//! pixels wide so the sparse sampling does not move them. All profiles are
//! smoothed once with [`TRIANGLE_3TAP`] to flatten single-row compression
//! noise before band detection.

pub mod filters;

#[cfg(test)]
mod tests;

pub use filters::{SeparableFilter, StaticSeparableFilter, TRIANGLE_3TAP};

use crate::image::{ImageView, RasterImage};
use crate::types::Axis;
use serde::{Deserialize, Serialize};

/// Ordered per-row or per-column scores.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Profile {
    pub values: Vec<f32>,
}

impl Profile {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> f32 {
        self.values[i]
    }

    /// New profile convolved with `filter`.
    pub fn smoothed<F: SeparableFilter>(&self, filter: &F) -> Profile {
        Profile::new(filter.apply(&self.values))
    }

    pub fn median(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let mut sorted = self.values.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let m = sorted.len();
        if m % 2 == 1 {
            sorted[m / 2]
        } else {
            0.5 * (sorted[m / 2 - 1] + sorted[m / 2])
        }
    }

    /// `|v - center|` per sample.
    pub fn deviation_from(&self, center: f32) -> Profile {
        Profile::new(self.values.iter().map(|v| (v - center).abs()).collect())
    }
}

/// Sampling knobs for [`AxisProfiles::build`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileOptions {
    /// Sample every n-th pixel along each row/column (>=1).
    pub sample_stride: usize,
    /// Luminance below which a pixel counts towards the darkness fraction.
    pub darkness_cutoff: f32,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            sample_stride: 2,
            darkness_cutoff: 60.0,
        }
    }
}

/// Smoothed brightness, saturation and darkness profiles for one axis.
#[derive(Clone, Debug, Serialize)]
pub struct AxisProfiles {
    pub axis: Axis,
    pub brightness: Profile,
    pub saturation: Profile,
    pub darkness: Profile,
}

impl AxisProfiles {
    pub fn build(img: &RasterImage, axis: Axis, opts: &ProfileOptions) -> Self {
        let stride = opts.sample_stride.max(1);
        let len = match axis {
            Axis::Columns => img.w,
            Axis::Rows => img.h,
        };
        let mut bright = vec![0.0f32; len];
        let mut sat = vec![0.0f32; len];
        let mut dark = vec![0.0f32; len];
        let mut counts = vec![0u32; len];

        for (y, row) in img.rows().enumerate() {
            let row_sampled = y % stride == 0;
            for (x, px) in row.chunks_exact(4).enumerate() {
                let slot = match axis {
                    Axis::Columns if row_sampled => x,
                    Axis::Rows if x % stride == 0 => y,
                    _ => continue,
                };
                let lum = luminance(px);
                bright[slot] += lum;
                sat[slot] += saturation(px);
                if lum < opts.darkness_cutoff {
                    dark[slot] += 1.0;
                }
                counts[slot] += 1;
            }
        }

        for i in 0..len {
            let n = counts[i].max(1) as f32;
            bright[i] /= n;
            sat[i] /= n;
            dark[i] /= n;
        }

        let filter = TRIANGLE_3TAP;
        Self {
            axis,
            brightness: Profile::new(bright).smoothed(&filter),
            saturation: Profile::new(sat).smoothed(&filter),
            darkness: Profile::new(dark).smoothed(&filter),
        }
    }
}

/// Rec.601 luma in `[0, 255]`.
#[inline]
pub fn luminance(px: &[u8]) -> f32 {
    0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32
}

/// HSV saturation in `[0, 1]`; black is fully unsaturated.
#[inline]
pub fn saturation(px: &[u8]) -> f32 {
    let max = px[0].max(px[1]).max(px[2]);
    if max == 0 {
        return 0.0;
    }
    let min = px[0].min(px[1]).min(px[2]);
    (max - min) as f32 / max as f32
}
