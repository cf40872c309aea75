//! Seed placement and robust local color sampling.
use crate::image::RasterImage;
use crate::types::Rgb;

/// Four corners and four edge midpoints, pulled `inset` pixels inward so
/// seeds skip border bleed. Duplicates (tiny images) are removed.
pub fn seed_positions(w: usize, h: usize, inset: usize) -> Vec<(usize, usize)> {
    if w == 0 || h == 0 {
        return Vec::new();
    }
    let ix = inset.min((w - 1) / 2);
    let iy = inset.min((h - 1) / 2);
    let (x0, x1, xm) = (ix, w - 1 - ix, w / 2);
    let (y0, y1, ym) = (iy, h - 1 - iy, h / 2);
    let mut seeds = vec![
        (x0, y0),
        (x1, y0),
        (x0, y1),
        (x1, y1),
        (xm, y0),
        (x0, ym),
        (x1, ym),
        (xm, y1),
    ];
    let mut seen = Vec::with_capacity(seeds.len());
    seeds.retain(|s| {
        if seen.contains(s) {
            false
        } else {
            seen.push(*s);
            true
        }
    });
    seeds
}

/// Per-channel median of the `(2r+1)²` patch centred on `(x, y)`.
pub fn anchor_color(img: &RasterImage, x: usize, y: usize, radius: usize) -> Rgb {
    let xs = x.saturating_sub(radius)..=(x + radius).min(img.w - 1);
    let ys = y.saturating_sub(radius)..=(y + radius).min(img.h - 1);
    let mut patch = Vec::with_capacity((2 * radius + 1) * (2 * radius + 1));
    for py in ys {
        for px in xs.clone() {
            patch.push(img.get(px, py));
        }
    }
    median_color(patch)
}

/// Per-channel median of a set of pixels, computed with 256-bin histograms.
pub fn median_color<I: IntoIterator<Item = [u8; 4]>>(pixels: I) -> Rgb {
    let mut hist = [[0u32; 256]; 3];
    let mut n = 0u32;
    for px in pixels {
        for c in 0..3 {
            hist[c][px[c] as usize] += 1;
        }
        n += 1;
    }
    if n == 0 {
        return Rgb::default();
    }
    let half = n.div_ceil(2);
    let mut out = [0u8; 3];
    for (c, channel) in hist.iter().enumerate() {
        let mut acc = 0;
        for (v, &count) in channel.iter().enumerate() {
            acc += count;
            if acc >= half {
                out[c] = v as u8;
                break;
            }
        }
    }
    Rgb(out)
}
