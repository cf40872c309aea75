//! Detection-time color quantization.
//!
//! Snapping each channel to the centre of one of `2^bits` buckets absorbs
//! compression noise so divider lines and flat backgrounds become uniform,
//! which sharpens the profiles fed to the band locator. The result is only
//! ever used for grid detection; cropping and matting read the original.
use crate::image::{ImageViewMut, RasterImage};

/// Quantize RGB to `2^bits` levels per channel. Alpha is kept. `bits` is
/// clamped to `1..=8`; 8 returns an identical copy.
pub fn posterize(src: &RasterImage, bits: u8) -> RasterImage {
    let bits = bits.clamp(1, 8);
    let lut = bucket_lut(bits);
    let mut out = src.clone();
    for row in out.rows_mut() {
        for px in row.chunks_exact_mut(4) {
            px[0] = lut[px[0] as usize];
            px[1] = lut[px[1] as usize];
            px[2] = lut[px[2] as usize];
        }
    }
    out
}

fn bucket_lut(bits: u8) -> [u8; 256] {
    let bucket = 256u32 >> bits;
    let half = bucket / 2;
    let mut lut = [0u8; 256];
    for (v, slot) in lut.iter_mut().enumerate() {
        *slot = ((v as u32 / bucket) * bucket + half).min(255) as u8;
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_bits_is_identity() {
        let mut img = RasterImage::new(3, 1);
        img.put(0, 0, [1, 128, 255, 255]);
        img.put(1, 0, [7, 9, 200, 10]);
        assert_eq!(posterize(&img, 8), img);
    }

    #[test]
    fn one_bit_snaps_to_bucket_centres() {
        let img = RasterImage::filled(2, 2, [10, 127, 128, 77]);
        let out = posterize(&img, 1);
        assert_eq!(out.get(1, 1), [64, 64, 192, 77]);
    }

    #[test]
    fn nearby_values_collapse() {
        let mut img = RasterImage::new(2, 1);
        img.put(0, 0, [100, 100, 100, 255]);
        img.put(1, 0, [103, 98, 101, 255]);
        let out = posterize(&img, 4);
        assert_eq!(out.get(0, 0), out.get(1, 0));
        // the source buffer is untouched
        assert_eq!(img.get(1, 0), [103, 98, 101, 255]);
    }
}
