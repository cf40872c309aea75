//! Owned RGBA8 raster in row-major layout, 4 bytes per pixel.
//!
//! Pipeline stages never mutate a shared buffer: every transformation takes
//! `&RasterImage` and returns a new one.
use super::traits::{ImageView, ImageViewMut};
use crate::types::CellRect;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// RGBA bytes, `4 * w * h` long
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Fully transparent image of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h * 4],
        }
    }

    /// Image filled with a single RGBA value.
    pub fn filled(w: usize, h: usize, px: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(w * h * 4);
        for _ in 0..w * h {
            data.extend_from_slice(&px);
        }
        Self { w, h, data }
    }

    /// Wrap raw RGBA bytes. Returns `None` when the length does not match.
    pub fn from_raw(w: usize, h: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == w * h * 4).then_some(Self { w, h, data })
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        self.get_idx(self.idx(x, y))
    }

    /// Pixel at flat index `i = y * w + x`.
    #[inline]
    pub fn get_idx(&self, i: usize) -> [u8; 4] {
        let o = i * 4;
        [
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ]
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, px: [u8; 4]) {
        let i = self.idx(x, y);
        self.put_idx(i, px);
    }

    #[inline]
    pub fn put_idx(&mut self, i: usize, px: [u8; 4]) {
        let o = i * 4;
        self.data[o..o + 4].copy_from_slice(&px);
    }

    #[inline]
    pub fn alpha_idx(&self, i: usize) -> u8 {
        self.data[i * 4 + 3]
    }

    /// Copy out `rect`, clamped to the image bounds.
    pub fn crop(&self, rect: &CellRect) -> RasterImage {
        let x0 = rect.x.min(self.w);
        let y0 = rect.y.min(self.h);
        let x1 = (rect.x + rect.w).min(self.w);
        let y1 = (rect.y + rect.h).min(self.h);
        let (cw, ch) = (x1 - x0, y1 - y0);
        let mut data = Vec::with_capacity(cw * ch * 4);
        for y in y0..y1 {
            let start = (y * self.w + x0) * 4;
            data.extend_from_slice(&self.data[start..start + cw * 4]);
        }
        RasterImage {
            w: cw,
            h: ch,
            data,
        }
    }

    /// Paste `src` with its top-left corner at `(x, y)`. Out-of-bounds parts are dropped.
    pub fn blit(&mut self, src: &RasterImage, x: usize, y: usize) {
        if x >= self.w || y >= self.h {
            return;
        }
        let cw = src.w.min(self.w - x);
        for sy in 0..src.h.min(self.h - y) {
            let s = sy * src.w * 4;
            let d = ((y + sy) * self.w + x) * 4;
            self.data[d..d + cw * 4].copy_from_slice(&src.data[s..s + cw * 4]);
        }
    }

    /// Count of pixels with non-zero alpha.
    pub fn opaque_count(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] > 0).count()
    }
}

impl ImageView for RasterImage {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w * 4;
        &self.data[start..start + self.w * 4]
    }
}

impl ImageViewMut for RasterImage {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.w * 4;
        let end = start + self.w * 4;
        &mut self.data[start..end]
    }
}
