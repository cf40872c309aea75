//! Value types shared by every stage of the extraction pipeline.
use crate::image::RasterImage;
use serde::{Deserialize, Serialize};

/// Number of cells along each axis of the sheet.
pub const GRID_DIM: usize = 6;
/// Total number of cells (and sprites) per sheet.
pub const CELL_COUNT: usize = GRID_DIM * GRID_DIM;
/// Divider lines per axis, including both outer borders.
pub const LINES_PER_AXIS: usize = GRID_DIM + 1;

/// Image axis a profile or band refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    /// Varies along x; one profile sample per column.
    Columns,
    /// Varies along y; one profile sample per row.
    Rows,
}

impl Axis {
    pub fn name(self) -> &'static str {
        match self {
            Axis::Columns => "columns",
            Axis::Rows => "rows",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive pixel range `[start, end]` on one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub start: usize,
    pub end: usize,
}

impl Band {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "band start {start} after end {end}");
        Self { start, end }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.end + 1 - self.start
    }

    #[inline]
    pub fn center(&self) -> f32 {
        0.5 * (self.start + self.end) as f32
    }

    #[inline]
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos <= self.end
    }
}

/// Content-only rectangle of one cell in image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

/// RGB triple. Used for anchor colors and the aggregate background color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    #[inline]
    pub fn from_rgba(px: [u8; 4]) -> Self {
        Rgb([px[0], px[1], px[2]])
    }

    /// Squared euclidean distance in RGB space.
    #[inline]
    pub fn dist2(&self, px: [u8; 4]) -> u32 {
        let dr = self.0[0] as i32 - px[0] as i32;
        let dg = self.0[1] as i32 - px[1] as i32;
        let db = self.0[2] as i32 - px[2] as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

/// Geometry of the template that was sent to the image model.
///
/// Only used to derive expected divider positions and the fallback layout;
/// the returned image is never assumed to match it pixel for pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateGeometry {
    pub cell_content_width: usize,
    pub cell_content_height: usize,
    pub header_height: usize,
    pub divider_thickness: usize,
}

impl TemplateGeometry {
    /// Template extent along `axis`: six cells plus seven dividers.
    pub fn extent(&self, axis: Axis) -> usize {
        GRID_DIM * self.pitch(axis) + self.divider_thickness
    }

    /// Distance between consecutive divider starts along `axis`.
    pub fn pitch(&self, axis: Axis) -> usize {
        match axis {
            Axis::Columns => self.cell_content_width + self.divider_thickness,
            Axis::Rows => self.cell_content_height + self.header_height + self.divider_thickness,
        }
    }

    /// Divider plus the strip that follows it before content begins.
    pub fn lead(&self, axis: Axis) -> usize {
        match axis {
            Axis::Columns => self.divider_thickness,
            Axis::Rows => self.divider_thickness + self.header_height,
        }
    }

    pub fn content(&self, axis: Axis) -> usize {
        match axis {
            Axis::Columns => self.cell_content_width,
            Axis::Rows => self.cell_content_height,
        }
    }
}

/// One extracted sprite, tagged with its row-major cell index.
#[derive(Clone, Debug)]
pub struct ExtractedSprite {
    pub cell_index: usize,
    pub label: String,
    pub pixels: RasterImage,
}
