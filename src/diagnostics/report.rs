use super::timing::TimingBreakdown;
use crate::extractor::SegmentationScope;
use crate::islands::PruneStats;
use crate::layout::GridLayout;
use crate::matte::MatteStats;
use crate::types::{CellRect, Rgb};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub posterize_bits: Option<u8>,
}

/// Counters from the matting stages of one region (a cell or the whole sheet).
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStats {
    pub seeds_accepted: usize,
    pub edge_filled: usize,
    pub interior_filled: usize,
    pub background: Option<Rgb>,
    pub matte: MatteStats,
    pub islands: PruneStats,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellReport {
    pub index: usize,
    pub label: String,
    pub rect: CellRect,
    pub opaque_px: usize,
    /// Present in per-cell scope; whole-sheet stats live on the report.
    pub stats: Option<CellStats>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub input: InputDescriptor,
    pub scope: SegmentationScope,
    pub layout: GridLayout,
    pub cells: Vec<CellReport>,
    pub whole_image: Option<CellStats>,
    pub timing: TimingBreakdown,
}
