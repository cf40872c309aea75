//! Run report produced by `SpriteExtractor::extract_with_diagnostics`.
//!
//! `ExtractionReport` bundles the resolved layout (with every candidate the
//! resolver scored), one `CellReport` per sprite and a timing trace.

pub mod report;
pub mod timing;

pub use report::{CellReport, CellStats, ExtractionReport, InputDescriptor};
pub use timing::{StageTiming, TimingBreakdown};
