//! Scoring of candidate divider sets. Lower is better.
use super::LayoutOptions;
use crate::types::Band;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateScore {
    /// Coefficient of variation of the distances between divider centres.
    pub spacing_cv: f32,
    /// Share of the 7 positions filled from the template instead of detected.
    pub fallback_fraction: f32,
    /// Mean width of the detected bands, in pixels.
    pub mean_detected_width: f32,
    /// Whether `mean_detected_width` exceeded the allowed divider thickness.
    pub too_wide: bool,
    pub total: f32,
}

/// Score `lines` (one band per divider, fallbacks already filled in).
///
/// `detected[i]` tells whether line `i` came from the locator.
/// `expected_thickness` is the scaled divider (plus header on rows) width.
pub fn score_candidate(
    lines: &[Band],
    detected: &[bool],
    expected_thickness: f32,
    opts: &LayoutOptions,
) -> CandidateScore {
    let spacing_cv = spacing_cv(lines);
    let n = detected.len().max(1) as f32;
    let hits: Vec<&Band> = lines
        .iter()
        .zip(detected)
        .filter_map(|(b, &d)| d.then_some(b))
        .collect();
    let fallback_fraction = (detected.len() - hits.len()) as f32 / n;
    let mean_detected_width = if hits.is_empty() {
        0.0
    } else {
        hits.iter().map(|b| b.width() as f32).sum::<f32>() / hits.len() as f32
    };
    let too_wide = mean_detected_width > opts.width_factor * expected_thickness.max(1.0);

    let mut total = spacing_cv + opts.fallback_penalty * fallback_fraction;
    if too_wide {
        total += opts.width_penalty;
    }
    CandidateScore {
        spacing_cv,
        fallback_fraction,
        mean_detected_width,
        too_wide,
        total,
    }
}

/// Coefficient of variation of consecutive centre gaps; infinite when the
/// lines are not strictly increasing.
pub fn spacing_cv(lines: &[Band]) -> f32 {
    if lines.len() < 3 {
        return 0.0;
    }
    let gaps: Vec<f32> = lines
        .windows(2)
        .map(|p| p[1].center() - p[0].center())
        .collect();
    if gaps.iter().any(|&g| g <= 0.0) {
        return f32::INFINITY;
    }
    let mean = gaps.iter().sum::<f32>() / gaps.len() as f32;
    let var = gaps.iter().map(|g| (g - mean) * (g - mean)).sum::<f32>() / gaps.len() as f32;
    var.sqrt() / mean
}
