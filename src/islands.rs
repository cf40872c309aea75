//! Removal of small disconnected opaque blobs.
//!
//! Opaque pixels (alpha > 0) are grouped into 4-connected components by BFS
//! over a flat label array. Components smaller than `min_area` are cleared to
//! fully transparent; the sprite body is expected to be the dominant
//! component and is left alone.
use crate::image::RasterImage;
use serde::Serialize;
use std::collections::VecDeque;

const UNLABELED: u32 = u32::MAX;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PruneStats {
    pub components: usize,
    pub removed: usize,
    pub removed_pixels: usize,
}

pub fn prune_islands(src: &RasterImage, min_area: usize) -> (RasterImage, PruneStats) {
    let (w, h) = (src.w, src.h);
    let mut labels = vec![UNLABELED; w * h];
    let mut areas: Vec<usize> = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..w * h {
        if labels[start] != UNLABELED || src.alpha_idx(start) == 0 {
            continue;
        }
        let label = areas.len() as u32;
        labels[start] = label;
        queue.push_back(start);
        let mut area = 0;
        while let Some(i) = queue.pop_front() {
            area += 1;
            let (x, y) = (i % w, i / w);
            let neighbors = [
                (x > 0).then(|| i - 1),
                (x + 1 < w).then(|| i + 1),
                (y > 0).then(|| i - w),
                (y + 1 < h).then(|| i + w),
            ];
            for j in neighbors.into_iter().flatten() {
                if labels[j] == UNLABELED && src.alpha_idx(j) > 0 {
                    labels[j] = label;
                    queue.push_back(j);
                }
            }
        }
        areas.push(area);
    }

    let mut out = src.clone();
    let mut stats = PruneStats {
        components: areas.len(),
        ..Default::default()
    };
    stats.removed = areas.iter().filter(|&&a| a < min_area).count();
    if stats.removed == 0 {
        return (out, stats);
    }
    for (i, &label) in labels.iter().enumerate() {
        if label != UNLABELED && areas[label as usize] < min_area {
            out.put_idx(i, [0, 0, 0, 0]);
            stats.removed_pixels += 1;
        }
    }
    (out, stats)
}
