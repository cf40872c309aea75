use crate::image::{BitMask, RasterImage};
use crate::types::Rgb;
use std::collections::VecDeque;

/// 4-connected BFS from `seed`, admitting pixels within `tol2` squared RGB
/// distance of `anchor`. Comparing against the seed's anchor rather than the
/// neighbouring frontier pixel keeps the fill from creeping along gradients
/// into the foreground. Returns the number of newly marked pixels.
pub fn flood_from_seed(
    img: &RasterImage,
    mask: &mut BitMask,
    seed: usize,
    anchor: Rgb,
    tol2: u32,
    queue: &mut VecDeque<usize>,
) -> usize {
    if mask.get(seed) || anchor.dist2(img.get_idx(seed)) > tol2 {
        return 0;
    }
    let (w, h) = (img.w, img.h);
    queue.clear();
    mask.set(seed);
    queue.push_back(seed);
    let mut filled = 1;
    while let Some(i) = queue.pop_front() {
        let (x, y) = (i % w, i / w);
        let mut visit = |j: usize, mask: &mut BitMask, queue: &mut VecDeque<usize>| {
            if !mask.get(j) && anchor.dist2(img.get_idx(j)) <= tol2 {
                mask.set(j);
                queue.push_back(j);
                filled += 1;
            }
        };
        if x > 0 {
            visit(i - 1, mask, queue);
        }
        if x + 1 < w {
            visit(i + 1, mask, queue);
        }
        if y > 0 {
            visit(i - w, mask, queue);
        }
        if y + 1 < h {
            visit(i + w, mask, queue);
        }
    }
    filled
}

/// Mark every unmasked pixel within `tol2` of `background`. Reclaims enclosed
/// background pockets that the border-connected fill cannot reach.
pub fn fill_interior_voids(
    img: &RasterImage,
    mask: &mut BitMask,
    background: Rgb,
    tol2: u32,
) -> usize {
    let mut filled = 0;
    for i in 0..mask.len() {
        if !mask.get(i) && background.dist2(img.get_idx(i)) <= tol2 {
            mask.set(i);
            filled += 1;
        }
    }
    filled
}
