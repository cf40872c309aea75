//! Hop-count distance to the nearest background pixel.
use crate::image::BitMask;
use std::collections::VecDeque;

/// Distance value for pixels that cannot reach any background pixel.
pub const UNREACHED: u32 = u32::MAX;

/// Per-pixel 4-connected BFS distance; `0` on background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u32>,
}

impl DistanceField {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.data[y * self.w + x]
    }
}

/// Multi-source BFS seeded at every set bit of `mask`.
pub fn distance_field(mask: &BitMask) -> DistanceField {
    let (w, h) = (mask.w, mask.h);
    let mut data = vec![UNREACHED; w * h];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(mask.count());
    for i in mask.iter_set() {
        data[i] = 0;
        queue.push_back(i);
    }
    while let Some(i) = queue.pop_front() {
        let next = data[i] + 1;
        let (x, y) = (i % w, i / w);
        let mut relax = |j: usize, queue: &mut VecDeque<usize>| {
            if data[j] == UNREACHED {
                data[j] = next;
                queue.push_back(j);
            }
        };
        if x > 0 {
            relax(i - 1, &mut queue);
        }
        if x + 1 < w {
            relax(i + 1, &mut queue);
        }
        if y > 0 {
            relax(i - w, &mut queue);
        }
        if y + 1 < h {
            relax(i + w, &mut queue);
        }
    }
    DistanceField { w, h, data }
}
