/// Trait implemented by 1D smoothing kernels applied to profiles.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];

    /// Convolve `src` with the taps, replicating edge samples.
    fn apply(&self, src: &[f32]) -> Vec<f32> {
        let taps = self.taps();
        let n = src.len();
        if n == 0 || taps.is_empty() {
            return src.to_vec();
        }
        let r = (taps.len() / 2) as isize;
        let last = (n - 1) as isize;
        (0..n as isize)
            .map(|i| {
                taps.iter()
                    .enumerate()
                    .map(|(k, &t)| {
                        let j = (i + k as isize - r).clamp(0, last) as usize;
                        t * src[j]
                    })
                    .sum()
            })
            .collect()
    }
}

/// Simple wrapper around a static filter kernel.
#[derive(Clone, Copy, Debug)]
pub struct StaticSeparableFilter {
    taps: &'static [f32],
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f32]) -> Self {
        Self { taps }
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        self.taps
    }
}

/// Normalised 3-tap triangular filter `[1, 2, 1] / 4`.
pub const TRIANGLE_3TAP: StaticSeparableFilter = StaticSeparableFilter::new(&[0.25, 0.5, 0.25]);
