//! Packed one-bit-per-pixel mask. `true` marks a background pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitMask {
    pub w: usize,
    pub h: usize,
    words: Vec<u64>,
}

impl BitMask {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            words: vec![0; (w * h).div_ceil(64)],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.w * self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bit at flat index `i = y * w + x`.
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        (self.words[i >> 6] >> (i & 63)) & 1 == 1
    }

    #[inline]
    pub fn get_xy(&self, x: usize, y: usize) -> bool {
        self.get(y * self.w + x)
    }

    #[inline]
    pub fn set(&mut self, i: usize) {
        self.words[i >> 6] |= 1u64 << (i & 63);
    }

    #[inline]
    pub fn clear(&mut self, i: usize) {
        self.words[i >> 6] &= !(1u64 << (i & 63));
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterate flat indices of set bits in ascending order.
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        let len = self.len();
        self.words
            .iter()
            .enumerate()
            .flat_map(move |(wi, &word)| {
                let mut bits = word;
                std::iter::from_fn(move || {
                    if bits == 0 {
                        return None;
                    }
                    let tz = bits.trailing_zeros() as usize;
                    bits &= bits - 1;
                    Some(wi * 64 + tz)
                })
            })
            .take_while(move |&i| i < len)
    }
}

#[cfg(test)]
mod tests {
    use super::BitMask;

    #[test]
    fn set_get_count() {
        let mut m = BitMask::new(10, 10);
        m.set(0);
        m.set(63);
        m.set(64);
        m.set(99);
        assert!(m.get(63) && m.get(64) && m.get_xy(9, 9));
        assert!(!m.get(1));
        assert_eq!(m.count(), 4);
        m.clear(63);
        assert_eq!(m.iter_set().collect::<Vec<_>>(), vec![0, 64, 99]);
    }
}
