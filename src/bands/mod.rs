//! Divider band search on 1-D profiles.
//!
//! Every locator looks at a window `[center - radius, center + radius]`
//! around an expected divider position, picks the extreme sample inside it,
//! then grows a [`Band`] outward while the profile stays on the divider side
//! of a threshold. If the extreme does not cross the threshold the locator
//! returns `None`; the caller decides what to do about a missing line.

#[cfg(test)]
mod tests;

use crate::profile::Profile;
use crate::types::Band;

/// Clamped inclusive search window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub lo: usize,
    pub hi: usize,
}

impl Window {
    /// Window around `center` clamped to `[0, len)`. `None` for empty profiles
    /// or a centre that lies entirely outside.
    pub fn around(center: f32, radius: usize, len: usize) -> Option<Self> {
        if len == 0 || !center.is_finite() {
            return None;
        }
        let c = center.round();
        if c < -(radius as f32) || c > (len - 1 + radius) as f32 {
            return None;
        }
        let c = c as isize;
        let lo = (c - radius as isize).max(0) as usize;
        let hi = ((c + radius as isize).max(0) as usize).min(len - 1);
        (lo <= hi).then_some(Self { lo, hi })
    }
}

/// Valley search: lowest sample in the window must be below `threshold`;
/// the band covers the contiguous run below `threshold` around it.
pub fn find_valley_band(
    profile: &Profile,
    center: f32,
    radius: usize,
    threshold: f32,
) -> Option<Band> {
    let win = Window::around(center, radius, profile.len())?;
    let seed = arg_extreme(profile, win, |a, b| a < b);
    if profile.get(seed) >= threshold {
        return None;
    }
    Some(grow(profile, seed, |v| v < threshold))
}

/// Peak search: highest sample must reach `min_peak`. The band grows while
/// samples stay above `local_ratio * peak`, a threshold local to this peak
/// so soft anti-aliased shoulders do not widen it.
pub fn find_peak_band(
    profile: &Profile,
    center: f32,
    radius: usize,
    min_peak: f32,
    local_ratio: f32,
) -> Option<Band> {
    let win = Window::around(center, radius, profile.len())?;
    let seed = arg_extreme(profile, win, |a, b| a > b);
    let peak = profile.get(seed);
    if peak < min_peak || peak <= 0.0 {
        return None;
    }
    let local = peak * local_ratio;
    Some(grow(profile, seed, |v| v >= local))
}

/// Darkness-fraction search: runs at or above `threshold` separated by at
/// most `merge_gap` samples are fused, so a grid line and the header strip
/// below it come back as one divider even when header text breaks the run.
pub fn find_dark_band(
    profile: &Profile,
    center: f32,
    radius: usize,
    threshold: f32,
    merge_gap: usize,
) -> Option<Band> {
    let win = Window::around(center, radius, profile.len())?;
    let seed = arg_extreme(profile, win, |a, b| a > b);
    if profile.get(seed) < threshold {
        return None;
    }
    let runs = find_runs(profile, |v| v >= threshold);
    merge_bands(&runs, merge_gap)
        .into_iter()
        .find(|b| b.contains(seed))
}

/// All maximal runs of samples satisfying `pred`, in ascending order.
pub fn find_runs<P: Fn(f32) -> bool>(profile: &Profile, pred: P) -> Vec<Band> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &v) in profile.values.iter().enumerate() {
        match (pred(v), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(Band::new(s, i - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(Band::new(s, profile.len() - 1));
    }
    runs
}

/// Fuse sorted bands whose gap (samples strictly between them) is at most `max_gap`.
pub fn merge_bands(bands: &[Band], max_gap: usize) -> Vec<Band> {
    let mut merged: Vec<Band> = Vec::with_capacity(bands.len());
    for &b in bands {
        match merged.last_mut() {
            Some(last) if b.start <= last.end + max_gap + 1 => {
                last.end = last.end.max(b.end);
            }
            _ => merged.push(b),
        }
    }
    merged
}

fn arg_extreme<F: Fn(f32, f32) -> bool>(profile: &Profile, win: Window, better: F) -> usize {
    let mut best = win.lo;
    for i in win.lo + 1..=win.hi {
        if better(profile.get(i), profile.get(best)) {
            best = i;
        }
    }
    best
}

fn grow<P: Fn(f32) -> bool>(profile: &Profile, seed: usize, inside: P) -> Band {
    let mut start = seed;
    while start > 0 && inside(profile.get(start - 1)) {
        start -= 1;
    }
    let mut end = seed;
    while end + 1 < profile.len() && inside(profile.get(end + 1)) {
        end += 1;
    }
    Band::new(start, end)
}
