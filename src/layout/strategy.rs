//! The closed set of divider detectors compared by the resolver.
use super::LayoutOptions;
use crate::bands::{find_dark_band, find_peak_band, find_valley_band};
use crate::profile::{AxisProfiles, Profile};
use crate::types::Band;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineStrategy {
    /// Valleys of the brightness profile.
    Brightness,
    /// Peaks of the saturation profile's deviation from its median; catches
    /// dividers that differ from the cells in chroma rather than luma.
    Saturation,
    /// Merged runs of the darkness-fraction profile; fuses grid line and header.
    Darkness,
}

impl LineStrategy {
    pub const ALL: [LineStrategy; 3] = [
        LineStrategy::Brightness,
        LineStrategy::Saturation,
        LineStrategy::Darkness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LineStrategy::Brightness => "brightness",
            LineStrategy::Saturation => "saturation",
            LineStrategy::Darkness => "darkness",
        }
    }

    /// Bind the strategy to one axis' profiles, deriving its thresholds from
    /// the profile statistics of this image.
    pub fn prepare(self, profiles: &AxisProfiles, opts: &LayoutOptions) -> PreparedLocator {
        match self {
            LineStrategy::Brightness => {
                let threshold = profiles.brightness.median() * opts.valley_ratio;
                PreparedLocator::Valley {
                    profile: profiles.brightness.clone(),
                    threshold,
                }
            }
            LineStrategy::Saturation => {
                let dev = profiles
                    .saturation
                    .deviation_from(profiles.saturation.median());
                let min_peak = (dev.median() * opts.peak_min_factor).max(opts.peak_min_abs);
                PreparedLocator::Peak {
                    profile: dev,
                    min_peak,
                    local_ratio: opts.peak_local_ratio,
                }
            }
            LineStrategy::Darkness => {
                let threshold = opts
                    .darkness_threshold
                    .max(2.0 * profiles.darkness.median());
                PreparedLocator::Dark {
                    profile: profiles.darkness.clone(),
                    threshold,
                    merge_gap: opts.merge_gap,
                }
            }
        }
    }
}

/// A strategy with its profile and thresholds fixed for one axis.
#[derive(Clone, Debug)]
pub enum PreparedLocator {
    Valley {
        profile: Profile,
        threshold: f32,
    },
    Peak {
        profile: Profile,
        min_peak: f32,
        local_ratio: f32,
    },
    Dark {
        profile: Profile,
        threshold: f32,
        merge_gap: usize,
    },
}

impl PreparedLocator {
    pub fn locate(&self, center: f32, radius: usize) -> Option<Band> {
        match self {
            PreparedLocator::Valley { profile, threshold } => {
                find_valley_band(profile, center, radius, *threshold)
            }
            PreparedLocator::Peak {
                profile,
                min_peak,
                local_ratio,
            } => find_peak_band(profile, center, radius, *min_peak, *local_ratio),
            PreparedLocator::Dark {
                profile,
                threshold,
                merge_gap,
            } => find_dark_band(profile, center, radius, *threshold, *merge_gap),
        }
    }
}
