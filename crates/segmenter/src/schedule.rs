//! Position-Based Label Schedule
//!
//! A recording session is a back-to-back sequence of condition segments. The
//! schedule maps the cumulative sample count to the condition that was being
//! recorded at that point.

use crate::error::SegmentError;
use crate::label::ConditionLabel;
use serde::{Deserialize, Serialize};

/// One condition segment of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelBand {
    /// Inclusive 1-based ordinal of the last sample in the band (`None` = open-ended)
    #[serde(default)]
    pub upper: Option<u64>,
    /// Condition recorded in the band
    pub label: ConditionLabel,
}

impl LabelBand {
    /// Band ending at `upper` (inclusive)
    pub const fn until(upper: u64, label: ConditionLabel) -> Self {
        Self {
            upper: Some(upper),
            label,
        }
    }

    /// Band covering everything after the previous bound
    pub const fn rest(label: ConditionLabel) -> Self {
        Self { upper: None, label }
    }
}

/// Ordered table of `(upper_bound, label)` bands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LabelBand>", into = "Vec<LabelBand>")]
pub struct LabelSchedule {
    bands: Vec<LabelBand>,
}

impl LabelSchedule {
    /// Build a schedule, checking that bounds strictly increase and that only
    /// the final band is open-ended
    pub fn new(bands: Vec<LabelBand>) -> Result<Self, SegmentError> {
        if bands.is_empty() {
            return Err(SegmentError::InvalidSchedule("schedule has no bands".into()));
        }

        let mut previous: Option<u64> = None;
        for (i, band) in bands.iter().enumerate() {
            match band.upper {
                Some(upper) => {
                    if upper == 0 || previous.is_some_and(|p| upper <= p) {
                        return Err(SegmentError::InvalidSchedule(format!(
                            "band {} ({}) bound {} does not increase",
                            i, band.label, upper
                        )));
                    }
                    previous = Some(upper);
                }
                None if i + 1 != bands.len() => {
                    return Err(SegmentError::InvalidSchedule(format!(
                        "open-ended band {} ({}) is not last",
                        i, band.label
                    )));
                }
                None => {}
            }
        }

        Ok(Self { bands })
    }

    /// Schedule that assigns one label to the whole stream
    pub fn uniform(label: ConditionLabel) -> Self {
        Self {
            bands: vec![LabelBand::rest(label)],
        }
    }

    /// Label for the window whose last sample has the given 1-based ordinal
    pub fn label_for(&self, end_sample: u64) -> Option<ConditionLabel> {
        let pos = self
            .bands
            .partition_point(|band| band.upper.is_some_and(|upper| upper < end_sample));
        self.bands.get(pos).map(|band| band.label)
    }
}

impl Default for LabelSchedule {
    /// The ten-segment test-rig session (2,816,000 samples when fully recorded)
    fn default() -> Self {
        use ConditionLabel::*;
        Self {
            bands: vec![
                LabelBand::until(256_000, BearFault),
                LabelBand::until(512_000, BearWarning),
                LabelBand::until(768_000, CaviFault),
                LabelBand::until(1_024_000, MisFault),
                LabelBand::until(1_280_000, MisWarning),
                LabelBand::until(1_792_000, Normal),
                LabelBand::until(2_048_000, RotorFault),
                LabelBand::until(2_304_000, UnbalFault),
                LabelBand::until(2_560_000, UnbalWarning),
                LabelBand::rest(VaneFault),
            ],
        }
    }
}

impl TryFrom<Vec<LabelBand>> for LabelSchedule {
    type Error = SegmentError;

    fn try_from(bands: Vec<LabelBand>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<LabelSchedule> for Vec<LabelBand> {
    fn from(schedule: LabelSchedule) -> Self {
        schedule.bands
    }
}
