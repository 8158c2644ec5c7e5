//! Machine Condition Labels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors while interpreting condition labels
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// Label string not present in the condition table
    #[error("Unknown condition label: {0:?}")]
    Unknown(String),
}

/// Condition of the machine while a stretch of the stream was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionLabel {
    BearFault,
    BearWarning,
    MisFault,
    MisWarning,
    UnbalFault,
    UnbalWarning,
    RotorFault,
    CaviFault,
    VaneFault,
    Normal,
}

impl ConditionLabel {
    /// Every label, in declaration order
    pub const ALL: [ConditionLabel; 10] = [
        ConditionLabel::BearFault,
        ConditionLabel::BearWarning,
        ConditionLabel::MisFault,
        ConditionLabel::MisWarning,
        ConditionLabel::UnbalFault,
        ConditionLabel::UnbalWarning,
        ConditionLabel::RotorFault,
        ConditionLabel::CaviFault,
        ConditionLabel::VaneFault,
        ConditionLabel::Normal,
    ];

    /// Canonical snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionLabel::BearFault => "bear_fault",
            ConditionLabel::BearWarning => "bear_warning",
            ConditionLabel::MisFault => "mis_fault",
            ConditionLabel::MisWarning => "mis_warning",
            ConditionLabel::UnbalFault => "unbal_fault",
            ConditionLabel::UnbalWarning => "unbal_warning",
            ConditionLabel::RotorFault => "rotor_fault",
            ConditionLabel::CaviFault => "cavi_fault",
            ConditionLabel::VaneFault => "vane_fault",
            ConditionLabel::Normal => "normal",
        }
    }

    /// True for the `*_warning` conditions
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ConditionLabel::BearWarning | ConditionLabel::MisWarning | ConditionLabel::UnbalWarning
        )
    }

    /// True for the `*_fault` conditions
    pub fn is_fault(&self) -> bool {
        !self.is_warning() && *self != ConditionLabel::Normal
    }
}

impl fmt::Display for ConditionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionLabel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ConditionLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == trimmed)
            .ok_or_else(|| LabelError::Unknown(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for label in ConditionLabel::ALL {
            assert_eq!(label.as_str().parse::<ConditionLabel>(), Ok(label));
        }
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        // No catch-all: unrecognized conditions must not map to an all-absent label
        let err = "gear_fault".parse::<ConditionLabel>().unwrap_err();
        assert_eq!(err, LabelError::Unknown("gear_fault".to_string()));
        assert!("".parse::<ConditionLabel>().is_err());
        assert!("Normal".parse::<ConditionLabel>().is_err());
    }

    #[test]
    fn test_warning_fault_partition() {
        for label in ConditionLabel::ALL {
            let classes = [label.is_warning(), label.is_fault(), label == ConditionLabel::Normal];
            assert_eq!(classes.iter().filter(|c| **c).count(), 1, "{label}");
        }
    }
}
