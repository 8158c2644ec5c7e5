//! Fault Label Derivation

use segmenter::ConditionLabel;
use serde::{Deserialize, Serialize};

/// Severity code: condition absent
pub const ABSENT: u8 = 0;
/// Severity code: warning stage
pub const WARNING: u8 = 1;
/// Severity code: fault stage
pub const FAULT: u8 = 2;

/// Training labels derived from a window's condition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultLabels {
    /// 1 for `normal` and every `*_warning` condition
    pub normal: u8,
    /// 1 for every `*_fault` condition
    pub anomaly: u8,
    pub bearing: u8,
    pub misalignment: u8,
    pub unbalance: u8,
    pub rotor: u8,
    pub cavitation: u8,
    pub vane: u8,
    /// 1 only for the true `normal` condition (training-eligible)
    pub real_normal: u8,
}

impl FaultLabels {
    /// Severity codes in column order
    pub fn severities(&self) -> [u8; 6] {
        [
            self.bearing,
            self.misalignment,
            self.unbalance,
            self.rotor,
            self.cavitation,
            self.vane,
        ]
    }
}

impl From<ConditionLabel> for FaultLabels {
    fn from(label: ConditionLabel) -> Self {
        let healthy = FaultLabels {
            normal: 1,
            ..Default::default()
        };
        let faulty = FaultLabels {
            anomaly: 1,
            ..Default::default()
        };

        match label {
            ConditionLabel::Normal => FaultLabels {
                real_normal: 1,
                ..healthy
            },
            ConditionLabel::BearWarning => FaultLabels {
                bearing: WARNING,
                ..healthy
            },
            ConditionLabel::MisWarning => FaultLabels {
                misalignment: WARNING,
                ..healthy
            },
            ConditionLabel::UnbalWarning => FaultLabels {
                unbalance: WARNING,
                ..healthy
            },
            ConditionLabel::BearFault => FaultLabels {
                bearing: FAULT,
                ..faulty
            },
            ConditionLabel::MisFault => FaultLabels {
                misalignment: FAULT,
                ..faulty
            },
            ConditionLabel::UnbalFault => FaultLabels {
                unbalance: FAULT,
                ..faulty
            },
            ConditionLabel::RotorFault => FaultLabels {
                rotor: FAULT,
                ..faulty
            },
            ConditionLabel::CaviFault => FaultLabels {
                cavitation: FAULT,
                ..faulty
            },
            ConditionLabel::VaneFault => FaultLabels {
                vane: FAULT,
                ..faulty
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normal_is_training_eligible() {
        let labels = FaultLabels::from(ConditionLabel::Normal);
        assert_eq!((labels.normal, labels.anomaly, labels.real_normal), (1, 0, 1));
        assert_eq!(labels.severities(), [0; 6]);
    }

    #[test]
    fn test_warning_counts_as_normal_but_not_real_normal() {
        let labels = FaultLabels::from(ConditionLabel::BearWarning);
        assert_eq!((labels.normal, labels.anomaly, labels.real_normal), (1, 0, 0));
        assert_eq!(labels.bearing, WARNING);
    }

    #[test]
    fn test_fault_severity_codes() {
        assert_eq!(FaultLabels::from(ConditionLabel::BearFault).bearing, FAULT);
        assert_eq!(FaultLabels::from(ConditionLabel::MisFault).misalignment, FAULT);
        assert_eq!(FaultLabels::from(ConditionLabel::UnbalWarning).unbalance, WARNING);
        assert_eq!(FaultLabels::from(ConditionLabel::RotorFault).rotor, FAULT);
        assert_eq!(FaultLabels::from(ConditionLabel::CaviFault).cavitation, FAULT);
        assert_eq!(FaultLabels::from(ConditionLabel::VaneFault).vane, FAULT);
    }

    #[test]
    fn test_unrecognised_condition_never_reaches_derivation() {
        // Unknown strings fail at parse time instead of yielding all-zero severities
        assert!("gear_warning".parse::<ConditionLabel>().is_err());
    }

    fn any_label() -> impl Strategy<Value = ConditionLabel> {
        proptest::sample::select(ConditionLabel::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_label_invariants(label in any_label()) {
            let labels = FaultLabels::from(label);
            prop_assert_eq!(labels.normal + labels.anomaly, 1);
            prop_assert!(labels.severities().iter().filter(|&&s| s != ABSENT).count() <= 1);
            prop_assert!(labels.severities().iter().all(|&s| s <= FAULT));
            if labels.real_normal == 1 {
                prop_assert_eq!(labels.normal, 1);
            }
            prop_assert_eq!(labels.anomaly == 1, label.is_fault());
        }
    }
}
