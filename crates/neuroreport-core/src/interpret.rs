//! Threshold-based clinical interpretation.
//!
//! Pure lookup from a numeric score plus a scale identifier to a categorical
//! severity label. No state, no I/O; a score that failed to parse must not be
//! passed in — callers substitute [`NOT_APPLICABLE`] instead.

use serde::{Deserialize, Serialize};

/// Marker used in place of a label when the underlying score is absent.
pub const NOT_APPLICABLE: &str = "N/A";

/// Maximum RPQ score; a parsed value above this signals a concatenated
/// numerator/denominator OCR artifact.
pub const RPQ_MAX_SCORE: i64 = 64;

/// Known clinical scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    /// Oculomotor dysfunction (pursuits/saccades/fixations/composite).
    Dysfunction,
    /// Posturography condition percentile.
    Posturography,
    /// Rivermead Post-Concussion Symptoms Questionnaire.
    Rpq,
    /// PTSD Checklist for DSM-5.
    Pcl5,
    /// Pittsburgh Sleep Quality Index.
    Psqi,
    /// Patient Health Questionnaire (depression).
    Phq9,
    /// Generalized Anxiety Disorder scale.
    Gad7,
    /// Individual cognitive-task percentile.
    CognitiveTask,
}

impl Scale {
    /// Look up a scale by name. Unknown names yield `None`; callers render
    /// an empty label for those rather than failing.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dysfunction" => Some(Self::Dysfunction),
            "posturography" | "percentile" => Some(Self::Posturography),
            "rpq" => Some(Self::Rpq),
            "pcl" | "pcl-5" | "pcl5" => Some(Self::Pcl5),
            "psqi" => Some(Self::Psqi),
            "phq" | "phq-9" | "phq9" => Some(Self::Phq9),
            "gad" | "gad-7" | "gad7" => Some(Self::Gad7),
            "cognitive" | "task" => Some(Self::CognitiveTask),
            _ => None,
        }
    }
}

/// Interpret a score on the given scale.
pub fn interpret(score: i64, scale: Scale) -> &'static str {
    match scale {
        Scale::Dysfunction => {
            if score <= 24 {
                "Severe dysfunction"
            } else if score < 50 {
                "Moderate dysfunction"
            } else if score < 75 {
                "Mild dysfunction"
            } else {
                "Normal"
            }
        }
        Scale::Posturography => {
            if score < 25 {
                "Abnormal"
            } else if score < 75 {
                "Below Average"
            } else {
                "Normal"
            }
        }
        Scale::Rpq => {
            if score < 16 {
                "Not indicative of Post-Concussion Syndrome"
            } else if score <= 35 {
                "Indicative of Post-Concussion Syndrome"
            } else {
                "PCS; predictive of moderate-severe functional limitations"
            }
        }
        Scale::Pcl5 => {
            if score < 31 {
                "Sub-threshold; does not meet criteria for PTSD"
            } else if score <= 33 {
                "Probable PTSD"
            } else {
                "Significant likelihood of PTSD"
            }
        }
        Scale::Psqi => {
            if score <= 5 {
                "Good sleep quality"
            } else {
                "Poor sleep quality"
            }
        }
        Scale::Phq9 => {
            if score <= 4 {
                "Minimal depression"
            } else if score <= 9 {
                "Mild depression"
            } else if score <= 14 {
                "Moderate depression"
            } else if score <= 19 {
                "Moderately severe depression"
            } else {
                "Severe depression"
            }
        }
        Scale::Gad7 => {
            if score <= 4 {
                "Minimal anxiety"
            } else if score <= 9 {
                "Mild anxiety"
            } else if score <= 14 {
                "Moderate anxiety"
            } else {
                "Severe anxiety"
            }
        }
        Scale::CognitiveTask => {
            if score < 20 {
                "Below average"
            } else {
                "Within typical range"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dysfunction_boundaries() {
        assert_eq!(interpret(24, Scale::Dysfunction), "Severe dysfunction");
        assert_eq!(interpret(25, Scale::Dysfunction), "Moderate dysfunction");
        assert_eq!(interpret(49, Scale::Dysfunction), "Moderate dysfunction");
        assert_eq!(interpret(50, Scale::Dysfunction), "Mild dysfunction");
        assert_eq!(interpret(74, Scale::Dysfunction), "Mild dysfunction");
        assert_eq!(interpret(75, Scale::Dysfunction), "Normal");
    }

    #[test]
    fn test_posturography_boundaries() {
        assert_eq!(interpret(24, Scale::Posturography), "Abnormal");
        assert_eq!(interpret(25, Scale::Posturography), "Below Average");
        assert_eq!(interpret(74, Scale::Posturography), "Below Average");
        assert_eq!(interpret(75, Scale::Posturography), "Normal");
    }

    #[test]
    fn test_rpq_boundaries() {
        assert_eq!(
            interpret(15, Scale::Rpq),
            "Not indicative of Post-Concussion Syndrome"
        );
        assert_eq!(interpret(16, Scale::Rpq), "Indicative of Post-Concussion Syndrome");
        assert_eq!(interpret(35, Scale::Rpq), "Indicative of Post-Concussion Syndrome");
        assert_eq!(
            interpret(36, Scale::Rpq),
            "PCS; predictive of moderate-severe functional limitations"
        );
    }

    #[test]
    fn test_pcl5_boundaries() {
        assert_eq!(
            interpret(30, Scale::Pcl5),
            "Sub-threshold; does not meet criteria for PTSD"
        );
        assert_eq!(interpret(31, Scale::Pcl5), "Probable PTSD");
        assert_eq!(interpret(33, Scale::Pcl5), "Probable PTSD");
        assert_eq!(interpret(34, Scale::Pcl5), "Significant likelihood of PTSD");
    }

    #[test]
    fn test_psqi_boundaries() {
        assert_eq!(interpret(5, Scale::Psqi), "Good sleep quality");
        assert_eq!(interpret(6, Scale::Psqi), "Poor sleep quality");
    }

    #[test]
    fn test_phq9_boundaries() {
        assert_eq!(interpret(4, Scale::Phq9), "Minimal depression");
        assert_eq!(interpret(9, Scale::Phq9), "Mild depression");
        assert_eq!(interpret(14, Scale::Phq9), "Moderate depression");
        assert_eq!(interpret(19, Scale::Phq9), "Moderately severe depression");
        assert_eq!(interpret(20, Scale::Phq9), "Severe depression");
    }

    #[test]
    fn test_gad7_boundaries() {
        assert_eq!(interpret(4, Scale::Gad7), "Minimal anxiety");
        assert_eq!(interpret(9, Scale::Gad7), "Mild anxiety");
        assert_eq!(interpret(14, Scale::Gad7), "Moderate anxiety");
        assert_eq!(interpret(15, Scale::Gad7), "Severe anxiety");
    }

    #[test]
    fn test_cognitive_task_boundary() {
        assert_eq!(interpret(19, Scale::CognitiveTask), "Below average");
        assert_eq!(interpret(20, Scale::CognitiveTask), "Within typical range");
    }

    #[test]
    fn test_scale_from_name() {
        assert_eq!(Scale::from_name("rpq"), Some(Scale::Rpq));
        assert_eq!(Scale::from_name("PCL-5"), Some(Scale::Pcl5));
        assert_eq!(Scale::from_name("phq9"), Some(Scale::Phq9));
        assert_eq!(Scale::from_name("made-up-scale"), None);
    }
}
