//! Golden tests for field normalization and interpretation.
//!
//! These verify the alias table and threshold tables against known cases.

use neuroreport_core::models::keys;
use neuroreport_core::normalizer::FieldNormalizer;
use neuroreport_core::{interpret, CanonicalFieldBag, RawFieldBag, Scale};

/// One alias-resolution case.
struct GoldenCase {
    id: &'static str,
    input_key: &'static str,
    input_value: &'static str,
    expected_key: &'static str,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "pursuits-spaced",
            input_key: "Pursuits Score",
            input_value: "18",
            expected_key: keys::PURSUITS_SCORE,
        },
        GoldenCase {
            id: "pursuits-bare",
            input_key: "pursuits",
            input_value: "18",
            expected_key: keys::PURSUITS_SCORE,
        },
        GoldenCase {
            id: "saccades-caps",
            input_key: "SACCADES SCORE",
            input_value: "60",
            expected_key: keys::SACCADES_SCORE,
        },
        GoldenCase {
            id: "eyeq-to-dysfunction",
            input_key: "EyeQ score",
            input_value: "48",
            expected_key: keys::DYSFUNCTIONAL_SCALE,
        },
        GoldenCase {
            id: "standard-percentile-long",
            input_key: "Standard Score Percentile",
            input_value: "45%",
            expected_key: keys::STANDARD_SCORE_PERCENTILE,
        },
        GoldenCase {
            id: "std-abbreviated-percentile",
            input_key: "STD percentile",
            input_value: "45",
            expected_key: keys::STANDARD_SCORE_PERCENTILE,
        },
        GoldenCase {
            id: "baseline-vestibular",
            input_key: "Baseline Vestibular Percentile",
            input_value: "22",
            expected_key: keys::VESTIBULAR_SCORE_PERCENTILE,
        },
        GoldenCase {
            id: "positional-percentile",
            input_key: "percentile2",
            input_value: "30",
            expected_key: keys::PROPRIOCEPTION_SCORE_PERCENTILE,
        },
        GoldenCase {
            id: "ves-path-length",
            input_key: "VES %",
            input_value: "31.2",
            expected_key: keys::VESTIBULAR_PATH_LENGTH,
        },
        GoldenCase {
            id: "rpq-punctuated",
            input_key: "R.P.Q.",
            input_value: "27/64",
            expected_key: keys::RPQ_SCORE,
        },
        GoldenCase {
            id: "pcl5-dashed",
            input_key: "PCL-5 Score",
            input_value: "33",
            expected_key: keys::PCL_5_SCORE,
        },
        GoldenCase {
            id: "phq9",
            input_key: "PHQ-9",
            input_value: "12",
            expected_key: keys::PHQ_9_SCORE,
        },
        GoldenCase {
            id: "gad7-underscored",
            input_key: "gad_7_score",
            input_value: "8",
            expected_key: keys::GAD_7_SCORE,
        },
        GoldenCase {
            id: "working-memory-task",
            input_key: "Working Memory Percentile",
            input_value: "15",
            expected_key: keys::WORKING_MEMORY_PERCENTILE,
        },
        GoldenCase {
            id: "spatial-stm-task",
            input_key: "Spatial Short-Term Memory",
            input_value: "40",
            expected_key: keys::SPATIAL_STM_PERCENTILE,
        },
        GoldenCase {
            id: "response-inhibition",
            input_key: "response inhibition percentile",
            input_value: "55",
            expected_key: keys::RESPONSE_INHIBITION_PERCENTILE,
        },
        GoldenCase {
            id: "patient-name",
            input_key: "Patient Name",
            input_value: "Jordan Doe",
            expected_key: keys::PATIENT_NAME,
        },
        GoldenCase {
            id: "date-of-birth",
            input_key: "Date of Birth",
            input_value: "03/15/1990",
            expected_key: keys::DOB,
        },
        GoldenCase {
            id: "assessment-date-to-dos",
            input_key: "Assessment Date",
            input_value: "01/10/2026",
            expected_key: keys::DOS,
        },
        GoldenCase {
            id: "gender-to-sex",
            input_key: "Gender",
            input_value: "F",
            expected_key: keys::SEX,
        },
    ]
}

#[test]
fn test_golden_alias_cases() {
    let normalizer = FieldNormalizer::new();

    for case in get_golden_cases() {
        let mut incoming = RawFieldBag::new();
        incoming.insert(case.input_key.to_string(), case.input_value.to_string());

        let mut target = CanonicalFieldBag::new();
        normalizer.merge(&mut target, &incoming);

        assert_eq!(
            target.get(case.expected_key),
            Some(case.input_value),
            "Case {}: {} should land under {}",
            case.id,
            case.input_key,
            case.expected_key
        );
        // Raw spelling retained for traceability
        assert_eq!(
            target.get(case.input_key),
            Some(case.input_value),
            "Case {}: raw key not retained",
            case.id
        );
    }
}

#[test]
fn test_unknown_keys_retained_but_not_canonicalized() {
    let normalizer = FieldNormalizer::new();
    let mut incoming = RawFieldBag::new();
    incoming.insert("Some Novel Field".to_string(), "77".to_string());

    let mut target = CanonicalFieldBag::new();
    normalizer.merge(&mut target, &incoming);

    assert_eq!(target.get("Some Novel Field"), Some("77"));
    assert_eq!(target.len(), 1);
}

#[test]
fn test_interpretation_labels() {
    let label_cases = vec![
        (18, Scale::Dysfunction, "Severe dysfunction"),
        (40, Scale::Dysfunction, "Moderate dysfunction"),
        (60, Scale::Dysfunction, "Mild dysfunction"),
        (80, Scale::Dysfunction, "Normal"),
        (10, Scale::Posturography, "Abnormal"),
        (45, Scale::Posturography, "Below Average"),
        (90, Scale::Posturography, "Normal"),
        (10, Scale::Rpq, "Not indicative of Post-Concussion Syndrome"),
        (27, Scale::Rpq, "Indicative of Post-Concussion Syndrome"),
        (
            40,
            Scale::Rpq,
            "PCS; predictive of moderate-severe functional limitations",
        ),
        (20, Scale::Pcl5, "Sub-threshold; does not meet criteria for PTSD"),
        (32, Scale::Pcl5, "Probable PTSD"),
        (50, Scale::Pcl5, "Significant likelihood of PTSD"),
        (3, Scale::Psqi, "Good sleep quality"),
        (9, Scale::Psqi, "Poor sleep quality"),
        (2, Scale::Phq9, "Minimal depression"),
        (7, Scale::Phq9, "Mild depression"),
        (12, Scale::Phq9, "Moderate depression"),
        (17, Scale::Phq9, "Moderately severe depression"),
        (23, Scale::Phq9, "Severe depression"),
        (3, Scale::Gad7, "Minimal anxiety"),
        (8, Scale::Gad7, "Mild anxiety"),
        (12, Scale::Gad7, "Moderate anxiety"),
        (18, Scale::Gad7, "Severe anxiety"),
        (5, Scale::CognitiveTask, "Below average"),
        (50, Scale::CognitiveTask, "Within typical range"),
    ];

    for (score, scale, expected) in label_cases {
        assert_eq!(
            interpret(score, scale),
            expected,
            "score {score} on {scale:?}"
        );
    }
}

#[test]
fn test_unknown_scale_name_has_no_interpretation() {
    assert_eq!(Scale::from_name("frisbee-throwing"), None);
}
