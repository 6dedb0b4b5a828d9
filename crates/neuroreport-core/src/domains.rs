//! Cognitive-domain impairment aggregation.
//!
//! Groups related cognitive-task percentiles into five clinical domains and
//! decides domain-level impairment. A domain with too little actual data is
//! reported as not impaired rather than unknown.

use crate::models::{keys, CanonicalFieldBag, ClinicalDomain};
use crate::parse::parse_percentile;

/// Percentile below which a task counts toward impairment.
pub const IMPAIRMENT_THRESHOLD: i64 = 20;

/// Minimum number of tasks with actual data before a multi-task domain can
/// be called impaired.
pub const MIN_TASKS_WITH_DATA: usize = 2;

/// Fixed domain table: name → constituent task keys, in report order.
fn domain_table() -> [(&'static str, &'static [&'static str]); 5] {
    [
        (
            "memory",
            &[
                keys::VISUOSPATIAL_WM_PERCENTILE,
                keys::WORKING_MEMORY_PERCENTILE,
                keys::SPATIAL_STM_PERCENTILE,
                keys::VERBAL_STM_PERCENTILE,
                keys::EPISODIC_MEMORY_PERCENTILE,
            ][..],
        ),
        (
            "visuospatial",
            &[keys::POLYGONS_PERCENTILE, keys::MENTAL_ROTATION_PERCENTILE][..],
        ),
        (
            "reasoning",
            &[
                keys::DEDUCTIVE_REASONING_PERCENTILE,
                keys::VERBAL_REASONING_PERCENTILE,
            ][..],
        ),
        ("attention", &[keys::ATTENTION_PERCENTILE][..]),
        (
            "executive",
            &[
                keys::PLANNING_PERCENTILE,
                keys::RESPONSE_INHIBITION_PERCENTILE,
            ][..],
        ),
    ]
}

/// Aggregate all five domains from the canonical field set, in fixed order.
pub fn aggregate(fields: &CanonicalFieldBag) -> Vec<ClinicalDomain> {
    domain_table()
        .iter()
        .map(|(name, task_keys)| aggregate_domain(name, task_keys, fields))
        .collect()
}

fn aggregate_domain(
    name: &str,
    task_keys: &[&str],
    fields: &CanonicalFieldBag,
) -> ClinicalDomain {
    let task_percentiles: Vec<Option<i64>> = task_keys
        .iter()
        .map(|key| fields.get(key).map(|v| parse_percentile(Some(v))))
        .collect();

    // Actual data = present and non-zero; a zero percentile is extraction
    // fallout, not a real score.
    let actual: Vec<i64> = task_percentiles.iter().flatten().copied().filter(|v| *v > 0).collect();

    let impaired = if task_keys.len() == 1 {
        // Single-task domain: impaired on its one value alone.
        actual
            .first()
            .is_some_and(|v| *v < IMPAIRMENT_THRESHOLD)
    } else if actual.len() < MIN_TASKS_WITH_DATA {
        // Insufficient data reads as not impaired, never as unknown.
        false
    } else {
        actual
            .iter()
            .filter(|v| **v < IMPAIRMENT_THRESHOLD)
            .count()
            >= MIN_TASKS_WITH_DATA
    };

    ClinicalDomain {
        name: name.to_string(),
        task_percentiles,
        actual_count: actual.len(),
        impaired,
    }
}
