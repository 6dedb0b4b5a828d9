//! Total parsers for free-text OCR values.
//!
//! Every function here returns a value for any input; unparseable text
//! degrades to the caller-supplied default rather than an error, since a
//! garbled number must never fail the whole report.

/// Extract the first contiguous digit run from `value`.
///
/// Returns `default` when the value is absent, empty, or contains no digits,
/// or when the digit run overflows an `i64`.
pub fn parse_int(value: Option<&str>, default: i64) -> i64 {
    let Some(text) = value else {
        return default;
    };

    first_digit_run(text)
        .and_then(|run| run.parse::<i64>().ok())
        .unwrap_or(default)
}

/// Parse a percentile value, tolerating `%` signs and ordinal suffixes
/// (`23rd`, `71st`). Clamped to `[0, 100]`; values above 100 are extraction
/// noise, not errors.
pub fn parse_percentile(value: Option<&str>) -> i64 {
    let cleaned = value.map(|v| v.replace('%', ""));
    parse_int(cleaned.as_deref(), 0).clamp(0, 100)
}

/// Parse a `<numerator> / <denominator>` score, returning the numerator.
///
/// Falls back to [`parse_int`] when the text is not in `X/Y` form.
pub fn parse_score_with_total(value: Option<&str>, default: i64) -> i64 {
    if let Some(text) = value {
        if let Some((left, right)) = text.split_once('/') {
            let numerator = left.trim();
            let denominator = right.trim();
            if is_digit_run(numerator) && is_digit_run(denominator) {
                if let Ok(n) = numerator.parse::<i64>() {
                    return n;
                }
            }
        }
    }
    parse_int(value, default)
}

/// Repair a bounded-scale score whose `numerator/denominator` was OCR'd into
/// one digit run (e.g. "27/64" read as "2764").
///
/// Scans split positions left to right: the first split whose suffix equals
/// the known denominator and whose prefix parses to at most `scale_max` wins.
/// With no such split the first two digits are taken as-is (heuristic; kept
/// exactly as downstream consumers expect). Callers invoke this only when
/// the naive parse exceeds the scale's ceiling.
pub fn repair_concatenated_denominator(raw: i64, denominator: i64, scale_max: i64) -> i64 {
    let digits = raw.to_string();
    let denominator_digits = denominator.to_string();

    for split in 1..digits.len() {
        if digits[split..] != *denominator_digits {
            continue;
        }
        if let Ok(prefix) = digits[..split].parse::<i64>() {
            if prefix <= scale_max {
                return prefix;
            }
        }
    }

    let fallback = &digits[..digits.len().min(2)];
    fallback.parse::<i64>().unwrap_or(raw)
}

fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

fn is_digit_run(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int(Some("42"), 0), 42);
        assert_eq!(parse_int(Some("score: 42 points"), 0), 42);
        assert_eq!(parse_int(Some("no digits"), 7), 7);
        assert_eq!(parse_int(Some(""), 7), 7);
        assert_eq!(parse_int(None, 7), 7);
    }

    #[test]
    fn test_parse_int_takes_first_run_only() {
        assert_eq!(parse_int(Some("12 and 34"), 0), 12);
        assert_eq!(parse_int(Some("ab12cd34"), 0), 12);
    }

    #[test]
    fn test_parse_percentile() {
        assert_eq!(parse_percentile(Some("45%")), 45);
        assert_eq!(parse_percentile(Some("102%")), 100);
        assert_eq!(parse_percentile(Some("23rd")), 23);
        assert_eq!(parse_percentile(Some("71st")), 71);
        assert_eq!(parse_percentile(Some("2nd percentile")), 2);
        assert_eq!(parse_percentile(None), 0);
        assert_eq!(parse_percentile(Some("garbage")), 0);
    }

    #[test]
    fn test_parse_score_with_total() {
        assert_eq!(parse_score_with_total(Some("27/64"), 0), 27);
        assert_eq!(parse_score_with_total(Some(" 27 / 64 "), 0), 27);
        assert_eq!(parse_score_with_total(Some("35"), 0), 35);
        assert_eq!(parse_score_with_total(Some("n/a"), 5), 5);
        assert_eq!(parse_score_with_total(None, 5), 5);
    }

    #[test]
    fn test_repair_splits_on_denominator() {
        // "27/64" OCR'd as "2764"
        assert_eq!(repair_concatenated_denominator(2764, 64, 64), 27);
        // "5/64" OCR'd as "564"
        assert_eq!(repair_concatenated_denominator(564, 64, 64), 5);
    }

    #[test]
    fn test_repair_fallback_first_two_digits() {
        // No "64" suffix split exists; falls back to the first two digits.
        assert_eq!(repair_concatenated_denominator(2799, 64, 64), 27);
        // Two-digit input: the fallback is the whole string, unchanged.
        assert_eq!(repair_concatenated_denominator(99, 64, 64), 99);
    }

    #[test]
    fn test_repair_rejects_overlarge_prefix() {
        // "9964": suffix "64" matches but prefix 99 > 64, so the split is
        // rejected and the fallback applies.
        assert_eq!(repair_concatenated_denominator(9964, 64, 64), 99);
    }

    proptest! {
        #[test]
        fn prop_parse_int_total(s in ".*") {
            // Never panics, and the default only appears for digit-free text.
            let v = parse_int(Some(&s), -1);
            if s.contains(|c: char| c.is_ascii_digit()) && v == -1 {
                // A digit run longer than i64 can also yield the default.
                prop_assert!(s.chars().filter(|c| c.is_ascii_digit()).count() >= 19);
            }
        }

        #[test]
        fn prop_percentile_in_range(s in ".*") {
            let v = parse_percentile(Some(&s));
            prop_assert!((0..=100).contains(&v));
        }

        #[test]
        fn prop_score_with_total_returns_numerator(n in 0i64..1000, d in 1i64..1000) {
            let text = format!("{n}/{d}");
            prop_assert_eq!(parse_score_with_total(Some(&text), 0), n);
        }
    }
}
