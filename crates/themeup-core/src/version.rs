//! Dotted-numeric version comparison.
//!
//! Versions published by the update registry look like `1.4.2`. Comparison is
//! component-wise: missing trailing components count as `0`, so `1.2` and
//! `1.2.0` are the same version.
//!
//! Parsing is lenient. A component that is not an unsigned integer (`1.x.0`,
//! `2.0-beta`) is read as `0` instead of being rejected. Registry rows are not
//! validated upstream, and a malformed row must not take the poller down.
//! An all-digit component too large for `u64` saturates to `u64::MAX`, so it
//! still sorts above every smaller number.

use std::cmp::Ordering;

/// Parse a version string into its numeric components.
///
/// Each `.`-separated component is trimmed and parsed as `u64`. Digit-only
/// components that overflow become `u64::MAX`; anything else that fails to
/// parse becomes `0`.
pub fn parse_segments(version: &str) -> Vec<u64> {
    version.trim().split('.').map(parse_segment).collect()
}

fn parse_segment(segment: &str) -> u64 {
    let segment = segment.trim();
    match segment.parse::<u64>() {
        Ok(value) => value,
        Err(_) if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) => u64::MAX,
        Err(_) => 0,
    }
}

/// Compare two version strings component-wise.
pub fn compare(a: &str, b: &str) -> Ordering {
    let left = parse_segments(a);
    let right = parse_segments(b);
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => {}
            decided => return decided,
        }
    }

    Ordering::Equal
}

/// Returns `true` if `candidate` is strictly newer than `current`.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    compare(candidate, current) == Ordering::Greater
}

/// Returns `true` if every component of `version` is a plain unsigned integer.
///
/// Used to validate versions this client writes itself (configuration,
/// CLI input). Registry data goes through the lenient path above.
pub fn is_well_formed(version: &str) -> bool {
    let trimmed = version.trim();
    !trimmed.is_empty()
        && trimmed
            .split('.')
            .all(|segment| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_minor_beats_older_patch() {
        assert!(is_newer("1.2.0", "1.1.9"));
    }

    #[test]
    fn equal_versions_are_not_newer() {
        assert!(!is_newer("1.2.0", "1.2.0"));
    }

    #[test]
    fn missing_segments_count_as_zero() {
        assert!(!is_newer("1.2", "1.2.0"));
        assert!(!is_newer("1.2.0", "1.2"));
        assert_eq!(compare("1.2", "1.2.0.0"), Ordering::Equal);
    }

    #[test]
    fn major_bump_wins() {
        assert!(is_newer("2.0.0", "1.9.9"));
        assert!(!is_newer("1.9.9", "2.0.0"));
    }

    #[test]
    fn components_compare_numerically_not_lexically() {
        assert!(is_newer("1.10.0", "1.9.0"));
    }

    #[test]
    fn non_numeric_segments_parse_as_zero() {
        assert_eq!(parse_segments("1.x.3"), vec![1, 0, 3]);
        assert_eq!(compare("1.beta", "1.0"), Ordering::Equal);
        assert!(!is_newer("garbage", "0.0.0"));
    }

    #[test]
    fn oversized_components_saturate() {
        assert_eq!(parse_segments("1.99999999999999999999"), vec![1, u64::MAX]);
        assert!(is_newer("1.99999999999999999999", "1.0"));
        assert!(is_newer("1.99999999999999999999", "1.18446744073709551614"));
    }

    #[test]
    fn whitespace_is_tolerated() {
        assert_eq!(parse_segments(" 1. 2 .3 "), vec![1, 2, 3]);
    }

    #[test]
    fn well_formed_check() {
        assert!(is_well_formed("1.0.0"));
        assert!(is_well_formed("12"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("1..0"));
        assert!(!is_well_formed("1.0-beta"));
    }
}
