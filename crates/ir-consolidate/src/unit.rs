//! Unit column discovery and unit value normalisation.

use ir_common::InstallationRecord;
use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing duplicate markers: `"101 (2)"`, `"101 (2) (3)"`.
static DUPLICATE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?\S)(?:\s*\(\d+\))+$").expect("valid regex"));

/// Strip whitespace and trailing ` (N)` duplicate markers.
pub fn normalize_unit(value: &str) -> String {
    let trimmed = value.trim();
    match DUPLICATE_SUFFIX.captures(trimmed) {
        Some(caps) => caps[1].to_string(),
        None => trimmed.to_string(),
    }
}

/// First key of `record` matching one of `candidates` (case-insensitive).
pub fn find_unit_column<'r>(
    record: &'r InstallationRecord,
    candidates: &[String],
) -> Option<&'r str> {
    record.keys().find(|key| {
        let key = key.trim();
        candidates.iter().any(|c| c.trim().eq_ignore_ascii_case(key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_duplicate_marker() {
        assert_eq!(normalize_unit("101 (2)"), "101");
        assert_eq!(normalize_unit("  A-4(3) "), "A-4");
        assert_eq!(normalize_unit("Bldg 2 Unit 7 (12)"), "Bldg 2 Unit 7");
        assert_eq!(normalize_unit("101 (2) (3)"), "101");
    }

    #[test]
    fn test_normalize_leaves_plain_values() {
        assert_eq!(normalize_unit("101"), "101");
        assert_eq!(normalize_unit("(2)"), "(2)");
        assert_eq!(normalize_unit("Suite (A)"), "Suite (A)");
        assert_eq!(normalize_unit(""), "");
    }

    #[test]
    fn test_find_unit_column_case_insensitive() {
        let record = InstallationRecord::new()
            .with("Building", "A")
            .with(" unit # ", "101");
        let candidates = vec!["Unit #".to_string()];
        assert_eq!(find_unit_column(&record, &candidates), Some(" unit # "));
    }

    #[test]
    fn test_find_unit_column_none() {
        let record = InstallationRecord::new().with("Building", "A");
        assert_eq!(find_unit_column(&record, &["Unit".to_string()]), None);
    }
}
