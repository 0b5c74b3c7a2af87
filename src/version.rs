//! Ordering of release tags by their inferred semantic-version parts.
//!
//! Tags are never stored in parsed form; [`VersionKey`] only exists for the
//! duration of a comparison.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^0-9]*").expect("valid prefix regex"));
static LAST_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.]+$").expect("valid segment regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionKey {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Trailing non-numeric text of the last segment, e.g. `rc1` for `1.2.3-rc1`.
    pub suffix: Option<String>,
}

impl VersionKey {
    pub fn parse(tag: &str) -> Self {
        let rest = PREFIX.replace(tag, "");
        let mut parts = rest.split('.').map(leading_number);

        let major = parts.next().unwrap_or(0);
        let minor = parts.next().unwrap_or(0);
        let patch = parts.next().unwrap_or(0);

        let suffix = LAST_SEGMENT
            .find(&rest)
            .map(|m| {
                m.as_str()
                    .trim_start_matches(|c: char| c.is_ascii_digit())
                    .trim_start_matches(['-', '_', '+'])
                    .to_string()
            })
            .filter(|s| !s.is_empty());

        Self {
            major,
            minor,
            patch,
            suffix,
        }
    }

    /// Newest-first ordering: `Less` means `self` should be listed before `other`.
    pub fn newest_first(&self, other: &Self) -> Ordering {
        other
            .major
            .cmp(&self.major)
            .then(other.minor.cmp(&self.minor))
            .then(other.patch.cmp(&self.patch))
            .then_with(|| match (&self.suffix, &other.suffix) {
                (None, None) => Ordering::Equal,
                // a plain release outranks its pre-releases
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(a), Some(b)) => b.cmp(a),
            })
    }
}

fn leading_number(part: &str) -> u64 {
    let digits = part
        .find(|c: char| !c.is_ascii_digit())
        .map_or(part, |end| &part[..end]);
    if digits.is_empty() {
        0
    } else {
        digits.parse().unwrap_or(u64::MAX)
    }
}

/// Compares two tag names for a newest-first listing.
pub fn compare_tags(a: &str, b: &str) -> Ordering {
    VersionKey::parse(a).newest_first(&VersionKey::parse(b))
}

/// Sorts tag names newest first. The sort is stable, so tags that compare
/// equal keep their incoming order.
pub fn sort_tags<S: AsRef<str>>(tags: &mut [S]) {
    tags.sort_by(|a, b| compare_tags(a.as_ref(), b.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_prefix_parts_and_suffix() {
        assert_eq!(
            VersionKey::parse("v1.2.3-rc1"),
            VersionKey {
                major: 1,
                minor: 2,
                patch: 3,
                suffix: Some("rc1".to_string()),
            }
        );
        assert_eq!(
            VersionKey::parse("release-3"),
            VersionKey {
                major: 3,
                minor: 0,
                patch: 0,
                suffix: None,
            }
        );
    }

    #[test]
    fn only_ascii_digits_end_the_prefix() {
        let key = VersionKey::parse("v\u{0663}.1.2");
        assert_eq!((key.major, key.minor, key.patch), (1, 2, 0));
        assert_eq!(key.suffix, None);
    }

    #[test]
    fn non_numeric_tags_collapse_to_zero() {
        let key = VersionKey::parse("nightly");
        assert_eq!((key.major, key.minor, key.patch), (0, 0, 0));
        assert_eq!(key.suffix, None);

        let key = VersionKey::parse("v1.x.3");
        assert_eq!((key.major, key.minor, key.patch), (1, 0, 3));
    }

    #[test]
    fn higher_major_sorts_first() {
        assert_eq!(compare_tags("v2.0.0", "v1.9.9"), Ordering::Less);
        assert_eq!(compare_tags("v1.9.9", "v2.0.0"), Ordering::Greater);
    }

    #[test]
    fn missing_components_default_to_zero() {
        assert_eq!(compare_tags("1.2", "1.2.0"), Ordering::Equal);
    }

    #[test]
    fn numeric_not_lexicographic() {
        assert_eq!(compare_tags("release-3", "release-10"), Ordering::Greater);
        assert_eq!(compare_tags("0.10.0", "0.9.0"), Ordering::Less);
    }

    #[test]
    fn numeric_parts_win_over_suffix() {
        assert_eq!(compare_tags("v1.2.4-alpha", "v1.2.3"), Ordering::Less);
        assert_eq!(compare_tags("v1.2.3-zzz", "v1.3.0-aaa"), Ordering::Greater);
    }

    #[test]
    fn suffix_tie_break_is_three_way() {
        assert_eq!(compare_tags("1.0.0", "1.0.0-rc1"), Ordering::Less);
        assert_eq!(compare_tags("1.0.0-rc1", "1.0.0"), Ordering::Greater);
        assert_eq!(compare_tags("1.0.0-rc2", "1.0.0-rc1"), Ordering::Less);
        assert_eq!(compare_tags("1.0.0-rc1", "1.0.0-rc2"), Ordering::Greater);
        assert_eq!(compare_tags("1.0.0-rc1", "v1.0.0-rc1"), Ordering::Equal);
    }

    #[test]
    fn sorts_newest_first_with_non_numeric_last() {
        let mut tags = vec![
            "nightly".to_string(),
            "v0.9.0".to_string(),
            "v1.0.0-rc1".to_string(),
            "v1.0.0".to_string(),
            "v0.10.1".to_string(),
        ];
        sort_tags(&mut tags);
        assert_eq!(
            tags,
            vec!["v1.0.0", "v1.0.0-rc1", "v0.10.1", "v0.9.0", "nightly"]
        );
    }

    #[test]
    fn huge_components_do_not_panic() {
        let key = VersionKey::parse("v99999999999999999999999.1");
        assert_eq!(key.major, u64::MAX);
        assert_eq!(key.minor, 1);
    }
}
