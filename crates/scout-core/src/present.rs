//! Derived display values for result cards.

use serde::Serialize;

/// Interest tags shown before collapsing into "+N more".
pub const VISIBLE_TAGS: usize = 4;

/// Number of avatar palettes.
pub const AVATAR_PALETTES: usize = 6;

/// Coarse score bucket used for badge colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn of(score: u8) -> Self {
        match score {
            80.. => Self::High,
            60..=79 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Up to two uppercase initials: first and last word. `?` for a blank name.
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let first_char = |w: &str| w.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();

    match words.as_slice() {
        [] => "?".to_string(),
        [only] => first_char(*only),
        [first, .., last] => format!("{}{}", first_char(*first), first_char(*last)),
    }
}

/// Stable palette index for a name.
///
/// Only the shift truncates to 32 bits; the running sum stays exact.
pub fn avatar_index(name: &str) -> usize {
    let hash = name.encode_utf16().fold(0i64, |hash, unit| {
        let shifted = (hash as i32).wrapping_shl(5);
        i64::from(unit) + (i64::from(shifted) - hash)
    });
    (hash.unsigned_abs() % AVATAR_PALETTES as u64) as usize
}

/// CSS modifier for a confidence label.
pub fn confidence_class(level: &str) -> &'static str {
    match level {
        "High" => "high",
        "Medium" => "medium",
        _ => "other",
    }
}

/// The tags to render and how many were left out.
pub fn visible_tags(tags: &[String]) -> (&[String], usize) {
    let shown = tags.len().min(VISIBLE_TAGS);
    (&tags[..shown], tags.len() - shown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_band() {
        assert_eq!(ScoreBand::of(100), ScoreBand::High);
        assert_eq!(ScoreBand::of(80), ScoreBand::High);
        assert_eq!(ScoreBand::of(79), ScoreBand::Medium);
        assert_eq!(ScoreBand::of(60), ScoreBand::Medium);
        assert_eq!(ScoreBand::of(59), ScoreBand::Low);
        assert_eq!(ScoreBand::of(0), ScoreBand::Low);
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Dr. Sarah Chen"), "DC");
        assert_eq!(initials("ada"), "A");
        assert_eq!(initials("  "), "?");
        assert_eq!(initials(""), "?");
        assert_eq!(initials("James  Park"), "JP");
    }

    #[test]
    fn test_avatar_index_is_stable() {
        assert_eq!(avatar_index("James Park"), avatar_index("James Park"));
        assert!(avatar_index("Prof. Maria Gonzalez") < AVATAR_PALETTES);
        assert_eq!(avatar_index(""), 0);
    }

    #[test]
    fn test_avatar_index_sum_does_not_wrap() {
        assert_eq!(avatar_index("Ada"), 4);
        assert_eq!(avatar_index("Dr. Alex Rivera"), 3);
        // Sums past i32 range
        assert_eq!(avatar_index("Prof. Maria Gonzalez"), 3);
        assert_eq!(avatar_index("James Park"), 4);
        assert_eq!(avatar_index("Dr. Priya Sharma"), 1);
    }

    #[test]
    fn test_visible_tags() {
        let tags: Vec<String> = ["a", "b", "c", "d", "e", "f"].iter().map(|s| s.to_string()).collect();
        let (shown, hidden) = visible_tags(&tags);
        assert_eq!(shown.len(), 4);
        assert_eq!(hidden, 2);

        let (shown, hidden) = visible_tags(&tags[..2]);
        assert_eq!(shown.len(), 2);
        assert_eq!(hidden, 0);
    }
}
