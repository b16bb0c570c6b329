//! Line filter bundle
//!
//! A [`LineFilter`] is the conjunctive set of predicates applied to dataset
//! lines at read time. The server compiles it into SQL; this module owns the
//! definitions both sides agree on:
//!
//! - the two character classes and their anchored regular expressions
//! - the length bucket boundaries (`short` < 20, `medium` 20..=50, `long` > 50)
//! - the human-readable description and the download filename
//!
//! The statistics query derives its per-bucket counts from
//! [`LengthBucket::bounds`] as well, so a single-bucket filter always returns
//! exactly the number of lines the statistics report for that bucket.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TgdError};

/// Longest content (in characters) still classified as `short`
pub const SHORT_MAX_LEN: usize = 19;

/// Longest content (in characters) still classified as `medium`
pub const MEDIUM_MAX_LEN: usize = 50;

/// Length classification of a line's content, counted in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthBucket {
    /// Fewer than 20 characters
    Short,
    /// 20 to 50 characters, both inclusive
    Medium,
    /// More than 50 characters
    Long,
}

impl LengthBucket {
    pub const ALL: [LengthBucket; 3] = [LengthBucket::Short, LengthBucket::Medium, LengthBucket::Long];

    pub fn as_str(self) -> &'static str {
        match self {
            LengthBucket::Short => "short",
            LengthBucket::Medium => "medium",
            LengthBucket::Long => "long",
        }
    }

    /// Inclusive `(min, max)` character bounds; `None` means unbounded
    pub fn bounds(self) -> (Option<usize>, Option<usize>) {
        match self {
            LengthBucket::Short => (None, Some(SHORT_MAX_LEN)),
            LengthBucket::Medium => (Some(SHORT_MAX_LEN + 1), Some(MEDIUM_MAX_LEN)),
            LengthBucket::Long => (Some(MEDIUM_MAX_LEN + 1), None),
        }
    }

    /// Bucket for a content length in characters
    pub fn classify(len: usize) -> Self {
        if len <= SHORT_MAX_LEN {
            LengthBucket::Short
        } else if len <= MEDIUM_MAX_LEN {
            LengthBucket::Medium
        } else {
            LengthBucket::Long
        }
    }

    pub fn contains(self, len: usize) -> bool {
        let (min, max) = self.bounds();
        min.map_or(true, |min| len >= min) && max.map_or(true, |max| len <= max)
    }
}

impl fmt::Display for LengthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthBucket {
    type Err = TgdError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(LengthBucket::Short),
            "medium" => Ok(LengthBucket::Medium),
            "long" => Ok(LengthBucket::Long),
            other => Err(TgdError::InvalidLengthFilter(other.to_string())),
        }
    }
}

/// Allowed character set for a whole line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    /// ASCII letters, digits and the space character
    Alphanumeric,
    /// ASCII letters, digits, underscore and hyphen
    NoSpecialChars,
}

impl CharacterClass {
    pub fn allows(self, c: char) -> bool {
        match self {
            CharacterClass::Alphanumeric => c.is_ascii_alphanumeric() || c == ' ',
            CharacterClass::NoSpecialChars => c.is_ascii_alphanumeric() || c == '_' || c == '-',
        }
    }

    pub fn matches(self, content: &str) -> bool {
        content.chars().all(|c| self.allows(c))
    }

    /// Anchored POSIX regular expression accepting exactly the lines that
    /// [`CharacterClass::matches`] accepts
    pub fn pattern(self) -> &'static str {
        match self {
            CharacterClass::Alphanumeric => "^[A-Za-z0-9 ]*$",
            CharacterClass::NoSpecialChars => "^[A-Za-z0-9_-]*$",
        }
    }
}

/// Conjunctive filter bundle for dataset lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineFilter {
    pub alphanumeric_only: bool,
    pub no_special_chars: bool,
    pub length_filter: Option<LengthBucket>,
    pub random: bool,
    /// Maximum number of lines; `None` means unlimited. Always positive.
    pub limit: Option<i64>,
}

impl LineFilter {
    pub fn with_alphanumeric_only(mut self, enabled: bool) -> Self {
        self.alphanumeric_only = enabled;
        self
    }

    pub fn with_no_special_chars(mut self, enabled: bool) -> Self {
        self.no_special_chars = enabled;
        self
    }

    pub fn with_length(mut self, bucket: Option<LengthBucket>) -> Self {
        self.length_filter = bucket;
        self
    }

    pub fn with_random(mut self, enabled: bool) -> Self {
        self.random = enabled;
        self
    }

    /// Set the result cap. Zero means unlimited; negative values are rejected.
    pub fn with_limit(mut self, limit: Option<i64>) -> Result<Self> {
        self.limit = match limit {
            Some(n) if n < 0 => return Err(TgdError::InvalidLimit(n)),
            Some(0) | None => None,
            Some(n) => Some(n),
        };
        Ok(self)
    }

    /// Active character classes, in a stable order
    pub fn character_classes(&self) -> Vec<CharacterClass> {
        let mut classes = Vec::with_capacity(2);
        if self.alphanumeric_only {
            classes.push(CharacterClass::Alphanumeric);
        }
        if self.no_special_chars {
            classes.push(CharacterClass::NoSpecialChars);
        }
        classes
    }

    /// In-memory evaluation of the predicates (ordering and limit aside)
    pub fn matches(&self, content: &str) -> bool {
        self.character_classes().iter().all(|class| class.matches(content))
            && self
                .length_filter
                .map_or(true, |bucket| bucket.contains(content.chars().count()))
    }

    /// Human-readable summary, e.g. `"alphanumeric only, short length"`
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.alphanumeric_only {
            parts.push("alphanumeric only".to_string());
        }
        if self.no_special_chars {
            parts.push("no special chars".to_string());
        }
        if let Some(bucket) = self.length_filter {
            parts.push(format!("{} length", bucket));
        }
        if self.random {
            parts.push("random order".to_string());
        }

        if parts.is_empty() {
            "no filters".to_string()
        } else {
            parts.join(", ")
        }
    }

    /// Attachment filename for a download of `title` filtered by `self`
    ///
    /// `Programming Terms` with `alphanumeric_only` and `limit = 50` becomes
    /// `Programming_Terms_alphanumeric_n50.txt`.
    pub fn download_filename(&self, title: &str) -> String {
        let mut parts = vec![sanitize_title(title)];
        if self.alphanumeric_only {
            parts.push("alphanumeric".to_string());
        }
        if self.no_special_chars {
            parts.push("clean".to_string());
        }
        if let Some(bucket) = self.length_filter {
            parts.push(bucket.to_string());
        }
        if self.random {
            parts.push("random".to_string());
        }
        if let Some(limit) = self.limit {
            parts.push(format!("n{}", limit));
        }
        format!("{}.txt", parts.join("_"))
    }
}

/// Spaces become underscores; quotes, slashes and control characters are
/// replaced so the name is safe inside a `Content-Disposition` header.
fn sanitize_title(title: &str) -> String {
    let sanitized: String = title
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '"' | '\\' | '/' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        "dataset".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_length_bucket_boundaries() {
        assert_eq!(LengthBucket::classify(0), LengthBucket::Short);
        assert_eq!(LengthBucket::classify(19), LengthBucket::Short);
        assert_eq!(LengthBucket::classify(20), LengthBucket::Medium);
        assert_eq!(LengthBucket::classify(50), LengthBucket::Medium);
        assert_eq!(LengthBucket::classify(51), LengthBucket::Long);
    }

    #[test]
    fn test_length_bucket_from_str() {
        assert_eq!("short".parse::<LengthBucket>().unwrap(), LengthBucket::Short);
        assert_eq!(" Medium ".parse::<LengthBucket>().unwrap(), LengthBucket::Medium);
        assert_eq!("LONG".parse::<LengthBucket>().unwrap(), LengthBucket::Long);
        assert_eq!(
            "tiny".parse::<LengthBucket>(),
            Err(TgdError::InvalidLengthFilter("tiny".to_string()))
        );
    }

    #[test]
    fn test_character_classes() {
        assert!(CharacterClass::Alphanumeric.matches("Hello World 42"));
        assert!(!CharacterClass::Alphanumeric.matches("Hello World!"));
        assert!(!CharacterClass::Alphanumeric.matches("variable_name_1"));
        assert!(!CharacterClass::Alphanumeric.matches("café"));

        assert!(CharacterClass::NoSpecialChars.matches("variable_name_1"));
        assert!(CharacterClass::NoSpecialChars.matches("kebab-case"));
        assert!(!CharacterClass::NoSpecialChars.matches("two words"));
    }

    #[test]
    fn test_programming_terms_fixture() {
        let filter = LineFilter::default().with_alphanumeric_only(true);
        let lines = ["npm", "Hello World!", "variable_name_1"];
        let kept: Vec<_> = lines.iter().filter(|l| filter.matches(l)).collect();
        assert_eq!(kept, vec![&"npm"]);
    }

    #[test]
    fn test_filters_compose_conjunctively() {
        let filter = LineFilter::default()
            .with_alphanumeric_only(true)
            .with_no_special_chars(true);
        // Spaces pass alphanumeric_only but not no_special_chars
        assert!(!filter.matches("two words"));
        // Underscores pass no_special_chars but not alphanumeric_only
        assert!(!filter.matches("snake_case"));
        assert!(filter.matches("plain42"));
    }

    #[test]
    fn test_with_limit() {
        let filter = LineFilter::default();
        assert_eq!(filter.clone().with_limit(Some(10)).unwrap().limit, Some(10));
        assert_eq!(filter.clone().with_limit(Some(0)).unwrap().limit, None);
        assert_eq!(filter.clone().with_limit(None).unwrap().limit, None);
        assert_eq!(filter.with_limit(Some(-3)), Err(TgdError::InvalidLimit(-3)));
    }

    #[test]
    fn test_describe() {
        assert_eq!(LineFilter::default().describe(), "no filters");

        let filter = LineFilter::default()
            .with_alphanumeric_only(true)
            .with_no_special_chars(true)
            .with_length(Some(LengthBucket::Long))
            .with_random(true);
        assert_eq!(
            filter.describe(),
            "alphanumeric only, no special chars, long length, random order"
        );
    }

    #[test]
    fn test_download_filename() {
        assert_eq!(
            LineFilter::default().download_filename("Programming Terms"),
            "Programming_Terms.txt"
        );

        let filter = LineFilter::default()
            .with_alphanumeric_only(true)
            .with_no_special_chars(true)
            .with_length(Some(LengthBucket::Medium))
            .with_random(true)
            .with_limit(Some(50))
            .unwrap();
        assert_eq!(
            filter.download_filename("Programming Terms"),
            "Programming_Terms_alphanumeric_clean_medium_random_n50.txt"
        );
    }

    #[test]
    fn test_download_filename_sanitizes_header_breakers() {
        assert_eq!(
            LineFilter::default().download_filename("a \"b\"/c\\d\r\n"),
            "a__b__c_d.txt"
        );
        assert_eq!(LineFilter::default().download_filename("   "), "dataset.txt");
    }

    proptest! {
        #[test]
        fn prop_every_length_in_exactly_one_bucket(len in 0usize..10_000) {
            let containing: Vec<_> = LengthBucket::ALL
                .iter()
                .filter(|bucket| bucket.contains(len))
                .collect();
            prop_assert_eq!(containing.len(), 1);
            prop_assert_eq!(*containing[0], LengthBucket::classify(len));
        }

        #[test]
        fn prop_more_filters_never_widen(content in "[ -~]{0,80}") {
            let base = LineFilter::default().with_alphanumeric_only(true);
            let narrower = base.clone().with_length(Some(LengthBucket::classify(3)));
            prop_assert!(!narrower.matches(&content) || base.matches(&content));
        }
    }
}
