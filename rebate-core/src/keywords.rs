//! Static keyword matching for merchant descriptions.
//!
//! Two ordered lists: exclusions first, then special merchants. Each entry is a
//! plain substring test, optionally case-insensitive. No tokenization.

use serde::Serialize;

use crate::error::{ConfigError, Result};

/// One substring pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "pattern", rename_all = "kebab-case")]
pub enum KeywordMatcher {
    /// Case-sensitive substring.
    Exact(String),
    /// Case-insensitive substring; the pattern is stored lowercased.
    CaseInsensitive(String),
}

impl KeywordMatcher {
    pub fn exact(pattern: impl Into<String>) -> Self {
        KeywordMatcher::Exact(pattern.into())
    }

    pub fn case_insensitive(pattern: impl AsRef<str>) -> Self {
        KeywordMatcher::CaseInsensitive(pattern.as_ref().to_lowercase())
    }

    pub fn pattern(&self) -> &str {
        match self {
            KeywordMatcher::Exact(p) | KeywordMatcher::CaseInsensitive(p) => p,
        }
    }

    /// `lowered` must be `text.to_lowercase()`; it is computed once per description.
    fn matches(&self, text: &str, lowered: &str) -> bool {
        match self {
            KeywordMatcher::Exact(p) => text.contains(p.as_str()),
            KeywordMatcher::CaseInsensitive(p) => lowered.contains(p.as_str()),
        }
    }
}

/// Outcome of matching one description against both lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordMatch {
    Excluded,
    Special,
    Unmatched,
}

/// Exclusion and special-merchant lists, validated at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordSets {
    exclude: Vec<KeywordMatcher>,
    special: Vec<KeywordMatcher>,
}

impl KeywordSets {
    pub fn new(exclude: Vec<KeywordMatcher>, special: Vec<KeywordMatcher>) -> Result<Self> {
        if exclude.iter().any(|m| m.pattern().is_empty()) {
            return Err(ConfigError::EmptyKeyword("exclude"));
        }
        if special.iter().any(|m| m.pattern().is_empty()) {
            return Err(ConfigError::EmptyKeyword("special"));
        }
        Ok(Self { exclude, special })
    }

    /// Build from plain strings, choosing the matcher mode per list.
    pub fn from_patterns<E, S>(
        exclude: E,
        exclude_case_insensitive: bool,
        special: S,
        special_case_insensitive: bool,
    ) -> Result<Self>
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let build = |p: &str, insensitive: bool| {
            if insensitive {
                KeywordMatcher::case_insensitive(p)
            } else {
                KeywordMatcher::exact(p)
            }
        };
        let exclude = exclude
            .into_iter()
            .map(|p| build(p.as_ref(), exclude_case_insensitive))
            .collect();
        let special = special
            .into_iter()
            .map(|p| build(p.as_ref(), special_case_insensitive))
            .collect();
        Self::new(exclude, special)
    }

    pub fn exclude(&self) -> &[KeywordMatcher] {
        &self.exclude
    }

    pub fn special(&self) -> &[KeywordMatcher] {
        &self.special
    }

    /// Exclusion wins over a special match.
    pub fn classify(&self, description: &str) -> KeywordMatch {
        let lowered = description.to_lowercase();
        if self.exclude.iter().any(|m| m.matches(description, &lowered)) {
            KeywordMatch::Excluded
        } else if self.special.iter().any(|m| m.matches(description, &lowered)) {
            KeywordMatch::Special
        } else {
            KeywordMatch::Unmatched
        }
    }
}
