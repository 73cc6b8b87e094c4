//! Match types produced by the ranking engine.
//!
//! - `MatchCandidate`: a raw store hit, read-only for the length of a query
//! - `ScoredMatch`: a ranked result handed back to callers
//! - `MatchType`: which retrieval path produced a match

use crate::store::{Category, CorpusEntry};
use serde::{Deserialize, Serialize};

/// A store hit under consideration for one query.
pub type MatchCandidate = CorpusEntry;

/// How a match was found. Determines its base score tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Romanization equals the input
    Exact,
    /// Phonetic code equals the input's code
    PhoneticExact,
    /// Phonetic code shares the input's code prefix only
    PhoneticPartial,
    /// Two independently matched segments joined together
    Compound,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::PhoneticExact => "phonetic_exact",
            MatchType::PhoneticPartial => "phonetic_partial",
            MatchType::Compound => "compound",
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ranked native-script suggestion.
///
/// Scores are on an open-ended scale; higher is better. Compound matches
/// carry no corpus metadata, so `frequency` is 0 and `category` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub text: String,
    /// Romanization that matched; `left+right` for compounds
    pub romanization: String,
    pub score: f64,
    pub match_type: MatchType,
    pub frequency: u64,
    pub category: Option<Category>,
}

impl ScoredMatch {
    pub fn from_candidate(candidate: &MatchCandidate, score: f64, match_type: MatchType) -> Self {
        Self {
            text: candidate.text.clone(),
            romanization: candidate.romanization.clone(),
            score,
            match_type,
            frequency: candidate.frequency,
            category: Some(candidate.category),
        }
    }

    pub fn compound<T: Into<String>, R: Into<String>>(text: T, romanization: R, score: f64) -> Self {
        Self {
            text: text.into(),
            romanization: romanization.into(),
            score,
            match_type: MatchType::Compound,
            frequency: 0,
            category: None,
        }
    }
}

/// Sort matches by descending score. Stable: equal scores keep their
/// incoming order.
pub fn sort_by_score(matches: &mut [ScoredMatch]) {
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
