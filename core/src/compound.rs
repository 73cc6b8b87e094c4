//! Two-way compound decomposition.
//!
//! Splits an input into a left and right segment at every interior point,
//! ranks both halves independently and glues the two best texts together.
//! Compound scores carry a fixed penalty so that a genuine single-word match
//! of comparable quality always wins.

use crate::candidate::{sort_by_score, ScoredMatch};
use crate::engine::Engine;
use crate::error::StoreError;
use crate::store::CandidateStore;
use crate::utils;
use ahash::AHashSet;

impl<S: CandidateStore> Engine<S> {
    /// Compound matches for `input`, best first, at most `top_n`.
    ///
    /// Inputs shorter than `compound_min_length` characters yield nothing.
    /// Split points run from 2 to `len - 2` inclusive; a split contributes
    /// only when both halves' best match reaches `compound_min_score`.
    pub fn decompose_compound(
        &self,
        input: &str,
        top_n: usize,
    ) -> Result<Vec<ScoredMatch>, StoreError> {
        let input = utils::normalize(input);
        let chars: Vec<char> = input.chars().collect();
        let config = self.config();
        if chars.len() < config.compound_min_length || top_n == 0 {
            return Ok(Vec::new());
        }

        let mut seen: AHashSet<String> = AHashSet::new();
        let mut results = Vec::new();
        for split in 2..chars.len().saturating_sub(1) {
            let left: String = chars[..split].iter().collect();
            let right: String = chars[split..].iter().collect();

            let Some(lm) = self.rank(&left, 1)?.into_iter().next() else {
                continue;
            };
            let Some(rm) = self.rank(&right, 1)?.into_iter().next() else {
                continue;
            };
            if lm.score < config.compound_min_score || rm.score < config.compound_min_score {
                continue;
            }

            let text = format!("{}{}", lm.text, rm.text);
            if !seen.insert(text.clone()) {
                continue;
            }
            let score = (lm.score + rm.score) / 2.0 - config.compound_penalty;
            tracing::trace!(%left, %right, %text, score, "compound split");
            results.push(ScoredMatch::compound(text, format!("{}+{}", left, right), score));
        }

        sort_by_score(&mut results);
        results.truncate(top_n);
        Ok(results)
    }
}
