// core/src/engine.rs
//
// Ranking engine: candidate retrieval through a `CandidateStore`, composite
// scoring, and the merged single-word + compound match entry point.

use crate::candidate::{sort_by_score, MatchCandidate, MatchType, ScoredMatch};
use crate::error::StoreError;
use crate::store::CandidateStore;
use crate::{phonetic, similarity, utils, Config};
use ahash::AHashSet;
use std::cell::{Cell, RefCell};
use std::num::NonZeroUsize;

/// Base score of an exact romanization match.
pub const EXACT_SCORE: f64 = 100.0;
/// Base score of a phonetic-code match before the edit-distance penalty.
pub const PHONETIC_EXACT_BASE: f64 = 90.0;
/// Base score of a code-prefix-only match before the edit-distance penalty.
pub const PHONETIC_PARTIAL_BASE: f64 = 70.0;
/// Deducted per edit between input and candidate romanization.
pub const EDIT_PENALTY: f64 = 10.0;
pub const BIGRAM_WEIGHT: f64 = 15.0;
pub const TRIGRAM_WEIGHT: f64 = 10.0;
/// Bonus when the first three characters of one string prefix the other.
pub const PREFIX_BONUS: f64 = 5.0;
pub const PREFIX_BONUS_CHARS: usize = 3;
pub const MAX_FREQUENCY_BOOST: f64 = 10.0;

/// Ranking engine over a read-only candidate store.
///
/// Results of `find_matches` are memoized per (normalized input, top_n) in an
/// LRU cache. The store is assumed not to change while an engine holds it;
/// call `clear_cache` after mutating it out of band.
pub struct Engine<S> {
    store: S,
    config: Config,
    cache: RefCell<lru::LruCache<(String, usize), Vec<ScoredMatch>>>,
    cache_hits: Cell<usize>,
    cache_misses: Cell<usize>,
}

impl<S: CandidateStore> Engine<S> {
    pub fn new(store: S, config: Config) -> Self {
        let capacity = NonZeroUsize::new(config.max_cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            store,
            config,
            cache: RefCell::new(lru::LruCache::new(capacity)),
            cache_hits: Cell::new(0),
            cache_misses: Cell::new(0),
        }
    }

    /// Engine with the default configuration.
    pub fn with_store(store: S) -> Self {
        Self::new(store, Config::default())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give the store back, dropping the cache.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Retrieve raw candidates for `input`.
    ///
    /// The union of exact-romanization, exact-code and code-prefix hits, in
    /// that tier order, each tier by descending frequency. Duplicate
    /// (romanization, text) pairs keep their first occurrence. At most
    /// `candidate_cap` candidates are returned.
    pub fn lookup(&self, input: &str) -> Result<Vec<MatchCandidate>, StoreError> {
        let input = utils::normalize(input);
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let code = phonetic::encode(&input, self.config.code_length);
        self.retrieve(&input, &code)
    }

    fn retrieve(&self, input: &str, code: &str) -> Result<Vec<MatchCandidate>, StoreError> {
        // An empty code prefix-matches every entry; the cap bounds the result
        // to the most frequent ones.
        let prefix = phonetic::code_prefix(code, self.config.prefix_length);
        let tiers = [
            self.store.lookup_by_romanization(input)?,
            self.store.lookup_by_code(code)?,
            self.store.lookup_by_code_prefix(prefix)?,
        ];

        let cap = self.config.candidate_cap;
        let mut seen: AHashSet<(String, String)> = AHashSet::new();
        let mut out = Vec::new();
        for mut tier in tiers {
            tier.sort_by(|a, b| b.frequency.cmp(&a.frequency));
            for cand in tier {
                if out.len() >= cap {
                    return Ok(out);
                }
                if seen.insert((cand.romanization.clone(), cand.text.clone())) {
                    out.push(cand);
                }
            }
        }
        Ok(out)
    }

    /// Rank single-word candidates for `input`, best first, at most `top_n`.
    pub fn rank(&self, input: &str, top_n: usize) -> Result<Vec<ScoredMatch>, StoreError> {
        let input = utils::normalize(input);
        if input.is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }
        let code = phonetic::encode(&input, self.config.code_length);
        let candidates = self.retrieve(&input, &code)?;
        let retrieved = candidates.len();

        let mut matches: Vec<ScoredMatch> = candidates
            .iter()
            .filter_map(|cand| {
                let (score, match_type) = score_candidate(&input, &code, cand);
                (score > 0.0).then(|| ScoredMatch::from_candidate(cand, score, match_type))
            })
            .collect();
        sort_by_score(&mut matches);
        matches.truncate(top_n);

        tracing::debug!(
            input = %input,
            code = %code,
            retrieved,
            returned = matches.len(),
            "ranked candidates"
        );
        Ok(matches)
    }

    /// Single-word and compound matches merged, best first, at most `top_n`.
    pub fn find_matches(&self, input: &str, top_n: usize) -> Result<Vec<ScoredMatch>, StoreError> {
        let key = (utils::normalize(input), top_n);
        if let Some(cached) = self.cache.borrow_mut().get(&key) {
            self.cache_hits.set(self.cache_hits.get() + 1);
            return Ok(cached.clone());
        }
        self.cache_misses.set(self.cache_misses.get() + 1);

        let mut matches = self.rank(&key.0, top_n)?;
        if self.config.compound_enabled {
            matches.extend(self.decompose_compound(&key.0, top_n)?);
        }
        sort_by_score(&mut matches);
        matches.truncate(top_n);

        self.cache.borrow_mut().put(key, matches.clone());
        Ok(matches)
    }

    /// Returns (hits, misses).
    pub fn cache_stats(&self) -> (usize, usize) {
        (self.cache_hits.get(), self.cache_misses.get())
    }

    /// Hit rate in percent, `None` before the first query.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let (hits, misses) = self.cache_stats();
        let total = hits + misses;
        if total == 0 {
            None
        } else {
            Some(hits as f32 / total as f32 * 100.0)
        }
    }

    pub fn cache_size(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.borrow().cap().get()
    }

    /// Drop memoized results and reset the counters.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
        self.cache_hits.set(0);
        self.cache_misses.set(0);
    }
}

/// Composite score of one candidate against a normalized input and its code.
///
/// Base tier by match kind, then n-gram, prefix and frequency boosts.
/// Callers discard results that are not strictly positive.
pub fn score_candidate(input: &str, code: &str, candidate: &MatchCandidate) -> (f64, MatchType) {
    let rom = candidate.romanization.as_str();
    let (mut score, match_type) = if rom == input {
        (EXACT_SCORE, MatchType::Exact)
    } else {
        let penalty = EDIT_PENALTY * similarity::edit_distance(input, rom) as f64;
        if candidate.phonetic_code == code {
            ((PHONETIC_EXACT_BASE - penalty).max(0.0), MatchType::PhoneticExact)
        } else {
            ((PHONETIC_PARTIAL_BASE - penalty).max(0.0), MatchType::PhoneticPartial)
        }
    };

    score += BIGRAM_WEIGHT * similarity::ngram_similarity(input, rom, 2);
    score += TRIGRAM_WEIGHT * similarity::ngram_similarity(input, rom, 3);
    if shares_leading_prefix(input, rom) {
        score += PREFIX_BONUS;
    }
    score += frequency_boost(candidate.frequency);
    (score, match_type)
}

/// Saturating log-scale frequency boost in `[0, MAX_FREQUENCY_BOOST]`.
pub fn frequency_boost(frequency: u64) -> f64 {
    ((frequency.max(1) as f64).log10() / 2.0).min(MAX_FREQUENCY_BOOST)
}

fn leading(s: &str, chars: usize) -> &str {
    match s.char_indices().nth(chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn shares_leading_prefix(a: &str, b: &str) -> bool {
    b.starts_with(leading(a, PREFIX_BONUS_CHARS)) || a.starts_with(leading(b, PREFIX_BONUS_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Category, CorpusEntry, MemoryStore};

    fn engine() -> Engine<MemoryStore> {
        let mut store = MemoryStore::new();
        store.insert_word("narak", "น่ารัก", 1000);
        store.insert_word("kon", "คน", 500);
        store.insert_word("khon", "ขน", 10);
        store.insert_word("nak", "หนัก", 100);
        Engine::with_store(store)
    }

    #[test]
    fn frequency_boost_saturates() {
        assert_eq!(frequency_boost(0), 0.0);
        assert_eq!(frequency_boost(1), 0.0);
        assert!((frequency_boost(100) - 1.0).abs() < 1e-9);
        assert!(frequency_boost(1000) > frequency_boost(100));
        assert!(frequency_boost(u64::MAX) <= MAX_FREQUENCY_BOOST);
    }

    #[test]
    fn prefix_bonus_rule() {
        assert!(shares_leading_prefix("narak", "nar"));
        assert!(shares_leading_prefix("na", "narak"));
        assert!(!shares_leading_prefix("narak", "nak"));
    }

    #[test]
    fn exact_match_scores_full_boosts() {
        let entry = CorpusEntry::new("น่ารัก", "narak", 1, Category::Word);
        let (score, kind) = score_candidate("narak", &entry.phonetic_code, &entry);
        assert_eq!(kind, MatchType::Exact);
        // 100 + 15 + 10 + 5
        assert!((score - 130.0).abs() < 1e-9);
    }

    #[test]
    fn phonetic_tiers() {
        let code = phonetic::encode_default("narok");
        let entry = CorpusEntry::new("น่ารัก", "narak", 1, Category::Word);
        let (_, kind) = score_candidate("narok", &code, &entry);
        // "4A5O1" vs "4A5A1": same prefix, different code
        assert_eq!(kind, MatchType::PhoneticPartial);

        let code = phonetic::encode_default("khon");
        let entry = CorpusEntry::new("คน", "kon", 1, Category::Word);
        let (score, kind) = score_candidate("khon", &code, &entry);
        assert_eq!(kind, MatchType::PhoneticExact);
        assert!(score >= PHONETIC_EXACT_BASE - EDIT_PENALTY);
    }

    #[test]
    fn rank_orders_exact_first() {
        let engine = engine();
        let ranked = engine.rank("narak", 5).unwrap();
        assert_eq!(ranked[0].text, "น่ารัก");
        assert_eq!(ranked[0].match_type, MatchType::Exact);
        assert!(ranked[0].score >= 100.0);
        assert!(ranked.iter().skip(1).all(|m| m.score < ranked[0].score));
    }

    #[test]
    fn rank_empty_and_blank_input() {
        let engine = engine();
        assert!(engine.rank("", 5).unwrap().is_empty());
        assert!(engine.rank("   ", 5).unwrap().is_empty());
        assert!(engine.rank("narak", 0).unwrap().is_empty());
    }

    #[test]
    fn rank_normalizes_case_and_spaces() {
        let engine = engine();
        let a = engine.rank("Na Rak", 3).unwrap();
        let b = engine.rank("narak", 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn uncoded_input_falls_back_to_frequent_partials() {
        let mut store = MemoryStore::new();
        store.insert_word("narak", "น่ารัก", 100);
        store.insert_word("kon", "คน", 50);
        let engine = Engine::with_store(store);

        // "x" encodes to an empty code, so every entry is a prefix hit.
        let ranked = engine.rank("x", 5).unwrap();
        let texts: Vec<_> = ranked.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["คน", "น่ารัก"]);
        assert!(ranked.iter().all(|m| m.match_type == MatchType::PhoneticPartial));
        // 70 - 10*3 + log10(50)/2
        assert!((ranked[0].score - (40.0 + frequency_boost(50))).abs() < 1e-9);
        // 70 - 10*5 + log10(100)/2
        assert!((ranked[1].score - 21.0).abs() < 1e-9);

        assert_eq!(engine.find_matches("f", 5).unwrap().len(), 2);
        assert_eq!(engine.lookup("?!").unwrap().len(), 2);
    }

    #[test]
    fn lookup_tiers_and_dedup() {
        let engine = engine();
        let hits = engine.lookup("kon").unwrap();
        // exact tier (kon), then code tier (khon); prefix tier adds nothing new
        let texts: Vec<_> = hits.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["คน", "ขน"]);
    }

    #[test]
    fn cap_keeps_tier_order_then_frequency() {
        let mut store = MemoryStore::new();
        // exact tier
        store.insert_word("kan", "กัน", 0);
        // code tier, "1A4"
        store.insert_word("gan", "ฆัน", 5000);
        store.insert_word("kaan", "คาน", 300);
        // prefix-only tier, codes longer than "1A4"
        store.insert_word("kanaa", "คนา", 500);
        store.insert_word("kanok", "กนก", 9000);
        store.insert_word("kana", "คะนะ", 50);
        let config = Config {
            candidate_cap: 5,
            ..Config::default()
        };
        let engine = Engine::new(store, config);

        let hits: Vec<_> = engine
            .lookup("kan")
            .unwrap()
            .into_iter()
            .map(|c| (c.romanization, c.frequency))
            .collect();
        assert_eq!(
            hits,
            vec![
                ("kan".to_string(), 0),
                ("gan".to_string(), 5000),
                ("kaan".to_string(), 300),
                ("kanok".to_string(), 9000),
                ("kanaa".to_string(), 500),
            ]
        );
    }

    #[test]
    fn lookup_respects_cap() {
        let mut store = MemoryStore::new();
        for i in 0..20 {
            store.insert_word(&format!("kan{}", "a".repeat(i)), &format!("ค{}", i), i as u64);
        }
        let config = Config {
            candidate_cap: 5,
            ..Config::default()
        };
        let engine = Engine::new(store, config);
        assert_eq!(engine.lookup("kan").unwrap().len(), 5);
    }

    #[test]
    fn cache_counts_hits_and_misses() {
        let engine = engine();
        let first = engine.find_matches("narak", 5).unwrap();
        let second = engine.find_matches("NaRak", 5).unwrap();
        assert_eq!(first, second);
        assert_eq!(engine.cache_stats(), (1, 1));
        assert_eq!(engine.cache_size(), 1);
        assert_eq!(engine.cache_hit_rate(), Some(50.0));

        engine.clear_cache();
        assert_eq!(engine.cache_stats(), (0, 0));
        assert_eq!(engine.cache_size(), 0);
        assert_eq!(engine.cache_hit_rate(), None);
    }
}
