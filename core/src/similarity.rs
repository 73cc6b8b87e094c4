//! String similarity scorers used by the ranking engine.
//!
//! Both functions operate on Unicode scalar values, not bytes, and are pure.

use ahash::AHashSet;

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b` (unit costs).
///
/// Two-row dynamic programming; O(|a|·|b|) time, O(min(|a|, |b|)) space.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    // Keep the shorter string on the inner loop.
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut previous: Vec<usize> = (0..=short.len()).collect();
    let mut current = vec![0; short.len() + 1];
    for (i, lc) in long.iter().enumerate() {
        current[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let insertion = previous[j + 1] + 1;
            let deletion = current[j] + 1;
            let substitution = previous[j] + usize::from(lc != sc);
            current[j + 1] = insertion.min(deletion).min(substitution);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[short.len()]
}

fn ngrams(chars: &[char], n: usize) -> AHashSet<&[char]> {
    chars.windows(n).collect()
}

/// Jaccard similarity of the sets of contiguous length-`n` substrings.
///
/// Returns `0.0` when either string is shorter than `n` (or `n == 0`), so the
/// union is never empty when we divide.
pub fn ngram_similarity(a: &str, b: &str, n: usize) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if n == 0 || a.len() < n || b.len() < n {
        return 0.0;
    }

    let grams_a = ngrams(&a, n);
    let grams_b = ngrams(&b, n);
    let intersection = grams_a.intersection(&grams_b).count();
    let union = grams_a.len() + grams_b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings() {
        assert_eq!(edit_distance("narak", "narak"), 0);
        assert_eq!(edit_distance("", ""), 0);
    }

    #[test]
    fn single_edits() {
        assert_eq!(edit_distance("narak", "narok"), 1);
        assert_eq!(edit_distance("narak", "arak"), 1);
        assert_eq!(edit_distance("narak", "naraks"), 1);
    }

    #[test]
    fn empty_side() {
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
    }

    #[test]
    fn completely_different() {
        assert_eq!(edit_distance("abc", "xyz"), 3);
    }

    #[test]
    fn symmetric_and_triangle() {
        let words = ["kon", "khon", "kan", "narak", "rak", "sawatdee", ""];
        for a in words {
            for b in words {
                assert_eq!(edit_distance(a, b), edit_distance(b, a));
                for c in words {
                    assert!(edit_distance(a, c) <= edit_distance(a, b) + edit_distance(b, c));
                }
            }
        }
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(edit_distance("กิน", "กัน"), 1);
    }

    #[test]
    fn ngram_identical_is_one() {
        assert_eq!(ngram_similarity("narak", "narak", 2), 1.0);
        assert_eq!(ngram_similarity("narak", "narak", 3), 1.0);
    }

    #[test]
    fn ngram_short_inputs_are_zero() {
        assert_eq!(ngram_similarity("a", "abc", 2), 0.0);
        assert_eq!(ngram_similarity("abc", "ab", 3), 0.0);
        assert_eq!(ngram_similarity("", "", 2), 0.0);
        assert_eq!(ngram_similarity("abc", "abc", 0), 0.0);
    }

    #[test]
    fn ngram_partial_overlap() {
        // {na, ar, ra, ak} vs {na, ar, ro, ok}: 2 shared of 6
        let sim = ngram_similarity("narak", "narok", 2);
        assert!((sim - 2.0 / 6.0).abs() < 1e-9);
        assert_eq!(sim, ngram_similarity("narok", "narak", 2));
    }

    #[test]
    fn ngram_disjoint_is_zero() {
        assert_eq!(ngram_similarity("abc", "xyz", 2), 0.0);
    }
}
