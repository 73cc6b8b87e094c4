//! Soundex-style phonetic encoder for romanized Thai.
//!
//! Romanizations of the same Thai word vary wildly ("khop khun", "kopkun",
//! "khobkhun"). The encoder folds a romanized string into a short code over a
//! fixed alphabet so those spellings land on the same, or adjacent, codes:
//!
//! - consonants are grouped by articulation into digit classes
//!   (`1` velar, `2` labial, `3` alveolar stop, `4` nasal, `5` liquid,
//!   `6` sibilant/affricate, `7` labio-velar glide, `8` palatal glide,
//!   `9` glottal);
//! - vowels fold into five quality classes `A E I O U`;
//! - digraphs are resolved before single letters;
//! - runs of the same class collapse to one symbol.
//!
//! The code is what the candidate store indexes for approximate retrieval.

/// Default maximum code length.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Multi-character clusters, applied in order before single letters.
///
/// Consonant clusters come first so a vowel rule never splits one.
const CLUSTERS: &[(&str, &str)] = &[
    ("ng", "4"),
    ("ch", "6"),
    ("kh", "1"),
    ("ph", "2"),
    ("th", "3"),
    ("ai", "I"),
    ("ay", "I"),
    ("ei", "I"),
    ("ae", "E"),
    ("ea", "E"),
    ("ee", "I"),
    ("ii", "I"),
    ("oo", "U"),
    ("ou", "U"),
    ("ue", "U"),
];

/// Map a single (already cluster-resolved) character to its class symbol.
fn class_of(ch: char) -> Option<char> {
    let class = match ch {
        'k' | 'c' | 'g' => '1',
        'p' | 'b' => '2',
        't' | 'd' => '3',
        'n' | 'm' => '4',
        'l' | 'r' => '5',
        's' | 'z' | 'j' => '6',
        'w' | 'v' => '7',
        'y' => '8',
        'h' => '9',
        'a' => 'A',
        'e' => 'E',
        'i' => 'I',
        'o' => 'O',
        'u' => 'U',
        // Symbols produced by cluster substitution pass through as-is.
        '1'..='9' | 'A' | 'E' | 'I' | 'O' | 'U' => ch,
        _ => return None,
    };
    Some(class)
}

/// Encode a romanized string into a phonetic code of at most `max_length`
/// symbols.
///
/// Whitespace is removed and the input lower-cased first. Characters outside
/// the mapped alphabet are dropped. Empty input yields an empty code.
pub fn encode(input: &str, max_length: usize) -> String {
    let mut text: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    if text.is_empty() || max_length == 0 {
        return String::new();
    }

    for (pattern, class) in CLUSTERS {
        if text.contains(pattern) {
            text = text.replace(pattern, class);
        }
    }

    // Every class symbol is ASCII, so byte length equals symbol count.
    let mut code = String::with_capacity(max_length);
    let mut last = None;
    for class in text.chars().filter_map(class_of) {
        if last == Some(class) {
            continue;
        }
        if code.len() == max_length {
            break;
        }
        code.push(class);
        last = Some(class);
    }
    code
}

/// Encode with [`DEFAULT_CODE_LENGTH`].
pub fn encode_default(input: &str) -> String {
    encode(input, DEFAULT_CODE_LENGTH)
}

/// First `len` symbols of a code, used for prefix retrieval.
pub fn code_prefix(code: &str, len: usize) -> &str {
    // Codes are ASCII; clamp to the code length.
    &code[..code.len().min(len)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(encode_default(""), "");
        assert_eq!(encode_default("   "), "");
        assert_eq!(encode_default("-?!"), "");
    }

    #[test]
    fn known_codes() {
        assert_eq!(encode_default("narak"), "4A5A1");
        assert_eq!(encode_default("narok"), "4A5O1");
        assert_eq!(encode_default("kon"), "1O4");
        assert_eq!(encode_default("khon"), "1O4");
    }

    #[test]
    fn same_class_consonants_share_leading_digit() {
        assert_eq!(encode_default("kat")[..1], encode_default("cat")[..1]);
        assert_eq!(encode_default("gai")[..1], encode_default("kai")[..1]);
        assert_eq!(encode_default("la")[..1], encode_default("ra")[..1]);
        assert_eq!(encode_default("na")[..1], encode_default("ma")[..1]);
    }

    #[test]
    fn vowel_clusters_fold() {
        assert!(encode_default("mai").contains('I'));
        assert!(encode_default("may").contains('I'));
        assert!(encode_default("dee").contains('I'));
        assert_eq!(encode_default("mai"), encode_default("may"));
    }

    #[test]
    fn repeated_letters_collapse() {
        assert_eq!(encode_default("kkkon"), encode_default("kon"));
        assert_eq!(encode_default("nnaarrak"), encode_default("narak"));
    }

    #[test]
    fn spaces_and_case_are_ignored() {
        assert_eq!(encode_default("Chiang Mai"), encode_default("chiangmai"));
    }

    #[test]
    fn respects_max_length() {
        let code = encode("abcdefghijklmnop", 4);
        assert!(code.len() <= 4);
        assert_eq!(encode("sawatdee", 0), "");
        assert!(encode_default("kraikinkaikai").len() <= DEFAULT_CODE_LENGTH);
    }

    #[test]
    fn prefix_is_clamped() {
        assert_eq!(code_prefix("4A5A1", 3), "4A5");
        assert_eq!(code_prefix("1O", 3), "1O");
        assert_eq!(code_prefix("", 3), "");
    }
}
