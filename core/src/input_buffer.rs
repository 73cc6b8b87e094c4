//! Pending romanized input for the IME.
//!
//! The buffer only grows at the end and shrinks from the end, so there is no
//! cursor. It holds printable characters typed since the last commit.

/// Raw romanized input awaiting conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Length in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Append a printable character; returns whether it was accepted.
    /// Control (`Cc`) and format (`Cf`) characters are refused.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if !is_printable(ch) {
            return false;
        }
        self.text.push(ch);
        true
    }

    /// Remove the last character (backspace).
    pub fn delete_before(&mut self) -> Option<char> {
        self.text.pop()
    }

    /// Buffer contents with `ch` appended, leaving `self` untouched.
    pub fn with_char(&self, ch: char) -> Option<InputBuffer> {
        let mut next = self.clone();
        next.insert_char(ch).then_some(next)
    }
}

impl std::fmt::Display for InputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Unicode general category `Cf` (format characters), as of Unicode 15.
const FORMAT_RANGES: &[(char, char)] = &[
    ('\u{00AD}', '\u{00AD}'),
    ('\u{0600}', '\u{0605}'),
    ('\u{061C}', '\u{061C}'),
    ('\u{06DD}', '\u{06DD}'),
    ('\u{070F}', '\u{070F}'),
    ('\u{0890}', '\u{0891}'),
    ('\u{08E2}', '\u{08E2}'),
    ('\u{180E}', '\u{180E}'),
    ('\u{200B}', '\u{200F}'),
    ('\u{202A}', '\u{202E}'),
    ('\u{2060}', '\u{2064}'),
    ('\u{2066}', '\u{206F}'),
    ('\u{FEFF}', '\u{FEFF}'),
    ('\u{FFF9}', '\u{FFFB}'),
    ('\u{110BD}', '\u{110BD}'),
    ('\u{110CD}', '\u{110CD}'),
    ('\u{13430}', '\u{1343F}'),
    ('\u{1BCA0}', '\u{1BCA3}'),
    ('\u{1D173}', '\u{1D17A}'),
    ('\u{E0001}', '\u{E0001}'),
    ('\u{E0020}', '\u{E007F}'),
];

fn is_format(ch: char) -> bool {
    FORMAT_RANGES
        .binary_search_by(|&(lo, hi)| {
            if hi < ch {
                std::cmp::Ordering::Less
            } else if lo > ch {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

fn is_printable(ch: char) -> bool {
    !ch.is_control() && !is_format(ch)
}
