//! IME session state.
//!
//! `InputSession` is plain data: the pending buffer, the committed output and
//! the suggestions last computed for the buffer. All transitions live in
//! `ImeEngine`; the methods here are the primitive edits it is built from.

use crate::candidate::ScoredMatch;
use crate::input_buffer::InputBuffer;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSession {
    buffer: InputBuffer,
    /// Committed native-script text of the current line
    output: String,
    /// Ranked suggestions for `buffer`; empty whenever `buffer` is
    last_suggestions: Vec<ScoredMatch>,
}

impl InputSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        self.buffer.text()
    }

    pub fn input_buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn suggestions(&self) -> &[ScoredMatch] {
        &self.last_suggestions
    }

    pub fn is_idle(&self) -> bool {
        self.buffer.is_empty() && self.output.is_empty()
    }

    /// Replace the buffer together with its freshly computed suggestions.
    pub(crate) fn set_buffer(&mut self, buffer: InputBuffer, suggestions: Vec<ScoredMatch>) {
        self.buffer = buffer;
        self.last_suggestions = suggestions;
    }

    /// Append the `index`th suggestion to the output and clear the buffer.
    /// Returns the accepted text, or `None` if there is no such suggestion.
    pub(crate) fn accept(&mut self, index: usize) -> Option<String> {
        let text = self.last_suggestions.get(index)?.text.clone();
        self.output.push_str(&text);
        self.buffer.clear();
        self.last_suggestions.clear();
        Some(text)
    }

    /// Remove the last output character. Returns it, if any.
    pub(crate) fn delete_output_char(&mut self) -> Option<char> {
        self.output.pop()
    }

    /// Take the committed line, resetting the session.
    pub(crate) fn take_line(&mut self) -> String {
        self.buffer.clear();
        self.last_suggestions.clear();
        std::mem::take(&mut self.output)
    }
}
