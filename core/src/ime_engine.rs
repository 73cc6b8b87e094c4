//! Keystroke-driven IME state machine.
//!
//! `ImeEngine` borrows a ranking `Engine` and owns one `InputSession`. Every
//! key goes through `process_key`, which either applies a complete transition
//! or, when the store fails, leaves the session exactly as it was.
//!
//! Transitions:
//! - printable char: append to the buffer, recompute suggestions
//! - backspace: drop the last buffer char, else the last output char
//! - space / selection key N: accept the first / Nth suggestion
//! - enter: accept the first suggestion if any, then emit the output line
//! - escape: end the session

use crate::candidate::ScoredMatch;
use crate::engine::Engine;
use crate::error::StoreError;
use crate::input_buffer::InputBuffer;
use crate::session::InputSession;
use crate::store::CandidateStore;
use crate::Config;

/// Key events the IME understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Printable character for the input buffer
    Char(char),
    Backspace,
    /// Accept the first suggestion
    Space,
    /// Accept suggestion N (1-based)
    Number(u8),
    /// Accept the first suggestion and finish the line
    Enter,
    /// End the session
    Escape,
}

impl KeyEvent {
    /// Translate a raw keystroke as delivered by a terminal in raw mode.
    ///
    /// Selection keys from `config` become `Number`. Control characters with
    /// no meaning to the IME map to `None`.
    pub fn from_char(ch: char, config: &Config) -> Option<KeyEvent> {
        match ch {
            '\u{7f}' | '\u{8}' => Some(KeyEvent::Backspace),
            ' ' => Some(KeyEvent::Space),
            '\r' | '\n' => Some(KeyEvent::Enter),
            '\u{1b}' | '\u{3}' => Some(KeyEvent::Escape),
            c => {
                if let Some(index) = config.selection_key_index(c) {
                    return u8::try_from(index + 1).ok().map(KeyEvent::Number);
                }
                (!c.is_control()).then_some(KeyEvent::Char(c))
            }
        }
    }
}

/// Outcome of one key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    /// The session changed
    Handled,
    /// The key had no effect in the current state
    NotHandled,
    /// A finished line was emitted; the session is empty again
    Commit(String),
    /// The session ended
    Cancel,
}

/// Blocking source of raw keystrokes. `None` means end of input.
pub trait KeystrokeSource {
    fn next_keystroke(&mut self) -> Option<char>;
}

impl<I: Iterator<Item = char>> KeystrokeSource for I {
    fn next_keystroke(&mut self) -> Option<char> {
        self.next()
    }
}

pub struct ImeEngine<'e, S> {
    engine: &'e Engine<S>,
    session: InputSession,
    cancelled: bool,
}

impl<S: CandidateStore> Engine<S> {
    /// Start an IME session over this engine.
    pub fn start_session(&self) -> ImeEngine<'_, S> {
        ImeEngine::new(self)
    }
}

impl<'e, S: CandidateStore> ImeEngine<'e, S> {
    pub fn new(engine: &'e Engine<S>) -> Self {
        Self {
            engine,
            session: InputSession::new(),
            cancelled: false,
        }
    }

    pub fn session(&self) -> &InputSession {
        &self.session
    }

    pub fn suggestions(&self) -> &[ScoredMatch] {
        self.session.suggestions()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Drop all state and start over.
    pub fn reset(&mut self) {
        self.session = InputSession::new();
        self.cancelled = false;
    }

    /// Translate and process one raw keystroke.
    ///
    /// Unknown control characters are ignored (`NotHandled`).
    pub fn feed_keystroke(&mut self, ch: char) -> Result<KeyResult, StoreError> {
        match KeyEvent::from_char(ch, self.engine.config()) {
            Some(key) => self.process_key(key),
            None => Ok(KeyResult::NotHandled),
        }
    }

    /// Process a key event.
    ///
    /// On `Err` the session is unchanged.
    pub fn process_key(&mut self, key: KeyEvent) -> Result<KeyResult, StoreError> {
        if self.cancelled {
            return Ok(KeyResult::NotHandled);
        }

        let result = match key {
            KeyEvent::Char(ch) => match self.session.input_buffer().with_char(ch) {
                Some(buffer) => {
                    self.replace_buffer(buffer)?;
                    KeyResult::Handled
                }
                None => KeyResult::NotHandled,
            },
            KeyEvent::Backspace => {
                if !self.session.input_buffer().is_empty() {
                    let mut buffer = self.session.input_buffer().clone();
                    buffer.delete_before();
                    self.replace_buffer(buffer)?;
                    KeyResult::Handled
                } else if self.session.delete_output_char().is_some() {
                    KeyResult::Handled
                } else {
                    KeyResult::NotHandled
                }
            }
            KeyEvent::Space => self.accept(0),
            KeyEvent::Number(n) => match usize::from(n).checked_sub(1) {
                Some(index) => self.accept(index),
                None => KeyResult::NotHandled,
            },
            KeyEvent::Enter => {
                let accepted = self.accept(0) == KeyResult::Handled;
                if !self.session.output().is_empty() {
                    KeyResult::Commit(self.session.take_line())
                } else if accepted {
                    KeyResult::Handled
                } else {
                    KeyResult::NotHandled
                }
            }
            KeyEvent::Escape => {
                self.cancelled = true;
                KeyResult::Cancel
            }
        };

        tracing::trace!(
            ?key,
            ?result,
            buffer = self.session.buffer(),
            output = self.session.output(),
            "ime key"
        );
        Ok(result)
    }

    fn accept(&mut self, index: usize) -> KeyResult {
        if self.session.input_buffer().is_empty() {
            return KeyResult::NotHandled;
        }
        match self.session.accept(index) {
            Some(_) => KeyResult::Handled,
            None => KeyResult::NotHandled,
        }
    }

    /// Compute suggestions for `buffer` first, then swap both in together.
    fn replace_buffer(&mut self, buffer: InputBuffer) -> Result<(), StoreError> {
        let suggestions = if buffer.is_empty() {
            Vec::new()
        } else {
            self.engine
                .find_matches(buffer.text(), self.engine.config().suggestion_count)?
        };
        self.session.set_buffer(buffer, suggestions);
        Ok(())
    }

    /// Drive the session from `source` until cancel or end of input.
    ///
    /// `on_key` sees the session after every processed key, including the
    /// final `Cancel`. End of input counts as a cancel.
    pub fn run<K, F, E>(&mut self, source: &mut K, mut on_key: F) -> Result<(), E>
    where
        K: KeystrokeSource + ?Sized,
        F: FnMut(&InputSession, &KeyResult) -> Result<(), E>,
        E: From<StoreError>,
    {
        while !self.cancelled {
            let result = match source.next_keystroke() {
                Some(ch) => self.feed_keystroke(ch)?,
                None => {
                    self.cancelled = true;
                    KeyResult::Cancel
                }
            };
            on_key(&self.session, &result)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn engine() -> Engine<MemoryStore> {
        let mut store = MemoryStore::new();
        store.insert_word("kon", "คน", 100);
        store.insert_word("khon", "ขน", 10);
        store.insert_word("narak", "น่ารัก", 100);
        Engine::with_store(store)
    }

    #[test]
    fn raw_key_mapping() {
        let config = Config::default();
        assert_eq!(KeyEvent::from_char('k', &config), Some(KeyEvent::Char('k')));
        assert_eq!(KeyEvent::from_char('3', &config), Some(KeyEvent::Number(3)));
        assert_eq!(KeyEvent::from_char('7', &config), Some(KeyEvent::Char('7')));
        assert_eq!(KeyEvent::from_char('\u{7f}', &config), Some(KeyEvent::Backspace));
        assert_eq!(KeyEvent::from_char('\r', &config), Some(KeyEvent::Enter));
        assert_eq!(KeyEvent::from_char('\u{3}', &config), Some(KeyEvent::Escape));
        assert_eq!(KeyEvent::from_char('\t', &config), None);
    }

    #[test]
    fn typing_updates_suggestions() {
        let engine = engine();
        let mut ime = engine.start_session();
        for ch in "kon".chars() {
            assert_eq!(ime.feed_keystroke(ch).unwrap(), KeyResult::Handled);
        }
        assert_eq!(ime.session().buffer(), "kon");
        assert_eq!(ime.suggestions()[0].text, "คน");
    }

    #[test]
    fn space_accepts_first() {
        let engine = engine();
        let mut ime = engine.start_session();
        for ch in "kon ".chars() {
            ime.feed_keystroke(ch).unwrap();
        }
        assert_eq!(ime.session().output(), "คน");
        assert_eq!(ime.session().buffer(), "");
        assert!(ime.suggestions().is_empty());
    }

    #[test]
    fn number_selects_nth() {
        let engine = engine();
        let mut ime = engine.start_session();
        for ch in "kon".chars() {
            ime.feed_keystroke(ch).unwrap();
        }
        let second = ime.suggestions()[1].text.clone();
        assert_eq!(ime.process_key(KeyEvent::Number(2)).unwrap(), KeyResult::Handled);
        assert_eq!(ime.session().output(), second);

        // out of range and empty buffer are no-ops
        assert_eq!(ime.process_key(KeyEvent::Number(5)).unwrap(), KeyResult::NotHandled);
        assert_eq!(ime.process_key(KeyEvent::Number(0)).unwrap(), KeyResult::NotHandled);
    }

    #[test]
    fn enter_commits_line() {
        let engine = engine();
        let mut ime = engine.start_session();
        for ch in "kon".chars() {
            ime.feed_keystroke(ch).unwrap();
        }
        assert_eq!(
            ime.feed_keystroke('\r').unwrap(),
            KeyResult::Commit("คน".to_string())
        );
        assert!(ime.session().is_idle());
        assert_eq!(ime.feed_keystroke('\r').unwrap(), KeyResult::NotHandled);
    }

    #[test]
    fn backspace_buffer_then_output() {
        let engine = engine();
        let mut ime = engine.start_session();
        for ch in "kon ko".chars() {
            ime.feed_keystroke(ch).unwrap();
        }
        ime.process_key(KeyEvent::Backspace).unwrap();
        assert_eq!(ime.session().buffer(), "k");
        ime.process_key(KeyEvent::Backspace).unwrap();
        assert_eq!(ime.session().buffer(), "");
        assert!(ime.suggestions().is_empty());

        ime.process_key(KeyEvent::Backspace).unwrap();
        assert_eq!(ime.session().output(), "ค");
        ime.process_key(KeyEvent::Backspace).unwrap();
        assert_eq!(
            ime.process_key(KeyEvent::Backspace).unwrap(),
            KeyResult::NotHandled
        );
        assert!(ime.session().is_idle());
    }

    #[test]
    fn escape_ends_session() {
        let engine = engine();
        let mut ime = engine.start_session();
        assert_eq!(ime.process_key(KeyEvent::Escape).unwrap(), KeyResult::Cancel);
        assert!(ime.is_cancelled());
        assert_eq!(
            ime.process_key(KeyEvent::Char('k')).unwrap(),
            KeyResult::NotHandled
        );
        ime.reset();
        assert!(!ime.is_cancelled());
    }

    #[test]
    fn run_collects_commits_until_end_of_input() {
        let engine = engine();
        let mut ime = engine.start_session();
        let mut lines = Vec::new();
        let mut keys = "kon\rnarak\r".chars();
        ime.run(&mut keys, |_, result| -> Result<(), StoreError> {
            if let KeyResult::Commit(line) = result {
                lines.push(line.clone());
            }
            Ok(())
        })
        .unwrap();
        assert_eq!(lines, vec!["คน".to_string(), "น่ารัก".to_string()]);
        assert!(ime.is_cancelled());
    }
}
