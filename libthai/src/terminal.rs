// libthai/src/terminal.rs
//
// Raw-mode terminal plumbing for the real-time IME: a keystroke source that
// turns crossterm key events back into the raw characters the IME expects,
// and a screen that redraws the input area in place.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Stylize;
use crossterm::{cursor, queue, terminal};
use libthai::{InputSession, KeyResult, KeystrokeSource, ScoredMatch};
use std::io::{self, Write};

/// Keystrokes from a terminal in raw mode. Raw mode ends on drop.
pub struct RawKeys {
    _private: (),
}

impl RawKeys {
    pub fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawKeys {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            tracing::warn!(%err, "failed to leave raw mode");
        }
    }
}

impl KeystrokeSource for RawKeys {
    fn next_keystroke(&mut self) -> Option<char> {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(ch) = raw_char(&key) {
                        return Some(ch);
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(%err, "terminal read failed");
                    return None;
                }
            }
        }
    }
}

/// The byte a plain raw-mode `read(1)` would have produced for `key`.
fn raw_char(key: &KeyEvent) -> Option<char> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => Some('\u{3}'),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(c),
        KeyCode::Backspace => Some('\u{7f}'),
        KeyCode::Enter => Some('\r'),
        KeyCode::Esc => Some('\u{1b}'),
        _ => None,
    }
}

/// In-place redraw of the output line, the input line and suggestions.
pub struct Screen<W: Write> {
    out: W,
    verbose: bool,
    lines_drawn: u16,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self {
            out,
            verbose,
            lines_drawn: 0,
        }
    }

    pub fn header(&mut self) -> io::Result<()> {
        write!(self.out, "{}\r\n", "Thai Phonetic Input (IME mode)".bold())?;
        write!(
            self.out,
            "{}\r\n",
            "Space=accept  1-5=select  Enter=accept+newline  Backspace=delete  Esc=exit".dark_grey()
        )?;
        if self.verbose {
            write!(self.out, "{}\r\n", "[verbose]".yellow())?;
        }
        write!(self.out, "{}\r\n", "-".repeat(60))?;
        self.out.flush()
    }

    /// React to the result of one key.
    pub fn update(&mut self, session: &InputSession, result: &KeyResult) -> io::Result<()> {
        match result {
            KeyResult::Commit(line) => {
                self.clear()?;
                write!(self.out, "{}\r\n\r\n", format!("✓ {}", line).green())?;
                self.draw(session)
            }
            KeyResult::Cancel => {
                self.clear()?;
                write!(self.out, "{}\r\n", "Goodbye!".dark_grey())?;
                self.out.flush()
            }
            KeyResult::Handled | KeyResult::NotHandled => self.draw(session),
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, cursor::MoveToColumn(0))?;
        if self.lines_drawn > 0 {
            queue!(self.out, cursor::MoveUp(self.lines_drawn))?;
        }
        queue!(self.out, terminal::Clear(terminal::ClearType::FromCursorDown))?;
        self.lines_drawn = 0;
        Ok(())
    }

    pub fn draw(&mut self, session: &InputSession) -> io::Result<()> {
        self.clear()?;
        let mut lines = Vec::new();
        if !session.output().is_empty() {
            lines.push(session.output().green().to_string());
        }
        lines.push(format!("> {}{}", session.buffer().cyan(), "_".dark_grey()));

        if !session.buffer().is_empty() {
            if session.suggestions().is_empty() {
                lines.push(format!("  {}", "(no matches)".dark_grey()));
            } else {
                lines.push(String::new());
                for (i, m) in session.suggestions().iter().enumerate() {
                    lines.push(self.suggestion_line(i, m));
                }
            }
        }

        for line in &lines {
            write!(self.out, "{}\r\n", line)?;
        }
        self.lines_drawn = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        self.out.flush()
    }

    fn suggestion_line(&self, index: usize, m: &ScoredMatch) -> String {
        let number = format!("{}.", index + 1);
        let number = if index == 0 {
            number.reverse().to_string()
        } else {
            number.bold().to_string()
        };
        let mut line = format!("  {} {} {}", number, m.text, format!("({})", m.romanization).dark_grey());
        if self.verbose {
            line.push_str(
                &format!(
                    " [{}] score:{:.1} freq:{}",
                    m.match_type,
                    m.score,
                    crate::group_thousands(m.frequency)
                )
                .dark_grey()
                .to_string(),
            );
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_keys_map_to_raw_bytes() {
        let key = |code, modifiers| KeyEvent::new(code, modifiers);
        assert_eq!(raw_char(&key(KeyCode::Char('k'), KeyModifiers::NONE)), Some('k'));
        assert_eq!(raw_char(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some('\u{3}'));
        assert_eq!(raw_char(&key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
        assert_eq!(raw_char(&key(KeyCode::Backspace, KeyModifiers::NONE)), Some('\u{7f}'));
        assert_eq!(raw_char(&key(KeyCode::Enter, KeyModifiers::NONE)), Some('\r'));
        assert_eq!(raw_char(&key(KeyCode::Left, KeyModifiers::NONE)), None);
    }

    #[test]
    fn draws_buffer_and_no_match_hint() {
        let mut screen = Screen::new(Vec::new(), false);
        screen.draw(&InputSession::new()).unwrap();
        assert_eq!(screen.lines_drawn, 1);
        let text = String::from_utf8_lossy(&screen.out).to_string();
        assert!(text.contains("> "));
    }
}
