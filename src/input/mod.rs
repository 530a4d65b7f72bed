use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
pub use handlers::*;
pub use mode::Mode;
use std::{fmt::Display, ops::RangeBounds};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

mod handlers;
mod mode;

/// Single line editor used by the compose and search prompts.
///
/// `idx` is a byte index into `text` that always sits on a grapheme boundary.
/// When the text is wider than the footer, `scroll` is the byte index of the
/// first visible grapheme.
pub struct Input {
    pub text: String,
    pub prompt: &'static str,
    idx: usize,
    scroll: usize,
    available_width: usize,
    edited: bool,
}

impl Input {
    pub fn new(prompt: &'static str) -> Self {
        Self {
            text: String::new(),
            prompt,
            idx: 0,
            scroll: 0,
            available_width: usize::MAX,
            edited: false,
        }
    }

    pub fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
        self.idx = self.text.len();
        self.scroll = 0;
        self.fit();
    }

    fn previous_boundary(&self) -> Option<usize> {
        self.text[..self.idx]
            .grapheme_indices(true)
            .next_back()
            .map(|(offset, _)| offset)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.idx..]
            .graphemes(true)
            .next()
            .map(|grapheme| self.idx + grapheme.len())
    }

    fn remove<R: RangeBounds<usize>>(&mut self, range: R) {
        if self.text.drain(range).next().is_some() {
            self.edited = true;
        }
    }

    fn insert(&mut self, ch: char) {
        self.text.insert(self.idx, ch);
        self.idx += ch.len_utf8();
        self.edited = true;
        self.fit();
    }

    fn backspace(&mut self) {
        if let Some(start) = self.previous_boundary() {
            self.remove(start..self.idx);
            self.idx = start;
            self.fit();
        }
    }

    fn delete(&mut self) {
        if let Some(end) = self.next_boundary() {
            self.remove(self.idx..end);
        }
    }

    fn left(&mut self) {
        if let Some(start) = self.previous_boundary() {
            self.idx = start;
            self.fit();
        }
    }

    fn right(&mut self) {
        if let Some(end) = self.next_boundary() {
            self.idx = end;
            self.fit();
        }
    }

    fn word_left(&mut self) {
        self.idx = self.text[..self.idx]
            .unicode_word_indices()
            .next_back()
            .map_or(0, |(offset, _)| offset);
        self.fit();
    }

    fn word_right(&mut self) {
        self.idx = self.text[self.idx..]
            .unicode_word_indices()
            .nth(1)
            .map_or(self.text.len(), |(offset, _)| self.idx + offset);
        self.fit();
    }

    fn home(&mut self) {
        self.idx = 0;
        self.fit();
    }

    fn end(&mut self) {
        self.idx = self.text.len();
        self.fit();
    }

    fn delete_word_before_cursor(&mut self) {
        let end = self.idx;
        self.word_left();
        self.remove(self.idx..end);
    }

    fn clear(&mut self) {
        self.remove(..);
        self.idx = 0;
        self.scroll = 0;
    }

    /// Applies an editing key. Returns whether the text changed.
    fn update(&mut self, key: KeyEvent) -> bool {
        self.edited = false;

        match (key.code, key.modifiers) {
            (KeyCode::Left, KeyModifiers::CONTROL) => self.word_left(),
            (KeyCode::Right, KeyModifiers::CONTROL) => self.word_right(),
            (KeyCode::Left, _) | (KeyCode::Char('b'), KeyModifiers::CONTROL) => self.left(),
            (KeyCode::Right, _) | (KeyCode::Char('f'), KeyModifiers::CONTROL) => self.right(),
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => self.home(),
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => self.end(),
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => self.delete_word_before_cursor(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.clear(),
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => self.remove(self.idx..),
            (KeyCode::Backspace, _) | (KeyCode::Char('h'), KeyModifiers::CONTROL) => {
                self.backspace();
            }
            (KeyCode::Delete, _) => self.delete(),
            (KeyCode::Char(ch), KeyModifiers::NONE | KeyModifiers::SHIFT) => self.insert(ch),
            _ => {}
        }

        self.edited
    }

    /// Sets the number of columns the footer has for prompt and text.
    pub fn update_width(&mut self, width: u16) {
        self.available_width = usize::from(width).saturating_sub(self.prompt.width());
        self.fit();
    }

    // keeps the cursor inside the visible part of the text
    fn fit(&mut self) {
        if self.scroll > self.idx {
            self.scroll = self.idx;
        }

        let mut width = self.text[self.scroll..self.idx].width();

        while width >= self.available_width {
            let Some(grapheme) = self.text[self.scroll..self.idx].graphemes(true).next() else {
                break;
            };

            width -= grapheme.width();
            self.scroll += grapheme.len();
        }
    }

    /// Column of the cursor relative to the start of the prompt.
    pub fn cursor_position(&self) -> u16 {
        let column = self.prompt.width() + self.text[self.scroll..self.idx].width();

        u16::try_from(column).unwrap_or(u16::MAX)
    }
}

impl From<&Mode> for Input {
    fn from(mode: &Mode) -> Self {
        let prompt = match mode {
            Mode::Compose => "> ",
            Mode::Search(_) => "/",
            Mode::Normal => "",
        };

        Self::new(prompt)
    }
}

impl Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.prompt, &self.text[self.scroll..])
    }
}

#[cfg(test)]
mod tests {
    use super::Input;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(input: &mut Input, code: KeyCode) -> bool {
        input.update(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(input: &mut Input, ch: char) -> bool {
        input.update(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
    }

    fn type_str(input: &mut Input, text: &str) {
        for ch in text.chars() {
            press(input, KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_and_editing() {
        let mut input = Input::new("> ");

        type_str(&mut input, "helo");
        press(&mut input, KeyCode::Left);
        type_str(&mut input, "l");
        assert_eq!(input.text, "hello");
        assert_eq!(input.cursor_position(), 6);

        assert!(press(&mut input, KeyCode::Backspace));
        assert!(!press(&mut input, KeyCode::Right) && input.text == "helo");
        assert!(!press(&mut input, KeyCode::Delete));
        assert_eq!(input.to_string(), "> helo");
    }

    #[test]
    fn graphemes_are_edited_whole() {
        let mut input = Input::new("");

        type_str(&mut input, "ne\u{301}");
        assert_eq!(input.cursor_position(), 2);

        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.text, "n");
    }

    #[test]
    fn word_motions() {
        let mut input = Input::new("");
        input.set_text("see you at noon");

        ctrl(&mut input, 'w');
        assert_eq!(input.text, "see you at ");

        input.update(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL));
        input.update(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL));
        assert_eq!(input.cursor_position(), 4);

        ctrl(&mut input, 'k');
        assert_eq!(input.text, "see ");

        ctrl(&mut input, 'u');
        assert!(input.text.is_empty());
        assert_eq!(input.cursor_position(), 0);
    }

    #[test]
    fn control_chars_are_not_inserted() {
        let mut input = Input::new("");

        assert!(!ctrl(&mut input, 'x'));
        assert!(input.text.is_empty());
    }

    #[test]
    fn long_text_scrolls() {
        let mut input = Input::new("/");
        input.update_width(6);

        type_str(&mut input, "abcdefgh");

        assert_eq!(input.to_string(), "/efgh");
        assert_eq!(input.cursor_position(), 5);

        press(&mut input, KeyCode::Home);
        assert_eq!(input.cursor_position(), 1);
        assert_eq!(input.to_string(), "/abcdefgh");
    }
}
