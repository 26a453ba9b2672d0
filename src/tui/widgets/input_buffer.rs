//! Shared text input buffer with cursor management.
//!
//! Backs the search, quantity, note, and inline-edit fields.

/// A simple text input buffer with cursor positioning.
#[derive(Debug, Default)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let content = text.into();
        let cursor = content.len();
        Self { content, cursor }
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.len() {
            self.cursor = self.content[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.content.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Replace the whole content programmatically (composed selection
    /// label, seeded edit draft), cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.cursor = self.content.len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_cursor() {
        let mut buf = InputBuffer::new();
        buf.insert_char('h');
        buf.insert_char('i');
        assert_eq!(buf.text(), "hi");
        assert_eq!(buf.cursor_position(), 2);
    }

    #[test]
    fn test_backspace() {
        let mut buf = InputBuffer::with_text("ab");
        buf.backspace();
        assert_eq!(buf.text(), "a");
        assert_eq!(buf.cursor_position(), 1);
    }

    #[test]
    fn test_set_text_moves_cursor_to_end() {
        let mut buf = InputBuffer::new();
        buf.insert_char('x');
        buf.set_text("400123 - Beans 1kg");
        assert_eq!(buf.text(), "400123 - Beans 1kg");
        assert_eq!(buf.cursor_position(), buf.text().len());
    }

    #[test]
    fn test_movement() {
        let mut buf = InputBuffer::with_text("abc");
        buf.move_home();
        assert_eq!(buf.cursor_position(), 0);
        buf.move_right();
        assert_eq!(buf.cursor_position(), 1);
        buf.move_end();
        assert_eq!(buf.cursor_position(), 3);
        buf.move_left();
        assert_eq!(buf.cursor_position(), 2);
    }

    #[test]
    fn test_is_empty_trims() {
        let mut buf = InputBuffer::new();
        assert!(buf.is_empty());
        buf.insert_char(' ');
        assert!(buf.is_empty());
        buf.insert_char('a');
        assert!(!buf.is_empty());
    }
}
