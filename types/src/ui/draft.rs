//! Single-line text editing with a grapheme cursor.

use unicode_segmentation::UnicodeSegmentation;

/// Handles text editing with proper Unicode grapheme cluster support.
///
/// `cursor` counts grapheme clusters, not bytes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DraftInput {
    text: String,
    cursor: usize,
}

impl DraftInput {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor.saturating_add(1);
        self.cursor = self.clamp_cursor(cursor_moved_right);
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    pub fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index();
        self.text.insert(index, new_char);
        self.move_cursor_right();
    }

    pub fn enter_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let index = self.byte_index();
        self.text.insert_str(index, text);
        let inserted = text.graphemes(true).count();
        self.cursor = self.clamp_cursor(self.cursor.saturating_add(inserted));
    }

    /// Backspace.
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let start = self.byte_index_at(self.cursor - 1);
        let end = self.byte_index_at(self.cursor);
        self.text.replace_range(start..end, "");
        self.move_cursor_left();
    }

    /// Delete.
    pub fn delete_char_forward(&mut self) {
        if self.cursor >= self.grapheme_count() {
            return;
        }

        let start = self.byte_index_at(self.cursor);
        let end = self.byte_index_at(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
        self.cursor = self.grapheme_count();
    }

    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.text.graphemes(true).count()
    }

    #[must_use]
    pub fn byte_index(&self) -> usize {
        self.byte_index_at(self.cursor)
    }

    fn byte_index_at(&self, grapheme_index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.min(self.grapheme_count())
    }
}

#[cfg(test)]
mod tests {
    use super::DraftInput;

    fn draft_with(text: &str) -> DraftInput {
        let mut draft = DraftInput::default();
        draft.set_text(text.to_string());
        draft
    }

    #[test]
    fn insert_and_backspace_at_cursor() {
        let mut draft = draft_with("ac");
        draft.move_cursor_left();
        draft.enter_char('b');
        assert_eq!(draft.text(), "abc");
        assert_eq!(draft.cursor(), 2);

        draft.delete_char();
        assert_eq!(draft.text(), "ac");
        assert_eq!(draft.cursor(), 1);
    }

    #[test]
    fn delete_forward_keeps_cursor() {
        let mut draft = draft_with("abc");
        draft.move_cursor_home();
        draft.delete_char_forward();
        assert_eq!(draft.text(), "bc");
        assert_eq!(draft.cursor(), 0);

        draft.move_cursor_end();
        draft.delete_char_forward();
        assert_eq!(draft.text(), "bc");
    }

    #[test]
    fn cursor_counts_graphemes() {
        let mut draft = draft_with("e\u{301}x");
        assert_eq!(draft.cursor(), 2);
        draft.delete_char();
        draft.delete_char();
        assert_eq!(draft.text(), "");
    }

    #[test]
    fn enter_text_advances_cursor() {
        let mut draft = DraftInput::default();
        draft.enter_text("hello");
        draft.move_cursor_home();
        draft.enter_text(">> ");
        assert_eq!(draft.text(), ">> hello");
        assert_eq!(draft.cursor(), 3);
    }

    #[test]
    fn cursor_does_not_run_past_end() {
        let mut draft = draft_with("x");
        draft.move_cursor_right();
        draft.move_cursor_right();
        assert_eq!(draft.cursor(), 1);
        draft.move_cursor_left();
        draft.move_cursor_left();
        assert_eq!(draft.cursor(), 0);
    }
}
