//! Numeric text field: a draft buffer guarded by the keystroke filter and the
//! sanitizer.

use crate::keys::{Key, Keystroke, filter_keystroke};
use crate::numeric::{NumericConfig, NumericValue, Rejection, sanitize, strip_disallowed};

use super::DraftInput;

/// What an edit did to the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEdit {
    /// The keystroke filter refused the key; nothing changed.
    Blocked,
    /// The resulting text failed sanitization; nothing changed.
    Rejected(Rejection),
    /// Text changed and the field now holds this value.
    Accepted(NumericValue),
    /// Caret moved or the key has no editing effect here.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct NumericField {
    config: NumericConfig,
    draft: DraftInput,
    value: NumericValue,
}

impl NumericField {
    #[must_use]
    pub fn new(config: NumericConfig) -> Self {
        Self {
            config,
            draft: DraftInput::default(),
            value: NumericValue::Empty,
        }
    }

    /// Start with `value` if it satisfies `config`, otherwise empty.
    #[must_use]
    pub fn with_value(config: NumericConfig, value: NumericValue) -> Self {
        let mut field = Self::new(config);
        field.set_value(value);
        field
    }

    #[must_use]
    pub fn config(&self) -> &NumericConfig {
        &self.config
    }

    #[must_use]
    pub fn value(&self) -> NumericValue {
        self.value
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.draft.text()
    }

    /// The underlying buffer, for rendering text and caret together.
    #[must_use]
    pub fn draft(&self) -> &DraftInput {
        &self.draft
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.draft.cursor()
    }

    /// Replace the value programmatically. Values the config would reject are
    /// ignored.
    pub fn set_value(&mut self, value: NumericValue) -> FieldEdit {
        self.commit(value.to_string())
    }

    pub fn handle_key(&mut self, keystroke: &Keystroke) -> FieldEdit {
        if !filter_keystroke(keystroke, self.draft.text(), self.draft.cursor(), &self.config)
            .is_allowed()
        {
            return FieldEdit::Blocked;
        }

        let mut candidate = self.draft.clone();
        match keystroke.key {
            Key::Left => self.draft.move_cursor_left(),
            Key::Right => self.draft.move_cursor_right(),
            Key::Backspace => candidate.delete_char(),
            Key::Delete => candidate.delete_char_forward(),
            Key::Char(c) if !keystroke.control && !keystroke.meta => candidate.enter_char(c),
            // Up/Down/Tab/Enter belong to the surrounding form; clipboard
            // shortcuts arrive as paste events.
            _ => {}
        }
        self.apply(candidate)
    }

    /// Insert pasted text at the caret. Only the sanitizer gates pastes.
    pub fn paste(&mut self, text: &str) -> FieldEdit {
        let mut candidate = self.draft.clone();
        candidate.enter_text(text);
        self.apply(candidate)
    }

    fn apply(&mut self, candidate: DraftInput) -> FieldEdit {
        if candidate.text() == self.draft.text() {
            return FieldEdit::Unchanged;
        }
        match sanitize(candidate.text(), &self.config) {
            Ok(value) => {
                let stripped = strip_disallowed(candidate.text(), &self.config);
                if stripped.len() == candidate.text().len() {
                    self.draft = candidate;
                } else {
                    self.draft.set_text(stripped.into_owned());
                }
                self.value = value;
                FieldEdit::Accepted(value)
            }
            Err(rejection) => {
                tracing::trace!(text = candidate.text(), %rejection, "numeric edit ignored");
                FieldEdit::Rejected(rejection)
            }
        }
    }

    fn commit(&mut self, text: String) -> FieldEdit {
        match sanitize(&text, &self.config) {
            Ok(value) => {
                self.draft.set_text(text);
                self.value = value;
                FieldEdit::Accepted(value)
            }
            Err(rejection) => FieldEdit::Rejected(rejection),
        }
    }
}
