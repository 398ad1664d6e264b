//! The create-post form.

use crossterm::event::{KeyCode, KeyEvent};

use jsonboard_types::ui::{DraftInput, FieldEdit, NumericField};
use jsonboard_types::{
    FormError, FormField, Key, NewPost, NumericConfig, NumericValue, USER_ID_MIN,
};

use crate::keymap::keystroke;

const FIELD_ORDER: [FormField; 3] = [FormField::Title, FormField::Body, FormField::UserId];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
}

#[derive(Debug)]
pub struct NewPostForm {
    title: DraftInput,
    body: DraftInput,
    user_id: NumericField,
    focus: FormField,
    errors: Option<FormError>,
    submitting: bool,
    default_user_id: u64,
}

fn user_id_config() -> NumericConfig {
    NumericConfig::integer().with_min(USER_ID_MIN as f64)
}

fn user_id_field(default_user_id: u64) -> NumericField {
    let value = NumericValue::Number(default_user_id as f64);
    NumericField::with_value(user_id_config(), value)
}

impl NewPostForm {
    #[must_use]
    pub fn new(default_user_id: u64) -> Self {
        Self {
            title: DraftInput::default(),
            body: DraftInput::default(),
            user_id: user_id_field(default_user_id),
            focus: FormField::Title,
            errors: None,
            submitting: false,
            default_user_id,
        }
    }

    #[must_use]
    pub fn title(&self) -> &DraftInput {
        &self.title
    }

    #[must_use]
    pub fn body(&self) -> &DraftInput {
        &self.body
    }

    #[must_use]
    pub fn user_id(&self) -> &NumericField {
        &self.user_id
    }

    #[must_use]
    pub fn focus(&self) -> FormField {
        self.focus
    }

    #[must_use]
    pub fn errors(&self) -> Option<&FormError> {
        self.errors.as_ref()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub(crate) fn submit_finished(&mut self) {
        self.submitting = false;
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.default_user_id);
    }

    pub fn focus_next(&mut self) {
        self.focus = FIELD_ORDER[(self.focus_index() + 1) % FIELD_ORDER.len()];
    }

    pub fn focus_prev(&mut self) {
        let len = FIELD_ORDER.len();
        self.focus = FIELD_ORDER[(self.focus_index() + len - 1) % len];
    }

    fn focus_index(&self) -> usize {
        FIELD_ORDER
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0)
    }

    /// Edit the focused field. Tab/BackTab move focus and Enter asks for a
    /// submit; everything else is an edit.
    pub fn handle_key(&mut self, event: &KeyEvent) -> FormAction {
        match event.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                return FormAction::None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                return FormAction::None;
            }
            KeyCode::Enter => return FormAction::Submit,
            _ => {}
        }

        let stroke = keystroke(event);
        match self.focus {
            FormField::UserId => {
                if let FieldEdit::Rejected(rejection) = self.user_id.handle_key(&stroke) {
                    tracing::debug!(%rejection, "user id edit ignored");
                }
            }
            FormField::Title => edit_text(&mut self.title, stroke.key, stroke.control),
            FormField::Body => edit_text(&mut self.body, stroke.key, stroke.control),
        }
        FormAction::None
    }

    pub fn paste(&mut self, text: &str) {
        match self.focus {
            FormField::Title => self.title.enter_text(&single_line(text)),
            FormField::Body => self.body.enter_text(&single_line(text)),
            FormField::UserId => {
                self.user_id.paste(text.trim());
            }
        }
    }

    /// Validate the current input. On success the form is marked as
    /// submitting until [`Self::submit_finished`] or [`Self::reset`].
    pub fn submit(&mut self) -> Option<NewPost> {
        if self.submitting {
            return None;
        }
        match NewPost::from_form(self.title.text(), self.body.text(), self.user_id.value()) {
            Ok(post) => {
                self.errors = None;
                self.submitting = true;
                Some(post)
            }
            Err(errors) => {
                if let Some(first) = errors.0.first() {
                    self.focus = first.field();
                }
                self.errors = Some(errors);
                None
            }
        }
    }
}

fn edit_text(draft: &mut DraftInput, key: Key, control: bool) {
    match key {
        Key::Char(c) if !control => draft.enter_char(c),
        Key::Backspace => draft.delete_char(),
        Key::Delete => draft.delete_char_forward(),
        Key::Left => draft.move_cursor_left(),
        Key::Right => draft.move_cursor_right(),
        Key::Home => draft.move_cursor_home(),
        Key::End => draft.move_cursor_end(),
        _ => {}
    }
}

fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}
