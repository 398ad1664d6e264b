//! Open/closed state for a dialog.

use std::cell::Cell;
use std::rc::Rc;

/// Shared open flag. Clones observe the same dialog, which lets a dismiss
/// handler close a dialog it does not own.
#[derive(Debug, Clone, Default)]
pub struct DialogState {
    open: Rc<Cell<bool>>,
}

impl DialogState {
    #[must_use]
    pub fn new(initially_open: bool) -> Self {
        Self {
            open: Rc::new(Cell::new(initially_open)),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn open(&self) {
        self.open.set(true);
    }

    pub fn close(&self) {
        self.open.set(false);
    }

    pub fn toggle(&self) {
        self.open.set(!self.open.get());
    }

    /// A close action suitable for [`super::DismissStack::push`].
    #[must_use]
    pub fn closer(&self) -> impl FnOnce() + 'static {
        let open = Rc::clone(&self.open);
        move || open.set(false)
    }
}

#[cfg(test)]
mod tests {
    use super::DialogState;
    use crate::ui::DismissStack;

    #[test]
    fn starts_in_requested_state() {
        assert!(!DialogState::default().is_open());
        assert!(DialogState::new(true).is_open());
    }

    #[test]
    fn open_close_toggle() {
        let dialog = DialogState::default();
        dialog.open();
        assert!(dialog.is_open());
        dialog.toggle();
        assert!(!dialog.is_open());
        dialog.toggle();
        assert!(dialog.is_open());
        dialog.close();
        assert!(!dialog.is_open());
    }

    #[test]
    fn closer_closes_through_the_dismiss_stack() {
        let stack = DismissStack::new();
        let outer = DialogState::new(true);
        let inner = DialogState::new(true);
        stack.push(outer.closer());
        stack.push(inner.closer());

        stack.handle_cancel();
        assert!(outer.is_open());
        assert!(!inner.is_open());

        stack.handle_cancel();
        assert!(!outer.is_open());
    }
}
