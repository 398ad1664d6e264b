//! UI state types for the TUI layer.
//!
//! Pure data types with no IO, no async, no ratatui dependency.

mod counter;
mod dialog;
mod dismiss;
mod draft;
mod numeric_field;

pub use counter::Counter;
pub use dialog::DialogState;
pub use dismiss::{CancelOutcome, DismissRegistration, DismissStack, HandlerId};
pub use draft::DraftInput;
pub use numeric_field::{FieldEdit, NumericField};
