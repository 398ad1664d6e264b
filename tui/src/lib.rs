//! Terminal UI for jsonboard using ratatui.
//!
//! [`App`] owns all UI state and is driven by [`handle_events`] (keyboard),
//! [`ApiBridge::pump`] (network results) and [`draw`] (rendering).

mod app;
mod form;
mod input;
mod keymap;
mod requests;
mod theme;
mod view;

pub use app::{App, Listing, PostDetail, Screen, Status, StatusKind};
pub use form::{FormAction, NewPostForm};
pub use input::{InputPump, handle_events};
pub use keymap::keystroke;
pub use requests::{ApiBridge, ApiRequest, ApiResponse};
pub use view::draw;
