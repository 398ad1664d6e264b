//! Core domain types for jsonboard.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod dates;
mod ids;
mod keys;
mod numeric;
mod post;
mod text;
pub mod ui;
mod user;

pub use dates::{DateStyle, format_board, format_date_range, format_relative};
pub use ids::{PostId, UserId};
pub use keys::{Key, KeyVerdict, Keystroke, filter_keystroke};
pub use numeric::{NumericConfig, NumericValue, Rejection, sanitize, strip_disallowed};
pub use post::{
    BODY_MAX_CHARS, BODY_MIN_CHARS, FieldError, FormError, FormField, NewPost, Post, PostPatch,
    TITLE_MAX_CHARS, TITLE_MIN_CHARS, USER_ID_MIN,
};
pub use text::{first_line, truncate_with_ellipsis};
pub use user::{Address, Company, Geo, NewUser, User, UserPatch};
