//! Posts and the create-post form rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{PostId, UserId};
use crate::numeric::NumericValue;

pub const TITLE_MIN_CHARS: usize = 10;
pub const TITLE_MAX_CHARS: usize = 100;
pub const BODY_MIN_CHARS: usize = 100;
pub const BODY_MAX_CHARS: usize = 1000;
pub const USER_ID_MIN: u64 = 1;

/// A post as returned by the API. The server assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    pub user_id: UserId,
    pub title: String,
    pub body: String,
}

/// Payload for `POST /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: UserId,
    pub title: String,
    pub body: String,
}

/// Payload for `PUT`/`PATCH /posts/{id}`; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Body,
    UserId,
}

impl FormField {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Body => "Body",
            Self::UserId => "User ID",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("title must be at least {min} characters")]
    TitleTooShort { min: usize },
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("body must be at least {min} characters")]
    BodyTooShort { min: usize },
    #[error("body must be at most {max} characters")]
    BodyTooLong { max: usize },
    #[error("user id is required")]
    UserIdMissing,
    #[error("user id must be a whole number of at least {min}")]
    UserIdInvalid { min: u64 },
}

impl FieldError {
    #[must_use]
    pub const fn field(&self) -> FormField {
        match self {
            Self::TitleTooShort { .. } | Self::TitleTooLong { .. } => FormField::Title,
            Self::BodyTooShort { .. } | Self::BodyTooLong { .. } => FormField::Body,
            Self::UserIdMissing | Self::UserIdInvalid { .. } => FormField::UserId,
        }
    }
}

/// Every problem found in one submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("post form has {} invalid field(s)", .0.len())]
pub struct FormError(pub Vec<FieldError>);

impl FormError {
    #[must_use]
    pub fn for_field(&self, field: FormField) -> Option<&FieldError> {
        self.0.iter().find(|err| err.field() == field)
    }
}

impl NewPost {
    /// Validate raw form input. Title and body are trimmed before measuring
    /// and the trimmed text is what gets submitted.
    pub fn from_form(title: &str, body: &str, user_id: NumericValue) -> Result<Self, FormError> {
        let title = title.trim();
        let body = body.trim();
        let mut errors = Vec::new();

        let title_len = title.chars().count();
        if title_len < TITLE_MIN_CHARS {
            errors.push(FieldError::TitleTooShort {
                min: TITLE_MIN_CHARS,
            });
        } else if title_len > TITLE_MAX_CHARS {
            errors.push(FieldError::TitleTooLong {
                max: TITLE_MAX_CHARS,
            });
        }

        let body_len = body.chars().count();
        if body_len < BODY_MIN_CHARS {
            errors.push(FieldError::BodyTooShort {
                min: BODY_MIN_CHARS,
            });
        } else if body_len > BODY_MAX_CHARS {
            errors.push(FieldError::BodyTooLong {
                max: BODY_MAX_CHARS,
            });
        }

        let user_id = match user_id {
            NumericValue::Empty => {
                errors.push(FieldError::UserIdMissing);
                None
            }
            NumericValue::Number(n) if n.fract() == 0.0 && n >= USER_ID_MIN as f64 => {
                Some(UserId::new(n as u64))
            }
            NumericValue::Number(_) => {
                errors.push(FieldError::UserIdInvalid { min: USER_ID_MIN });
                None
            }
        };

        match user_id {
            Some(user_id) if errors.is_empty() => Ok(Self {
                user_id,
                title: title.to_string(),
                body: body.to_string(),
            }),
            _ => Err(FormError(errors)),
        }
    }
}
