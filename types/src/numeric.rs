//! Numeric text-field sanitization.
//!
//! Turns whatever is currently in a text field into either an empty value or
//! a finite number, under a per-field [`NumericConfig`]. Invalid candidates are
//! rejected rather than corrected: the caller keeps its previous value.
//!
//! Incomplete entries (`-`, `.`, `-.`) sanitize to [`NumericValue::Empty`] so
//! that the user can keep typing toward a valid number.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ASCII digits only: `\d` would admit every Unicode decimal digit.
static UNSIGNED_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*$").expect("static pattern"));
static SIGNED_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]*$").expect("static pattern"));
static UNSIGNED_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").expect("static pattern"));
static SIGNED_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]*\.?[0-9]*$").expect("static pattern"));

/// Per-field constraints. Immutable for the lifetime of an input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericConfig {
    pub allow_decimals: bool,
    pub allow_negative: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericConfig {
    /// Non-negative whole numbers, no bounds.
    #[must_use]
    pub const fn integer() -> Self {
        Self {
            allow_decimals: false,
            allow_negative: false,
            min: None,
            max: None,
        }
    }

    #[must_use]
    pub const fn with_decimals(mut self) -> Self {
        self.allow_decimals = true;
        self
    }

    #[must_use]
    pub const fn with_negative(mut self) -> Self {
        self.allow_negative = true;
        self
    }

    #[must_use]
    pub const fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub const fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    fn pattern(&self) -> &'static Regex {
        match (self.allow_decimals, self.allow_negative) {
            (false, false) => &*UNSIGNED_INTEGER,
            (false, true) => &*SIGNED_INTEGER,
            (true, false) => &*UNSIGNED_DECIMAL,
            (true, true) => &*SIGNED_DECIMAL,
        }
    }
}

/// The sanitized content of a numeric field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum NumericValue {
    #[default]
    Empty,
    Number(f64),
}

impl NumericValue {
    #[must_use]
    pub const fn as_f64(self) -> Option<f64> {
        match self {
            Self::Empty => None,
            Self::Number(n) => Some(n),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Why a candidate was ignored. Never surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Rejection {
    #[error("input is not a number in the allowed form")]
    Malformed,
    #[error("{value} is below the minimum of {min}")]
    BelowMin { value: f64, min: f64 },
    #[error("{value} is above the maximum of {max}")]
    AboveMax { value: f64, max: f64 },
}

/// Remove every `.` and `-` that `config` does not permit.
#[must_use]
pub fn strip_disallowed<'a>(raw: &'a str, config: &NumericConfig) -> Cow<'a, str> {
    let disallowed = |c: char| match c {
        '.' => !config.allow_decimals,
        '-' => !config.allow_negative,
        _ => false,
    };
    if raw.contains(disallowed) {
        Cow::Owned(raw.chars().filter(|&c| !disallowed(c)).collect())
    } else {
        Cow::Borrowed(raw)
    }
}

/// Sanitize raw field text against `config`.
///
/// `Err` means "leave the field as it was"; values are never clamped into
/// range.
///
/// ```
/// use jsonboard_types::{NumericConfig, NumericValue, sanitize};
///
/// let config = NumericConfig::integer();
/// assert_eq!(sanitize("12.5", &config), Ok(NumericValue::Number(125.0)));
/// assert_eq!(sanitize("", &config), Ok(NumericValue::Empty));
/// ```
pub fn sanitize(raw: &str, config: &NumericConfig) -> Result<NumericValue, Rejection> {
    if raw.is_empty() {
        return Ok(NumericValue::Empty);
    }

    let stripped = strip_disallowed(raw, config);

    if !config.pattern().is_match(&stripped) {
        return Err(Rejection::Malformed);
    }

    if matches!(&*stripped, "" | "-" | "." | "-.") {
        return Ok(NumericValue::Empty);
    }

    let value: f64 = stripped.parse().map_err(|_| Rejection::Malformed)?;
    if !value.is_finite() {
        return Err(Rejection::Malformed);
    }

    if let Some(min) = config.min
        && value < min
    {
        return Err(Rejection::BelowMin { value, min });
    }
    if let Some(max) = config.max
        && value > max
    {
        return Err(Rejection::AboveMax { value, max });
    }

    Ok(NumericValue::Number(value))
}
