#![forbid(unsafe_code)]

//! Shared parsing for env-overridable configuration.
//!
//! Every config struct in the workspace follows the same shape: a `Default`,
//! a `from_env_with(get)` that takes a lookup closure (so tests never touch
//! the process environment), and a list of [`ConfigError`] diagnostics for
//! values that failed to parse or validate.

use std::fmt;

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    #[must_use]
    pub fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[inline]
#[must_use]
pub fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

#[inline]
#[must_use]
pub fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

/// Parse a finite float. `NaN` and infinities are rejected.
#[inline]
#[must_use]
pub fn parse_f32(value: &str) -> Option<f32> {
    value.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Apply `parse` to the variable `key` if present, storing the result in
/// `slot` or recording a diagnostic against `field`.
pub fn apply<F, T, P>(
    get: &mut F,
    key: &str,
    field: &'static str,
    expected: &str,
    parse: P,
    slot: &mut T,
    errors: &mut Vec<ConfigError>,
) where
    F: FnMut(&str) -> Option<String>,
    P: Fn(&str) -> Option<T>,
{
    if let Some(value) = get(key) {
        match parse(&value) {
            Some(parsed) => *slot = parsed,
            None => errors.push(ConfigError::new(field, value, expected)),
        }
    }
}

pub fn validate_non_negative(field: &'static str, value: f32, errors: &mut Vec<ConfigError>) {
    if !value.is_finite() || value < 0.0 {
        errors.push(ConfigError::new(field, value.to_string(), "must be >= 0"));
    }
}

pub fn validate_positive(field: &'static str, value: f32, errors: &mut Vec<ConfigError>) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(ConfigError::new(field, value.to_string(), "must be > 0"));
    }
}
