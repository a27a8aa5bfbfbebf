#![forbid(unsafe_code)]

//! Errors surfaced by the tour runtime.
//!
//! Navigation never errors: invalid transitions are silent no-ops. The only
//! failures are construction-time configuration problems and asking for a
//! tour where none was provided.

use std::fmt;

use wayfinder_core::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub enum TourError {
    /// [`TourContext::tour`](crate::TourContext::tour) was called with no
    /// tour provided.
    MissingContext,
    /// The tour configuration failed validation.
    InvalidConfig(Vec<ConfigError>),
}

impl fmt::Display for TourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContext => {
                write!(f, "no tour provided: wrap the tree in a TourContext first")
            }
            Self::InvalidConfig(errors) => {
                write!(f, "invalid tour config")?;
                for (i, err) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{sep}{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for TourError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_context_message() {
        let msg = TourError::MissingContext.to_string();
        assert!(msg.contains("no tour provided"));
    }

    #[test]
    fn invalid_config_lists_every_error() {
        let err = TourError::InvalidConfig(vec![
            ConfigError::new("steps", "intro", "duplicate step id"),
            ConfigError::new("padding", "-1", "must be >= 0"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid tour config: steps=intro (duplicate step id); padding=-1 (must be >= 0)"
        );
    }
}
