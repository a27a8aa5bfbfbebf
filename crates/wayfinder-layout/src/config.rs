#![forbid(unsafe_code)]

//! Placement engine constants (deterministic, env-overridable).

use std::env;

use wayfinder_core::env::{apply, parse_bool, parse_f32, validate_non_negative, validate_positive};
use wayfinder_core::{ConfigError, Size};

const ENV_POPOVER_WIDTH: &str = "WAYFINDER_POPOVER_WIDTH";
const ENV_POPOVER_HEIGHT: &str = "WAYFINDER_POPOVER_HEIGHT";
const ENV_SPACING: &str = "WAYFINDER_SPACING";
const ENV_MIN_SPACE: &str = "WAYFINDER_MIN_SPACE";
const ENV_CLAMP_SPOTLIGHT: &str = "WAYFINDER_CLAMP_SPOTLIGHT";

/// Popover placement configuration.
///
/// # Environment Variables
/// - `WAYFINDER_POPOVER_WIDTH` (float > 0)
/// - `WAYFINDER_POPOVER_HEIGHT` (float > 0)
/// - `WAYFINDER_SPACING` (float >= 0)
/// - `WAYFINDER_MIN_SPACE` (float >= 0)
/// - `WAYFINDER_CLAMP_SPOTLIGHT` (bool)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    /// Popover footprint. Height is an estimate; hosts lay out the real
    /// content inside it.
    pub popover_size: Size,
    /// Gap between spotlight and popover, and minimum margin to viewport edges.
    pub spacing: f32,
    /// Space below which the preferred side is considered too tight.
    pub min_space: f32,
    /// Clamp the spotlight's far edges to the viewport.
    pub clamp_spotlight: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            popover_size: Size::new(300.0, 200.0),
            spacing: 16.0,
            min_space: 240.0,
            clamp_spotlight: false,
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct PlacementConfigParse {
    pub config: PlacementConfig,
    pub errors: Vec<ConfigError>,
}

impl PlacementConfig {
    /// Set the popover footprint.
    #[must_use]
    pub fn popover_size(mut self, size: Size) -> Self {
        self.popover_size = size;
        self
    }

    /// Set the spacing constant.
    #[must_use]
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the minimum-space flip threshold.
    #[must_use]
    pub fn min_space(mut self, min_space: f32) -> Self {
        self.min_space = min_space;
        self
    }

    /// Set whether the spotlight is clamped to the viewport's far edges.
    #[must_use]
    pub fn clamp_spotlight(mut self, clamp: bool) -> Self {
        self.clamp_spotlight = clamp;
        self
    }

    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> PlacementConfig {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> PlacementConfigParse {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Parse config through a custom lookup.
    ///
    /// Values that fail to parse keep their defaults; values that parse but
    /// fail validation are reset to defaults. Both are reported.
    #[must_use]
    pub fn from_env_with<F>(mut get: F) -> PlacementConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = PlacementConfig::default();
        let mut errors = Vec::new();

        apply(
            &mut get,
            ENV_POPOVER_WIDTH,
            "popover_width",
            "expected number",
            parse_f32,
            &mut config.popover_size.width,
            &mut errors,
        );
        apply(
            &mut get,
            ENV_POPOVER_HEIGHT,
            "popover_height",
            "expected number",
            parse_f32,
            &mut config.popover_size.height,
            &mut errors,
        );
        apply(
            &mut get,
            ENV_SPACING,
            "spacing",
            "expected number",
            parse_f32,
            &mut config.spacing,
            &mut errors,
        );
        apply(
            &mut get,
            ENV_MIN_SPACE,
            "min_space",
            "expected number",
            parse_f32,
            &mut config.min_space,
            &mut errors,
        );
        apply(
            &mut get,
            ENV_CLAMP_SPOTLIGHT,
            "clamp_spotlight",
            "expected bool (1/0/true/false)",
            parse_bool,
            &mut config.clamp_spotlight,
            &mut errors,
        );

        if let Err(violations) = config.validate() {
            let defaults = PlacementConfig::default();
            for violation in &violations {
                match violation.field {
                    "popover_width" => config.popover_size.width = defaults.popover_size.width,
                    "popover_height" => config.popover_size.height = defaults.popover_size.height,
                    "spacing" => config.spacing = defaults.spacing,
                    "min_space" => config.min_space = defaults.min_space,
                    _ => {}
                }
            }
            errors.extend(violations);
        }

        PlacementConfigParse { config, errors }
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        validate_positive("popover_width", self.popover_size.width, &mut errors);
        validate_positive("popover_height", self.popover_size.height, &mut errors);
        validate_non_negative("spacing", self.spacing, &mut errors);
        validate_non_negative("min_space", self.min_space, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
