#![forbid(unsafe_code)]

//! Tour configuration and runtime settings.
//!
//! [`TourConfig`] is what the app author writes: steps, toggles, colours and
//! tour-level callbacks. It is immutable once handed to a [`Tour`].
//!
//! [`RuntimeSettings`] is what the deployment tunes: engine constants,
//! measurement timing and auto-scroll, each overridable from the environment.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use wayfinder_core::{ConfigError, env::validate_non_negative};
use wayfinder_layout::{AutoScrollConfig, PlacementConfig, SpotlightSpec};

use crate::measure::MeasurePolicy;
use crate::runtime::Tour;
use crate::step::{Callback, TourStep};

/// Default overlay colour: black at 75% opacity.
pub const DEFAULT_OVERLAY_COLOR: &str = "rgba(0, 0, 0, 0.75)";

/// Opaque style overrides, carried through to the host untouched.
pub type StyleOverrides = Vec<(String, String)>;

/// Everything that defines a tour run.
#[derive(Clone)]
pub struct TourConfig {
    pub steps: Vec<TourStep>,
    pub show_buttons: bool,
    pub show_progress: bool,
    pub allow_close: bool,
    /// Hint for the host's enter/exit animations.
    pub animate: bool,
    pub overlay_color: String,
    pub popover_style: StyleOverrides,
    pub overlay_style: StyleOverrides,
    pub default_padding: f32,
    pub default_corner_radius: f32,
    pub on_start: Option<Callback>,
    pub on_complete: Option<Callback>,
    pub on_skip: Option<Callback>,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            show_buttons: true,
            show_progress: true,
            allow_close: true,
            animate: true,
            overlay_color: DEFAULT_OVERLAY_COLOR.to_string(),
            popover_style: Vec::new(),
            overlay_style: Vec::new(),
            default_padding: 8.0,
            default_corner_radius: 8.0,
            on_start: None,
            on_complete: None,
            on_skip: None,
        }
    }
}

impl TourConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(mut self, step: TourStep) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn steps(mut self, steps: impl IntoIterator<Item = TourStep>) -> Self {
        self.steps.extend(steps);
        self
    }

    #[must_use]
    pub fn show_buttons(mut self, show: bool) -> Self {
        self.show_buttons = show;
        self
    }

    #[must_use]
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    #[must_use]
    pub fn allow_close(mut self, allow: bool) -> Self {
        self.allow_close = allow;
        self
    }

    #[must_use]
    pub fn animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    #[must_use]
    pub fn overlay_color(mut self, color: impl Into<String>) -> Self {
        self.overlay_color = color.into();
        self
    }

    #[must_use]
    pub fn popover_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.popover_style.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn overlay_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overlay_style.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn default_padding(mut self, padding: f32) -> Self {
        self.default_padding = padding;
        self
    }

    #[must_use]
    pub fn default_corner_radius(mut self, radius: f32) -> Self {
        self.default_corner_radius = radius;
        self
    }

    #[must_use]
    pub fn on_start(mut self, f: impl Fn(&Tour) + 'static) -> Self {
        self.on_start = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_complete(mut self, f: impl Fn(&Tour) + 'static) -> Self {
        self.on_complete = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_skip(mut self, f: impl Fn(&Tour) + 'static) -> Self {
        self.on_skip = Some(Rc::new(f));
        self
    }

    /// Tour-level spotlight defaults.
    #[must_use]
    pub fn spotlight_defaults(&self) -> SpotlightSpec {
        SpotlightSpec::new(self.default_padding, self.default_corner_radius)
    }

    /// Index of the step with `id`.
    #[must_use]
    pub fn step_index(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    /// Validate and return all violations.
    ///
    /// Rejects empty or duplicate step ids and negative or non-finite
    /// padding / corner radius at either level.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        validate_non_negative("default_padding", self.default_padding, &mut errors);
        validate_non_negative(
            "default_corner_radius",
            self.default_corner_radius,
            &mut errors,
        );

        let mut seen = HashSet::new();
        for (i, step) in self.steps.iter().enumerate() {
            if step.id.is_empty() {
                errors.push(ConfigError::new(
                    "step.id",
                    format!("#{i}"),
                    "step id must not be empty",
                ));
            } else if !seen.insert(step.id.as_str()) {
                errors.push(ConfigError::new(
                    "step.id",
                    step.id.clone(),
                    "duplicate step id",
                ));
            }
            if let Some(padding) = step.padding {
                validate_non_negative("step.padding", padding, &mut errors);
            }
            if let Some(radius) = step.corner_radius {
                validate_non_negative("step.corner_radius", radius, &mut errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl fmt::Debug for TourConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourConfig")
            .field("steps", &self.steps)
            .field("show_buttons", &self.show_buttons)
            .field("show_progress", &self.show_progress)
            .field("allow_close", &self.allow_close)
            .field("animate", &self.animate)
            .field("overlay_color", &self.overlay_color)
            .field("default_padding", &self.default_padding)
            .field("default_corner_radius", &self.default_corner_radius)
            .finish_non_exhaustive()
    }
}

/// Deployment-tunable settings, independent of any one tour's content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RuntimeSettings {
    pub placement: PlacementConfig,
    pub measure: MeasurePolicy,
    pub scroll: AutoScrollConfig,
}

impl RuntimeSettings {
    #[must_use]
    pub fn placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn measure(mut self, measure: MeasurePolicy) -> Self {
        self.measure = measure;
        self
    }

    #[must_use]
    pub fn scroll(mut self, scroll: AutoScrollConfig) -> Self {
        self.scroll = scroll;
        self
    }

    /// Read every `WAYFINDER_*` override from the process environment.
    #[must_use]
    pub fn from_env() -> (RuntimeSettings, Vec<ConfigError>) {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read overrides through a custom lookup, collecting all diagnostics.
    #[must_use]
    pub fn from_env_with<F>(mut get: F) -> (RuntimeSettings, Vec<ConfigError>)
    where
        F: FnMut(&str) -> Option<String>,
    {
        let placement = PlacementConfig::from_env_with(&mut get);
        let (measure, measure_errors) = MeasurePolicy::from_env_with(&mut get);
        let (scroll, scroll_errors) = AutoScrollConfig::from_env_with(&mut get);

        let mut errors = placement.errors;
        errors.extend(measure_errors);
        errors.extend(scroll_errors);

        (
            RuntimeSettings {
                placement: placement.config,
                measure,
                scroll,
            },
            errors,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_steps() -> TourConfig {
        TourConfig::new()
            .step(TourStep::new("a"))
            .step(TourStep::new("b"))
            .step(TourStep::new("c"))
    }

    // ── Defaults ────────────────────────────────────────────────────────

    #[test]
    fn defaults_match_documented_values() {
        let config = TourConfig::default();
        assert!(config.show_buttons);
        assert!(config.show_progress);
        assert!(config.allow_close);
        assert!(config.animate);
        assert_eq!(config.overlay_color, "rgba(0, 0, 0, 0.75)");
        assert_eq!(config.spotlight_defaults(), SpotlightSpec::new(8.0, 8.0));
    }

    #[test]
    fn step_index_lookup() {
        let config = three_steps();
        assert_eq!(config.step_index("b"), Some(1));
        assert_eq!(config.step_index("zz"), None);
    }

    #[test]
    fn style_overrides_are_kept_in_order() {
        let config = TourConfig::new()
            .popover_style("background", "#fff")
            .popover_style("radius", "12");
        assert_eq!(
            config.popover_style,
            vec![
                ("background".to_string(), "#fff".to_string()),
                ("radius".to_string(), "12".to_string()),
            ]
        );
    }

    // ── Validation ──────────────────────────────────────────────────────

    #[test]
    fn valid_config_passes() {
        assert!(three_steps().validate().is_ok());
        assert!(TourConfig::new().validate().is_ok());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let config = three_steps().step(TourStep::new("b"));
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].value, "b");
        assert_eq!(errors[0].message, "duplicate step id");
    }

    #[test]
    fn empty_id_rejected() {
        let errors = TourConfig::new()
            .step(TourStep::new(""))
            .validate()
            .unwrap_err();
        assert_eq!(errors[0].value, "#0");
    }

    #[test]
    fn negative_or_nan_spacing_rejected() {
        let errors = TourConfig::new()
            .default_padding(-1.0)
            .step(TourStep::new("a").corner_radius(f32::NAN))
            .validate()
            .unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["default_padding", "step.corner_radius"]);
    }

    // ── Settings ────────────────────────────────────────────────────────

    #[test]
    fn settings_aggregate_all_sources() {
        let (settings, errors) = RuntimeSettings::from_env_with(|key| match key {
            "WAYFINDER_SPACING" => Some("24".into()),
            "WAYFINDER_MEASURE_MAX_ATTEMPTS" => Some("3".into()),
            "WAYFINDER_SCROLL_ENABLED" => Some("false".into()),
            "WAYFINDER_MIN_SPACE" => Some("lots".into()),
            _ => None,
        });
        assert_eq!(settings.placement.spacing, 24.0);
        assert_eq!(settings.measure.max_attempts, 3);
        assert!(!settings.scroll.enabled);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "min_space");
    }

    #[test]
    fn empty_env_gives_defaults() {
        let (settings, errors) = RuntimeSettings::from_env_with(|_| None);
        assert_eq!(settings, RuntimeSettings::default());
        assert!(errors.is_empty());
    }
}
