#![forbid(unsafe_code)]

//! Scroll offset needed to bring a tour anchor into view.
//!
//! The host measures the anchor relative to its scroll container's content
//! (not the viewport) and scrolls to the returned offset, leaving
//! `top_padding` of breathing room above the element.

use std::env;

use serde::{Deserialize, Serialize};
use wayfinder_core::env::{apply, parse_bool, parse_f32, validate_non_negative};
use wayfinder_core::{ConfigError, Rect};

const ENV_SCROLL_TOP_PADDING: &str = "WAYFINDER_SCROLL_TOP_PADDING";
const ENV_SCROLL_ANIMATED: &str = "WAYFINDER_SCROLL_ANIMATED";
const ENV_SCROLL_ENABLED: &str = "WAYFINDER_SCROLL_ENABLED";

/// Auto-scroll behaviour.
///
/// # Environment Variables
/// - `WAYFINDER_SCROLL_TOP_PADDING` (float >= 0)
/// - `WAYFINDER_SCROLL_ANIMATED` (bool)
/// - `WAYFINDER_SCROLL_ENABLED` (bool)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoScrollConfig {
    pub top_padding: f32,
    pub animated: bool,
    pub enabled: bool,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            top_padding: 100.0,
            animated: true,
            enabled: true,
        }
    }
}

impl AutoScrollConfig {
    #[must_use]
    pub fn top_padding(mut self, padding: f32) -> Self {
        self.top_padding = padding;
        self
    }

    #[must_use]
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> (AutoScrollConfig, Vec<ConfigError>) {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Parse config through a custom lookup, returning diagnostics.
    #[must_use]
    pub fn from_env_with<F>(mut get: F) -> (AutoScrollConfig, Vec<ConfigError>)
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = AutoScrollConfig::default();
        let mut errors = Vec::new();

        apply(
            &mut get,
            ENV_SCROLL_TOP_PADDING,
            "scroll_top_padding",
            "expected number",
            parse_f32,
            &mut config.top_padding,
            &mut errors,
        );
        apply(
            &mut get,
            ENV_SCROLL_ANIMATED,
            "scroll_animated",
            "expected bool (1/0/true/false)",
            parse_bool,
            &mut config.animated,
            &mut errors,
        );
        apply(
            &mut get,
            ENV_SCROLL_ENABLED,
            "scroll_enabled",
            "expected bool (1/0/true/false)",
            parse_bool,
            &mut config.enabled,
            &mut errors,
        );

        let mut violations = Vec::new();
        validate_non_negative("scroll_top_padding", config.top_padding, &mut violations);
        if !violations.is_empty() {
            config.top_padding = AutoScrollConfig::default().top_padding;
            errors.extend(violations);
        }

        (config, errors)
    }
}

/// A scroll the host should perform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRequest {
    /// Target content offset along the scroll axis.
    pub offset: f32,
    pub animated: bool,
}

impl ScrollRequest {
    /// Scroll request for an anchor measured in content coordinates.
    ///
    /// Returns `None` when auto-scroll is disabled.
    #[must_use]
    pub fn for_anchor(anchor_in_content: Rect, config: &AutoScrollConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        Some(Self {
            offset: scroll_offset(anchor_in_content.y, config.top_padding),
            animated: config.animated,
        })
    }
}

/// `max(0, anchor_top - top_padding)`.
#[inline]
#[must_use]
pub fn scroll_offset(anchor_top: f32, top_padding: f32) -> f32 {
    (anchor_top - top_padding).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_leaves_top_padding() {
        assert_eq!(scroll_offset(900.0, 100.0), 800.0);
    }

    #[test]
    fn offset_never_negative() {
        assert_eq!(scroll_offset(40.0, 100.0), 0.0);
        assert_eq!(scroll_offset(-20.0, 0.0), 0.0);
    }

    #[test]
    fn request_uses_config() {
        let config = AutoScrollConfig::default().top_padding(150.0).animated(false);
        let req = ScrollRequest::for_anchor(Rect::new(0.0, 1000.0, 10.0, 10.0), &config).unwrap();
        assert_eq!(req.offset, 850.0);
        assert!(!req.animated);
    }

    #[test]
    fn disabled_yields_no_request() {
        let config = AutoScrollConfig::default().enabled(false);
        assert!(ScrollRequest::for_anchor(Rect::new(0.0, 1000.0, 10.0, 10.0), &config).is_none());
    }

    #[test]
    fn env_overrides_and_diagnostics() {
        let (config, errors) = AutoScrollConfig::from_env_with(|key| match key {
            ENV_SCROLL_TOP_PADDING => Some("-5".into()),
            ENV_SCROLL_ANIMATED => Some("off".into()),
            ENV_SCROLL_ENABLED => Some("perhaps".into()),
            _ => None,
        });
        assert_eq!(config.top_padding, 100.0);
        assert!(!config.animated);
        assert!(config.enabled);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["scroll_enabled", "scroll_top_padding"]);
    }
}
