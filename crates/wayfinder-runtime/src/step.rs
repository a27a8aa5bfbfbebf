#![forbid(unsafe_code)]

//! A single step of a guided tour.

use std::fmt;
use std::rc::Rc;

use wayfinder_core::Side;
use wayfinder_layout::SpotlightSpec;

use crate::anchor::Anchor;
use crate::runtime::Tour;

/// Lifecycle callback. Receives the tour handle so it can drive navigation
/// (reentrant calls observe the already-committed state).
pub type Callback = Rc<dyn Fn(&Tour)>;

/// One step: what to say, what to highlight, where to put the popover.
#[derive(Clone)]
pub struct TourStep {
    /// Unique within a tour. Also the key for late anchor binding.
    pub id: String,
    pub title: String,
    pub text: String,
    /// Element to highlight. `None` centers the popover.
    pub anchor: Option<Anchor>,
    pub preferred_side: Side,
    /// Spotlight padding override; falls back to the tour default.
    pub padding: Option<f32>,
    /// Spotlight corner radius override; falls back to the tour default.
    pub corner_radius: Option<f32>,
    pub on_show: Option<Callback>,
    pub on_hide: Option<Callback>,
}

impl TourStep {
    /// Create a step with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            text: String::new(),
            anchor: None,
            preferred_side: Side::default(),
            padding: None,
            corner_radius: None,
            on_show: None,
            on_hide: None,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    #[must_use]
    pub fn side(mut self, side: Side) -> Self {
        self.preferred_side = side;
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = Some(padding);
        self
    }

    #[must_use]
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    #[must_use]
    pub fn on_show(mut self, f: impl Fn(&Tour) + 'static) -> Self {
        self.on_show = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_hide(mut self, f: impl Fn(&Tour) + 'static) -> Self {
        self.on_hide = Some(Rc::new(f));
        self
    }

    /// Spotlight styling with tour-level defaults filled in.
    #[must_use]
    pub fn spotlight_spec(&self, defaults: SpotlightSpec) -> SpotlightSpec {
        SpotlightSpec::new(
            self.padding.unwrap_or(defaults.padding),
            self.corner_radius.unwrap_or(defaults.corner_radius),
        )
    }

    /// Whether this step wants a spotlight at all.
    #[must_use]
    pub fn is_centered(&self) -> bool {
        self.preferred_side == Side::Center
    }
}

impl fmt::Debug for TourStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourStep")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("anchor", &self.anchor)
            .field("preferred_side", &self.preferred_side)
            .field("padding", &self.padding)
            .field("corner_radius", &self.corner_radius)
            .field("on_show", &self.on_show.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let step = TourStep::new("search")
            .title("Search")
            .text("Find anything.")
            .side(Side::Top)
            .padding(4.0);
        assert_eq!(step.id, "search");
        assert_eq!(step.title, "Search");
        assert_eq!(step.text, "Find anything.");
        assert_eq!(step.preferred_side, Side::Top);
        assert_eq!(step.padding, Some(4.0));
        assert!(step.anchor.is_none());
        assert!(step.on_show.is_none());
    }

    #[test]
    fn default_side_is_bottom() {
        assert_eq!(TourStep::new("a").preferred_side, Side::Bottom);
    }

    #[test]
    fn spotlight_spec_falls_back_to_defaults() {
        let defaults = SpotlightSpec::new(8.0, 8.0);
        let plain = TourStep::new("a");
        assert_eq!(plain.spotlight_spec(defaults), defaults);
        let custom = TourStep::new("b").padding(2.0);
        assert_eq!(custom.spotlight_spec(defaults), SpotlightSpec::new(2.0, 8.0));
    }

    #[test]
    fn debug_hides_callbacks() {
        let step = TourStep::new("a").on_show(|_| {});
        let dbg = format!("{step:?}");
        assert!(dbg.contains("on_show: true"));
        assert!(dbg.contains("on_hide: false"));
    }
}
