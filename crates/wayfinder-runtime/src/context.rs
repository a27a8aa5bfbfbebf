#![forbid(unsafe_code)]

//! Explicit tour injection for deep UI trees.
//!
//! Components that render tour UI take a [`TourContext`] from their parent
//! instead of reaching for a global. Asking an empty context for its tour is
//! a programming error reported as [`TourError::MissingContext`], never a
//! silent `None`.

use crate::error::TourError;
use crate::runtime::Tour;

/// Carrier for an optional [`Tour`] handle.
#[derive(Debug, Clone, Default)]
pub struct TourContext {
    tour: Option<Tour>,
}

impl TourContext {
    /// A context with no tour. Lookups fail with `MissingContext`.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A context providing `tour` to everything below it.
    #[must_use]
    pub fn provide(tour: Tour) -> Self {
        Self { tour: Some(tour) }
    }

    /// The provided tour.
    pub fn tour(&self) -> Result<&Tour, TourError> {
        self.tour.as_ref().ok_or(TourError::MissingContext)
    }

    /// An owned handle to the provided tour.
    pub fn tour_handle(&self) -> Result<Tour, TourError> {
        self.tour().cloned()
    }

    #[must_use]
    pub fn is_provided(&self) -> bool {
        self.tour.is_some()
    }
}

impl From<Tour> for TourContext {
    fn from(tour: Tour) -> Self {
        Self::provide(tour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TourConfig, TourStep};
    use wayfinder_core::Size;

    fn tour() -> Tour {
        Tour::new(
            TourConfig::new().step(TourStep::new("a")),
            Size::new(375.0, 812.0),
        )
        .unwrap()
    }

    #[test]
    fn empty_context_errors_loudly() {
        let ctx = TourContext::empty();
        assert!(!ctx.is_provided());
        assert_eq!(ctx.tour().unwrap_err(), TourError::MissingContext);
        assert!(ctx.tour_handle().is_err());
    }

    #[test]
    fn provided_context_shares_the_same_tour() {
        let tour = tour();
        let ctx = TourContext::provide(tour.clone());
        let seen = ctx.tour().unwrap();
        assert!(seen.ptr_eq(&tour));
        seen.start();
        assert!(tour.is_active());
    }

    #[test]
    fn context_clones_share_state() {
        let ctx = TourContext::from(tour());
        let child = ctx.clone();
        ctx.tour().unwrap().start();
        assert!(child.tour().unwrap().is_active());
    }
}
