#![forbid(unsafe_code)]

//! Non-owning handles to host elements a step can highlight.
//!
//! A step never keeps its element alive. The host owns the element (behind an
//! `Rc`) and the tour holds a [`Weak`] to it. When the element is dropped the
//! anchor goes dead and the next measurement attempt counts as a failure.

use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::measure::MeasureTicket;

/// The host-side capability to measure an element.
///
/// Implementations should answer asynchronously by calling
/// [`Tour::on_measured`](crate::Tour::on_measured) or
/// [`Tour::on_measure_failed`](crate::Tour::on_measure_failed) with the same
/// ticket, in viewport coordinates. Calling back synchronously from inside
/// `request_measure` is allowed.
pub trait Measurable {
    fn request_measure(&self, ticket: MeasureTicket);
}

/// Weak reference to a [`Measurable`] element.
#[derive(Clone)]
pub struct Anchor(Weak<dyn Measurable>);

impl Anchor {
    /// Anchor to an element the host owns.
    #[must_use]
    pub fn new<T: Measurable + 'static>(target: &Rc<T>) -> Self {
        let weak: Weak<dyn Measurable> = Rc::downgrade(target) as Weak<dyn Measurable>;
        Self(weak)
    }

    /// Anchor to an already type-erased element.
    #[must_use]
    pub fn from_dyn(target: &Rc<dyn Measurable>) -> Self {
        Self(Rc::downgrade(target))
    }

    /// An anchor that is already dead. Useful in tests.
    #[must_use]
    pub fn dangling() -> Self {
        Self(Weak::<Dangling>::new() as Weak<dyn Measurable>)
    }

    /// Whether the element is still alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Ask the element to measure itself. Returns `false` if it is gone.
    pub fn request(&self, ticket: MeasureTicket) -> bool {
        match self.0.upgrade() {
            Some(target) => {
                target.request_measure(ticket);
                true
            }
            None => false,
        }
    }

    /// Whether both anchors point at the same element.
    #[must_use]
    pub fn same_target(&self, other: &Anchor) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Anchor")
            .field("alive", &self.is_alive())
            .finish()
    }
}

struct Dangling;

impl Measurable for Dangling {
    fn request_measure(&self, _ticket: MeasureTicket) {}
}

/// Late anchor bindings by step id.
///
/// Elements often mount after the tour is configured. The host registers
/// them here; a registry binding takes precedence over the anchor given on
/// the step itself.
#[derive(Debug, Clone, Default)]
pub struct AnchorRegistry {
    bindings: HashMap<String, Anchor>,
}

impl AnchorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `anchor` to `step_id`, returning the previous binding.
    pub fn bind(&mut self, step_id: impl Into<String>, anchor: Anchor) -> Option<Anchor> {
        self.bindings.insert(step_id.into(), anchor)
    }

    /// Remove the binding for `step_id`.
    pub fn unbind(&mut self, step_id: &str) -> Option<Anchor> {
        self.bindings.remove(step_id)
    }

    #[must_use]
    pub fn get(&self, step_id: &str) -> Option<&Anchor> {
        self.bindings.get(step_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Drop bindings whose elements are gone.
    pub fn prune(&mut self) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|_, anchor| anchor.is_alive());
        before - self.bindings.len()
    }
}
