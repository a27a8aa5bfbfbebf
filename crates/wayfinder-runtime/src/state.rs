#![forbid(unsafe_code)]

//! Pure tour state machine.
//!
//! Knows nothing about callbacks, anchors or time. Every transition mutates
//! the state and returns the ordered [`TourEvent`]s the caller must dispatch.
//! An empty [`Transition`] means the call was a no-op.
//!
//! # Invariants
//!
//! 1. While active, `current_step_index() < total_steps()`.
//! 2. While inactive, `current_step_index() == 0`.
//! 3. A tour with zero steps is never active.
//! 4. Every `StepShown { i }` is eventually matched by exactly one
//!    `StepHidden { i }` before the next `StepShown`, except across a restart
//!    via `start()` while already active.
//! 5. Invalid transitions produce no events and leave the state untouched.
//!
//! # Transitions
//!
//! | Call            | From          | To            | Events                          |
//! |-----------------|---------------|---------------|---------------------------------|
//! | `start`         | any, N > 0    | Active(0)     | Started, StepShown(0)           |
//! | `stop`          | Active(i)     | Inactive      | StepHidden(i), Skipped          |
//! | `next`          | Active(i<N-1) | Active(i+1)   | StepHidden(i), StepShown(i+1)   |
//! | `next`          | Active(N-1)   | Inactive      | StepHidden(N-1), Completed      |
//! | `previous`      | Active(i>0)   | Active(i-1)   | StepHidden(i), StepShown(i-1)   |
//! | `go_to_step(j)` | any, j < N    | Active(j)     | [StepHidden(i)], StepShown(j)   |

use serde::{Deserialize, Serialize};

/// Navigation input from the popover or overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TourAction {
    /// "Next" / "Done" button.
    Next,
    /// "Previous" button.
    Previous,
    /// Close button on the popover.
    Close,
    /// Press on the dimmed overlay outside the cutout.
    OverlayPress,
}

/// Lifecycle events, in the order callbacks must fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TourEvent {
    Started,
    StepShown { index: usize },
    StepHidden { index: usize },
    Completed,
    Skipped,
}

/// Ordered events produced by one transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    events: Vec<TourEvent>,
}

impl Transition {
    fn none() -> Self {
        Self::default()
    }

    fn of(events: &[TourEvent]) -> Self {
        Self {
            events: events.to_vec(),
        }
    }

    /// Whether the call changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn events(&self) -> &[TourEvent] {
        &self.events
    }

    /// The step shown by this transition, if any.
    #[must_use]
    pub fn shown_step(&self) -> Option<usize> {
        self.events.iter().rev().find_map(|e| match e {
            TourEvent::StepShown { index } => Some(*index),
            _ => None,
        })
    }

    /// Whether the tour ended (completed or skipped).
    #[must_use]
    pub fn ended(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TourEvent::Completed | TourEvent::Skipped))
    }
}

impl IntoIterator for Transition {
    type Item = TourEvent;
    type IntoIter = std::vec::IntoIter<TourEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

/// Active/inactive flag plus current index for a fixed-length tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourState {
    total: usize,
    active: bool,
    current: usize,
}

impl TourState {
    /// Create an inactive state for a tour of `total` steps.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            active: false,
            current: 0,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn current_step_index(&self) -> usize {
        self.current
    }

    /// Current index while active.
    #[must_use]
    pub fn active_step(&self) -> Option<usize> {
        self.active.then_some(self.current)
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total
    }

    /// Progress as `(1-based current, total)`; `(0, total)` when inactive.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        if self.active {
            (self.current + 1, self.total)
        } else {
            (0, self.total)
        }
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.active && self.current + 1 == self.total
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.active && self.current > 0
    }

    /// Start (or restart) at step 0.
    pub fn start(&mut self) -> Transition {
        if self.total == 0 {
            return Transition::none();
        }
        self.active = true;
        self.current = 0;
        Transition::of(&[TourEvent::Started, TourEvent::StepShown { index: 0 }])
    }

    /// Abort the tour. No-op while inactive.
    pub fn stop(&mut self) -> Transition {
        let Some(i) = self.active_step() else {
            return Transition::none();
        };
        self.deactivate();
        Transition::of(&[TourEvent::StepHidden { index: i }, TourEvent::Skipped])
    }

    /// Advance, completing the tour after the last step.
    pub fn next(&mut self) -> Transition {
        let Some(i) = self.active_step() else {
            return Transition::none();
        };
        if i + 1 < self.total {
            self.current = i + 1;
            Transition::of(&[
                TourEvent::StepHidden { index: i },
                TourEvent::StepShown { index: i + 1 },
            ])
        } else {
            self.deactivate();
            Transition::of(&[TourEvent::StepHidden { index: i }, TourEvent::Completed])
        }
    }

    /// Go back one step. No-op on the first step.
    pub fn previous(&mut self) -> Transition {
        match self.active_step() {
            Some(i) if i > 0 => {
                self.current = i - 1;
                Transition::of(&[
                    TourEvent::StepHidden { index: i },
                    TourEvent::StepShown { index: i - 1 },
                ])
            }
            _ => Transition::none(),
        }
    }

    /// Jump to `index`, activating the tour if needed. Out of range is a
    /// no-op.
    pub fn go_to_step(&mut self, index: usize) -> Transition {
        if index >= self.total {
            return Transition::none();
        }
        let hidden = self.active_step();
        self.active = true;
        self.current = index;
        match hidden {
            Some(i) => Transition::of(&[
                TourEvent::StepHidden { index: i },
                TourEvent::StepShown { index },
            ]),
            None => Transition::of(&[TourEvent::StepShown { index }]),
        }
    }

    /// Dispatch a user action. Close and overlay presses only end the tour
    /// when `allow_close` is set.
    pub fn handle_action(&mut self, action: TourAction, allow_close: bool) -> Transition {
        match action {
            TourAction::Next => self.next(),
            TourAction::Previous => self.previous(),
            TourAction::Close | TourAction::OverlayPress if allow_close => self.stop(),
            TourAction::Close | TourAction::OverlayPress => Transition::none(),
        }
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.current = 0;
    }
}
