#![forbid(unsafe_code)]

//! Sample onboarding tour and the scripted timelines that drive it.

use std::fmt;

use wayfinder::{Side, Size, TourAction, TourConfig, TourStep};

use crate::host::{COMPOSE, FEED_CARD, PROFILE_TAB, SEARCH, SimHost};

/// A scripted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Next through every step until completion.
    Walkthrough,
    /// Elements answer late and one disappears before its step.
    Flaky,
    /// The device rotates while a step is showing.
    Rotate,
    /// The user dismisses the tour by tapping the overlay.
    Skip,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Walkthrough,
        Scenario::Flaky,
        Scenario::Rotate,
        Scenario::Skip,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Walkthrough => "walkthrough",
            Self::Flaky => "flaky",
            Self::Rotate => "rotate",
            Self::Skip => "skip",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(value))
    }

    /// How many requests each element answers with an empty rectangle
    /// before its layout settles.
    #[must_use]
    pub fn unsettled_requests(self) -> u32 {
        match self {
            Self::Flaky => 3,
            _ => 0,
        }
    }

    /// Timeline of host-side events, ordered by time.
    #[must_use]
    pub fn script(self, viewport: Size) -> Vec<Cue> {
        let next = |at_ms| Cue::new(at_ms, CueAction::Press(TourAction::Next));
        let mut cues = vec![Cue::new(0, CueAction::Start)];
        match self {
            Self::Walkthrough => {
                cues.extend((1..=STEP_COUNT as u64).map(|k| next(k * STEP_MS)));
            }
            Self::Flaky => {
                // Retries on the vanished element run to exhaustion, so that
                // step is given longer.
                cues.extend([
                    next(1500),
                    next(3000),
                    next(4500),
                    Cue::new(5000, CueAction::Remove(COMPOSE)),
                    next(6000),
                    next(12_000),
                    next(13_500),
                ]);
            }
            Self::Rotate => {
                let rotated = Size::new(viewport.height, viewport.width);
                cues.extend((1..=STEP_COUNT as u64).map(|k| next(k * STEP_MS)));
                cues.push(Cue::new(3 * STEP_MS - 300, CueAction::Resize(rotated)));
            }
            Self::Skip => {
                cues.extend([
                    next(STEP_MS),
                    next(2 * STEP_MS),
                    Cue::new(3 * STEP_MS, CueAction::Press(TourAction::OverlayPress)),
                ]);
            }
        }
        cues.sort_by_key(|cue| cue.at_ms);
        cues
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Time between scripted presses.
const STEP_MS: u64 = 600;

/// Steps in [`onboarding_tour`].
pub const STEP_COUNT: usize = 6;

/// Something the simulated user or device does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CueAction {
    Start,
    Press(TourAction),
    Resize(Size),
    Remove(&'static str),
}

/// A [`CueAction`] at a point on the simulated clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub at_ms: u64,
    pub action: CueAction,
}

impl Cue {
    #[must_use]
    pub fn new(at_ms: u64, action: CueAction) -> Self {
        Self { at_ms, action }
    }
}

/// A first-run tour over the host's sample layout.
#[must_use]
pub fn onboarding_tour(host: &SimHost) -> TourConfig {
    TourConfig::new()
        .step(
            TourStep::new("welcome")
                .title("Welcome aboard")
                .text("A quick look around. Tap Next to continue.")
                .side(Side::Center),
        )
        .step(
            TourStep::new("search")
                .title("Search")
                .text("Find people, posts and topics.")
                .anchor(host.anchor(SEARCH))
                .side(Side::Bottom),
        )
        .step(
            TourStep::new("feed")
                .title("Your feed")
                .text("New posts from people you follow land here.")
                .anchor(host.anchor(FEED_CARD))
                .side(Side::Top)
                .corner_radius(12.0),
        )
        .step(
            TourStep::new("profile")
                .title("Profile")
                .text("Settings and saved posts live behind this tab.")
                .anchor(host.anchor(PROFILE_TAB))
                .side(Side::Bottom)
                .padding(4.0),
        )
        .step(
            TourStep::new("compose")
                .title("Write something")
                .text("Start a new post from anywhere.")
                .anchor(host.anchor(COMPOSE))
                .side(Side::Left)
                .corner_radius(28.0),
        )
        .step(
            TourStep::new("done")
                .title("You're all set")
                .side(Side::Center),
        )
        .popover_style("max-width", "280px")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: Size = Size::new(375.0, 812.0);

    #[test]
    fn names_round_trip_through_parse() {
        for scenario in Scenario::ALL {
            assert_eq!(Scenario::parse(scenario.name()), Some(scenario));
            assert_eq!(scenario.to_string(), scenario.name());
        }
        assert_eq!(Scenario::parse(" Rotate "), Some(Scenario::Rotate));
        assert_eq!(Scenario::parse("teleport"), None);
    }

    #[test]
    fn tour_has_expected_steps() {
        let host = SimHost::new(PHONE, 0);
        let config = onboarding_tour(&host);
        assert_eq!(config.steps.len(), STEP_COUNT);
        assert!(config.validate().is_ok());
        assert!(config.steps[0].is_centered());
        assert!(config.steps[STEP_COUNT - 1].is_centered());
    }

    #[test]
    fn scripts_start_first_and_are_sorted() {
        for scenario in Scenario::ALL {
            let cues = scenario.script(PHONE);
            assert_eq!(cues[0].action, CueAction::Start, "{scenario}");
            assert!(cues.windows(2).all(|w| w[0].at_ms <= w[1].at_ms), "{scenario}");
        }
    }

    #[test]
    fn walkthrough_presses_next_once_per_step() {
        let presses = Scenario::Walkthrough
            .script(PHONE)
            .iter()
            .filter(|cue| cue.action == CueAction::Press(TourAction::Next))
            .count();
        assert_eq!(presses, STEP_COUNT);
    }

    #[test]
    fn rotate_swaps_viewport_axes() {
        let resize = Scenario::Rotate
            .script(PHONE)
            .into_iter()
            .find_map(|cue| match cue.action {
                CueAction::Resize(size) => Some(size),
                _ => None,
            });
        assert_eq!(resize, Some(Size::new(812.0, 375.0)));
    }
}
