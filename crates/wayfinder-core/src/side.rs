#![forbid(unsafe_code)]

//! Placement sides for the popover relative to its anchor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the anchor the popover sits on.
///
/// `Center` ignores the anchor entirely and centers the popover in the
/// viewport, whether or not the step has an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
    Center,
}

/// Layout axis a side lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Side {
    /// All sides, in declaration order.
    pub const ALL: [Side; 5] = [
        Side::Top,
        Side::Bottom,
        Side::Left,
        Side::Right,
        Side::Center,
    ];

    /// The side a popover flips to. Flipping stays on one axis.
    #[must_use]
    pub const fn opposite(self) -> Side {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Center => Self::Center,
        }
    }

    /// Main axis the popover is offset along, `None` for `Center`.
    #[must_use]
    pub const fn axis(self) -> Option<Axis> {
        match self {
            Self::Top | Self::Bottom => Some(Axis::Vertical),
            Self::Left | Self::Right => Some(Axis::Horizontal),
            Self::Center => None,
        }
    }

    /// Parse a side name (case-insensitive). Accepts the CSS-ish aliases
    /// `above`/`below`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" | "above" => Some(Self::Top),
            "bottom" | "below" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "center" | "centre" => Some(Self::Center),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
