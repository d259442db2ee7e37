//! Presentation States
//!
//! The lifecycle of a hosted panel. A panel starts `Initial`, animates into
//! `Visible`, animates out into `Complete`, and ends `Void` when the
//! container is torn down.
//!
//! ```text
//!   Initial ──enter──▶ Visible ──exit──▶ Complete
//!      │                  ▲                  │
//!      │                  │ enter            │ destroy
//!      └────destroy──▶  Void  ◀──────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// Lifecycle state of a hosted panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationState {
    /// Content not yet visible
    #[default]
    Initial,
    /// Entrance animation target
    Visible,
    /// Exit animation target
    Complete,
    /// Terminal: the container was destroyed or the panel was dismissed
    /// before it was ever shown
    Void,
}

impl PresentationState {
    /// Lowercase state name, as used in animation engine requests
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Visible => "visible",
            Self::Complete => "complete",
            Self::Void => "void",
        }
    }

    /// Whether reaching this state concludes the exit phase
    #[must_use]
    pub fn is_exit_target(self) -> bool {
        matches!(self, Self::Complete | Self::Void)
    }

    /// Whether the lifecycle allows moving from `self` to `next`
    ///
    /// Staying in the same state is always allowed. `Void` is reachable from
    /// anywhere because destruction can happen at any time.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Self::Initial | Self::Void, Self::Visible)
                | (Self::Visible, Self::Complete)
                | (_, Self::Void)
        )
    }
}

impl std::fmt::Display for PresentationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Completion report emitted by an animation engine
///
/// `did_finish` is false when the engine abandoned the transition before it
/// ran to the end. The state machine treats both outcomes as "the transition
/// concluded".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    /// State the transition started from
    pub from: PresentationState,
    /// State the transition moved to
    pub to: PresentationState,
    /// Whether the animation ran to completion
    pub did_finish: bool,
}

impl TransitionEvent {
    /// A transition that ran to completion
    #[must_use]
    pub fn finished(from: PresentationState, to: PresentationState) -> Self {
        Self {
            from,
            to,
            did_finish: true,
        }
    }

    /// A transition the engine gave up on
    #[must_use]
    pub fn interrupted(from: PresentationState, to: PresentationState) -> Self {
        Self {
            from,
            to,
            did_finish: false,
        }
    }
}
