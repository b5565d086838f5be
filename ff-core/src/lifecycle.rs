//! Run lifecycle and the user-facing status line.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mode of the current run.
///
/// ```text
/// Idle ──start──▶ Playing ──impact──▶ Bouncing ──settle──▶ Settled
///                    │
///                    └──samples exhausted──▶ Complete
/// ```
///
/// `reset` returns to `Idle` from any state. `Settled` and `Complete` stay
/// put until the next start or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RunLifecycle {
    #[default]
    Idle,
    Playing,
    Bouncing,
    Settled,
    Complete,
}

impl RunLifecycle {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunLifecycle::Settled | RunLifecycle::Complete)
    }

    /// Whether the transition `self -> next` is one the state machine makes.
    /// Resetting to `Idle` is always allowed.
    pub fn can_transition_to(&self, next: RunLifecycle) -> bool {
        use RunLifecycle::*;
        matches!(
            (self, next),
            (_, Idle)
                | (Idle, Playing)
                | (Settled, Playing)
                | (Complete, Playing)
                | (Playing, Bouncing)
                | (Playing, Complete)
                | (Bouncing, Settled)
        )
    }
}

impl fmt::Display for RunLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunLifecycle::Idle => "idle",
            RunLifecycle::Playing => "playing",
            RunLifecycle::Bouncing => "bouncing",
            RunLifecycle::Settled => "settled",
            RunLifecycle::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Status text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Loading,
    Ready,
    Running,
    Playing,
    Impact,
    Settled,
    Complete,
    Error(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Loading => f.write_str("Loading simulation engine..."),
            Status::Ready => f.write_str("Ready"),
            Status::Running => f.write_str("Running simulation..."),
            Status::Playing => f.write_str("Playing..."),
            Status::Impact => f.write_str("Impact"),
            Status::Settled => f.write_str("Settled"),
            Status::Complete => f.write_str("Complete"),
            Status::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}
