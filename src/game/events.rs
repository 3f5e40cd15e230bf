//! Session Events
//!
//! Notifications generated by transitions, consumed by render sinks and
//! one-shot collaborators (haptics, audio). The session has a single writer
//! and a single logical timeline, so events carry no ordering metadata:
//! arrival order is the order things happened.

use serde::{Deserialize, Serialize};

use crate::game::state::{Half, PlayRecord, TeamSlot};

/// A notification emitted by a session transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// The game left the setup phase.
    GameStarted,

    /// The session returned to the setup phase.
    GameReset,

    /// A play was recorded at the head of the log.
    PlayRecorded {
        /// The record appended to the log.
        record: PlayRecord,
        /// Credited team's score after the play.
        new_score: u32,
    },

    /// The most recent play was taken back.
    PlayUndone {
        /// The record removed from the log.
        record: PlayRecord,
        /// Credited team's score after the deduction.
        new_score: u32,
    },

    /// The bat changed hands.
    SidesSwitched {
        /// Inning now in progress.
        inning: u32,
        /// Half now in progress.
        half: Half,
        /// Slot now at bat.
        batting_slot: TeamSlot,
    },

    /// The countdown was started or paused by the operator.
    TimerToggled {
        /// Whether the countdown is now live.
        running: bool,
    },

    /// The countdown was rewound to the full duration.
    TimerReset,

    /// The countdown hit zero. Emitted exactly once per expiry, at the
    /// 1 → 0 transition; haptic/audio feedback keys off this.
    TimerExpired {
        /// Inning the clock ran out in.
        inning: u32,
        /// Half the clock ran out in.
        half: Half,
    },
}

impl GameEvent {
    /// Whether this is the one-shot expiry signal.
    pub fn is_expiry(&self) -> bool {
        matches!(self, GameEvent::TimerExpired { .. })
    }
}
