//! Session State Definitions
//!
//! The scorekeeping session state and its operator command transitions.
//! Every transition is total: an action that is not legal in the current
//! state degrades to a no-op instead of signaling failure.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::game::events::GameEvent;
use crate::game::play::{PlayCategory, PlayKind};
use crate::TIMER_DURATION;

// =============================================================================
// TEAM SLOT
// =============================================================================

/// Fixed team identity for the lifetime of a session.
///
/// Teams are always addressed by slot, never by name: names are mutable and
/// not unique.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[derive(Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamSlot {
    /// First slot; bats first.
    #[default]
    A = 0,
    /// Second slot; fields first.
    B = 1,
}

impl TeamSlot {
    /// The opposite slot.
    #[inline]
    pub fn other(self) -> TeamSlot {
        match self {
            TeamSlot::A => TeamSlot::B,
            TeamSlot::B => TeamSlot::A,
        }
    }
}

// =============================================================================
// HALF-INNING
// =============================================================================

/// Half-inning marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[derive(Default)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    /// Top of the inning; slot A bats in a fresh game.
    #[default]
    Top = 0,
    /// Bottom of the inning.
    Bottom = 1,
}

impl Half {
    /// The other half.
    #[inline]
    pub fn flip(self) -> Half {
        match self {
            Half::Top => Half::Bottom,
            Half::Bottom => Half::Top,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Half::Top => "Top",
            Half::Bottom => "Bottom",
        }
    }
}

// =============================================================================
// TEAM
// =============================================================================

/// One team's record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Display name. Editable at any time, preserved across game resets.
    pub name: String,

    /// Accumulated points. Never below zero: undo clamps.
    pub score: u32,
}

impl Team {
    /// Create a team with a zero score.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
        }
    }
}

// =============================================================================
// PLAY RECORD
// =============================================================================

/// One entry in the play log. Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// Unique id, monotonic within the session.
    pub id: u64,

    /// Inning the play happened in.
    pub inning: u32,

    /// Half-inning the play happened in.
    pub half: Half,

    /// Slot of the team the play credited.
    pub team_slot: TeamSlot,

    /// Which play it was.
    pub kind: PlayKind,

    /// Points awarded, captured at record time.
    pub points: u32,

    /// Side of the ball the play credited.
    pub category: PlayCategory,

    /// Countdown seconds remaining when the play was recorded. Later timer
    /// ticks never alter this.
    pub time_remaining: u32,
}

impl PlayRecord {
    /// Display label of the recorded play.
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

// =============================================================================
// SESSION PHASE
// =============================================================================

/// Macro-state of the session, derived from `started`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Pre-game configuration: team names editable, no plays accepted.
    Setup,
    /// Live game: plays, timer and side switches accepted.
    Active,
}

// =============================================================================
// GAME SESSION
// =============================================================================

/// Complete state of one scorekeeping session.
///
/// A plain owned value with no process-wide singleton behind it: tests and
/// callers can run any number of independent sessions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    /// Team in slot A (bats first).
    pub team_a: Team,

    /// Team in slot B.
    pub team_b: Team,

    /// Slot currently at bat. The fielding slot is derived, never stored.
    pub batting_slot: TeamSlot,

    /// Current inning, starting at 1.
    pub inning: u32,

    /// Current half-inning.
    pub half: Half,

    /// Countdown seconds remaining, in `[0, TIMER_DURATION]`.
    pub timer_seconds: u32,

    /// Whether the countdown is live. Always false at zero seconds.
    pub timer_running: bool,

    /// Whether the game has left the setup phase.
    pub started: bool,

    /// Play log, most recent first.
    pub log: VecDeque<PlayRecord>,

    /// Next play id (monotonic counter).
    pub next_play_id: u64,

    /// Events generated since the last drain (cleared by `take_events`).
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new("Team 1", "Team 2")
    }
}

impl GameSession {
    /// Create a fresh session in the setup phase.
    pub fn new(team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        Self {
            team_a: Team::new(team_a),
            team_b: Team::new(team_b),
            batting_slot: TeamSlot::A,
            inning: 1,
            half: Half::Top,
            timer_seconds: TIMER_DURATION,
            timer_running: false,
            started: false,
            log: VecDeque::new(),
            next_play_id: 0,
            pending_events: Vec::new(),
        }
    }

    // =========================================================================
    // Derived accessors
    // =========================================================================

    /// Current macro-phase.
    pub fn phase(&self) -> Phase {
        if self.started {
            Phase::Active
        } else {
            Phase::Setup
        }
    }

    /// Slot currently in the field. Derived from `batting_slot`.
    #[inline]
    pub fn fielding_slot(&self) -> TeamSlot {
        self.batting_slot.other()
    }

    /// Team in a given slot.
    pub fn team(&self, slot: TeamSlot) -> &Team {
        match slot {
            TeamSlot::A => &self.team_a,
            TeamSlot::B => &self.team_b,
        }
    }

    /// Team in a given slot, mutably.
    pub fn team_mut(&mut self, slot: TeamSlot) -> &mut Team {
        match slot {
            TeamSlot::A => &mut self.team_a,
            TeamSlot::B => &mut self.team_b,
        }
    }

    /// Team currently at bat.
    pub fn batting_team(&self) -> &Team {
        self.team(self.batting_slot)
    }

    /// Team currently in the field.
    pub fn fielding_team(&self) -> &Team {
        self.team(self.fielding_slot())
    }

    /// Whether the top half is in progress.
    pub fn is_top_half(&self) -> bool {
        self.half == Half::Top
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Rename the team in a slot. Names persist across `reset_game`.
    pub fn set_team_name(&mut self, slot: TeamSlot, name: impl Into<String>) {
        self.team_mut(slot).name = name.into();
    }

    /// Leave the setup phase with every counter at its initial value.
    ///
    /// No-op once started.
    pub fn start_game(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.push_event(GameEvent::GameStarted);
    }

    /// Return to the setup phase.
    ///
    /// Scores, inning, half, batting slot, timer and log all return to their
    /// initial values; team names are preserved.
    pub fn reset_game(&mut self) {
        self.team_a.score = 0;
        self.team_b.score = 0;
        self.batting_slot = TeamSlot::A;
        self.inning = 1;
        self.half = Half::Top;
        self.timer_seconds = TIMER_DURATION;
        self.timer_running = false;
        self.started = false;
        self.log.clear();
        self.push_event(GameEvent::GameReset);
    }

    /// Record a play from the catalog.
    ///
    /// Batting plays credit the batting team, fielding plays the fielding
    /// team. The new record lands at the head of the log and captures the
    /// countdown at record time. No-op during setup.
    pub fn record_play(&mut self, kind: PlayKind) {
        if !self.started {
            return;
        }

        let category = kind.category();
        let slot = match category {
            PlayCategory::Batting => self.batting_slot,
            PlayCategory::Fielding => self.fielding_slot(),
        };
        let points = kind.points();

        let team = self.team_mut(slot);
        team.score = team.score.saturating_add(points);
        let new_score = team.score;

        let record = PlayRecord {
            id: self.next_play_id,
            inning: self.inning,
            half: self.half,
            team_slot: slot,
            kind,
            points,
            category,
            time_remaining: self.timer_seconds,
        };
        self.next_play_id += 1;
        self.log.push_front(record.clone());
        self.push_event(GameEvent::PlayRecorded { record, new_score });
    }

    /// Take back the most recent play.
    ///
    /// Removes the head of the log and deducts its points from the team it
    /// credited, clamping at zero. Repeated calls walk backward one record
    /// at a time. No-op on an empty log or during setup.
    pub fn undo(&mut self) {
        if !self.started {
            return;
        }
        let Some(record) = self.log.pop_front() else {
            return;
        };

        let team = self.team_mut(record.team_slot);
        team.score = team.score.saturating_sub(record.points);
        let new_score = team.score;

        self.push_event(GameEvent::PlayUndone { record, new_score });
    }

    /// Start or pause the countdown.
    ///
    /// No-op at zero seconds (nothing left to resume) and during setup.
    pub fn toggle_timer(&mut self) {
        if !self.started || self.timer_seconds == 0 {
            return;
        }
        self.timer_running = !self.timer_running;
        self.push_event(GameEvent::TimerToggled {
            running: self.timer_running,
        });
    }

    /// Stop the countdown and rewind it to the full duration.
    ///
    /// Scores, log and inning are untouched. No-op during setup.
    pub fn reset_timer(&mut self) {
        if !self.started {
            return;
        }
        self.timer_seconds = TIMER_DURATION;
        self.timer_running = false;
        self.push_event(GameEvent::TimerReset);
    }

    /// Hand the bat to the other team.
    ///
    /// Operator-driven: there is no outs-based end-of-half detection. Stops
    /// and rewinds the countdown, advances the inning when leaving a bottom
    /// half, then flips the half and the batting slot. No-op during setup.
    pub fn switch_sides(&mut self) {
        if !self.started {
            return;
        }
        self.timer_seconds = TIMER_DURATION;
        self.timer_running = false;
        if self.half == Half::Bottom {
            self.inning += 1;
        }
        self.half = self.half.flip();
        self.batting_slot = self.batting_slot.other();
        self.push_event(GameEvent::SidesSwitched {
            inning: self.inning,
            half: self.half,
            batting_slot: self.batting_slot,
        });
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Push a pending event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

/// Format countdown seconds as `m:ss` for display.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

// =============================================================================
// TESTS
// =============================================================================
