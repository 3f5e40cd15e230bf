//! Operator Command Stream
//!
//! The intents a presentation layer forwards into the session, as plain
//! data. Serde-tagged so UI bridges can serialize them; dispatch is
//! exhaustive over the enum.

use serde::{Deserialize, Serialize};

use crate::game::events::GameEvent;
use crate::game::play::PlayKind;
use crate::game::state::{GameSession, TeamSlot};

/// An operator intent, one per scoreboard control.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Record a play from the catalog.
    RecordPlay {
        /// Which play was tapped.
        kind: PlayKind,
    },

    /// Take back the most recent play.
    Undo,

    /// Hand the bat to the other team.
    SwitchSides,

    /// Start or pause the countdown.
    ToggleTimer,

    /// Rewind the countdown to the full duration.
    ResetTimer,

    /// Leave the setup phase.
    StartGame,

    /// Return to the setup phase, keeping team names.
    ResetGame,

    /// Rename a team.
    SetTeamName {
        /// Which slot to rename.
        slot: TeamSlot,
        /// The new display name.
        name: String,
    },
}

/// Apply one command to the session and drain the events it generated.
///
/// Total over all commands and all states: an ill-timed command leaves the
/// session unchanged and returns no events.
pub fn apply(session: &mut GameSession, command: Command) -> Vec<GameEvent> {
    match command {
        Command::RecordPlay { kind } => session.record_play(kind),
        Command::Undo => session.undo(),
        Command::SwitchSides => session.switch_sides(),
        Command::ToggleTimer => session.toggle_timer(),
        Command::ResetTimer => session.reset_timer(),
        Command::StartGame => session.start_game(),
        Command::ResetGame => session.reset_game(),
        Command::SetTeamName { slot, name } => session.set_team_name(slot, name),
    }
    session.take_events()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Half;

    #[test]
    fn test_apply_dispatches_and_drains_events() {
        let mut session = GameSession::default();

        let events = apply(&mut session, Command::StartGame);
        assert_eq!(events, vec![GameEvent::GameStarted]);
        assert!(session.pending_events.is_empty());

        let events = apply(
            &mut session,
            Command::RecordPlay {
                kind: PlayKind::Triple,
            },
        );
        assert_eq!(session.team_a.score, 3);
        assert!(matches!(events[0], GameEvent::PlayRecorded { .. }));

        let events = apply(&mut session, Command::SwitchSides);
        assert_eq!(
            events,
            vec![GameEvent::SidesSwitched {
                inning: 1,
                half: Half::Bottom,
                batting_slot: TeamSlot::B,
            }]
        );
    }

    #[test]
    fn test_noop_command_returns_no_events() {
        let mut session = GameSession::default();
        session.start_game();
        session.take_events();

        let events = apply(&mut session, Command::Undo);
        assert!(events.is_empty());
    }

    #[test]
    fn test_set_team_name() {
        let mut session = GameSession::default();

        apply(
            &mut session,
            Command::SetTeamName {
                slot: TeamSlot::B,
                name: "Comets".into(),
            },
        );

        assert_eq!(session.team_b.name, "Comets");
    }

    #[test]
    fn test_command_wire_format() {
        let json = serde_json::to_string(&Command::RecordPlay {
            kind: PlayKind::HomeRun,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"record_play","kind":"home_run"}"#);

        let parsed: Command = serde_json::from_str(r#"{"type":"toggle_timer"}"#).unwrap();
        assert_eq!(parsed, Command::ToggleTimer);
    }
}
