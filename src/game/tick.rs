//! Countdown Tick
//!
//! The 1 Hz transition fed in by the timer driver. The driver gates ticking
//! on `timer_running`, and a spurious tick while the countdown is stopped is
//! a no-op here as well.

use crate::game::events::GameEvent;
use crate::game::state::GameSession;

/// Result of a tick.
#[derive(Debug)]
#[derive(Default)]
pub struct TickResult {
    /// Events generated this tick.
    pub events: Vec<GameEvent>,

    /// Whether the countdown hit zero this tick.
    pub expired: bool,
}

/// Advance the countdown by one second.
///
/// Decrements `timer_seconds` while the countdown is live. On the 1 → 0
/// transition the countdown force-stops and the expiry signal is emitted
/// exactly once: later ticks at zero fall out on the `timer_running` guard.
pub fn tick(session: &mut GameSession) -> TickResult {
    let mut result = TickResult::default();

    if !session.timer_running || session.timer_seconds == 0 {
        return result;
    }

    session.timer_seconds -= 1;
    if session.timer_seconds == 0 {
        session.timer_running = false;
        session.push_event(GameEvent::TimerExpired {
            inning: session.inning,
            half: session.half,
        });
        result.expired = true;
    }

    result.events = session.take_events();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TIMER_DURATION;

    fn running_session() -> GameSession {
        let mut session = GameSession::default();
        session.start_game();
        session.toggle_timer();
        session.take_events();
        session
    }

    #[test]
    fn test_tick_decrements_while_running() {
        let mut session = running_session();

        let result = tick(&mut session);

        assert_eq!(session.timer_seconds, TIMER_DURATION - 1);
        assert!(session.timer_running);
        assert!(!result.expired);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_tick_is_noop_while_stopped() {
        let mut session = GameSession::default();
        session.start_game();
        session.take_events();

        let result = tick(&mut session);

        assert_eq!(session.timer_seconds, TIMER_DURATION);
        assert!(!result.expired);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_countdown_runs_out_with_single_expiry() {
        let mut session = running_session();

        let mut expiries = 0;
        for _ in 0..TIMER_DURATION {
            let result = tick(&mut session);
            expiries += result
                .events
                .iter()
                .filter(|event| event.is_expiry())
                .count();
        }

        assert_eq!(session.timer_seconds, 0);
        assert!(!session.timer_running);
        assert_eq!(expiries, 1);

        // Ticks past zero change nothing and never re-signal
        let result = tick(&mut session);
        assert_eq!(session.timer_seconds, 0);
        assert!(result.events.is_empty());
        assert!(!result.expired);
    }

    #[test]
    fn test_expiry_carries_half_inning_context() {
        let mut session = running_session();
        session.switch_sides();
        session.toggle_timer();
        session.take_events();
        session.timer_seconds = 1;

        let result = tick(&mut session);

        assert!(result.expired);
        assert_eq!(
            result.events,
            vec![GameEvent::TimerExpired {
                inning: 1,
                half: crate::game::state::Half::Bottom,
            }]
        );
    }

    #[test]
    fn test_pause_freezes_the_clock() {
        let mut session = running_session();
        tick(&mut session);
        tick(&mut session);

        session.toggle_timer();
        session.take_events();
        tick(&mut session);
        assert_eq!(session.timer_seconds, TIMER_DURATION - 2);

        session.toggle_timer();
        session.take_events();
        tick(&mut session);
        assert_eq!(session.timer_seconds, TIMER_DURATION - 3);
    }
}
