//! Session Driver Task
//!
//! Owns one `GameSession` on a Tokio task. The task serializes the operator
//! command stream, runs the countdown interval in lock-step with
//! `timer_running`, publishes a full-state snapshot after every transition
//! (the render sink), and broadcasts events to one-shot collaborators such
//! as a haptic/audio notifier. Collaborator delivery failures are ignored;
//! the core never retries.

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::game::command::{apply, Command};
use crate::game::events::GameEvent;
use crate::game::play::PlayKind;
use crate::game::state::{GameSession, TeamSlot};
use crate::game::tick::tick;

/// Unique session identifier.
pub type SessionId = [u8; 16];

/// Configuration for a session driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Interval between countdown ticks. One second in production;
    /// overridable for tests.
    pub tick_interval: Duration,
    /// Command channel capacity.
    pub command_capacity: usize,
    /// Event broadcast capacity.
    pub event_capacity: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            command_capacity: 64,
            event_capacity: 256,
        }
    }
}

/// Driver errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DriverError {
    /// The driver task has stopped and no longer accepts commands.
    #[error("session driver is no longer running")]
    Closed,
}

/// The driver task: one owned session, one logical timeline.
struct SessionDriver {
    session: GameSession,
    commands: mpsc::Receiver<Command>,
    snapshot_tx: watch::Sender<GameSession>,
    event_tx: broadcast::Sender<GameEvent>,
    tick_interval: Duration,
}

impl SessionDriver {
    async fn run(mut self) {
        let mut ticker = interval(self.tick_interval);
        // A paused clock must not bank ticks to replay on resume
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let running = self.session.timer_running;
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        // All handles dropped
                        break;
                    };
                    let was_running = self.session.timer_running;
                    let events = apply(&mut self.session, command);
                    if !was_running && self.session.timer_running {
                        // Fresh countdown: first tick lands a full period out
                        ticker.reset();
                    }
                    self.publish(events);
                }
                _ = ticker.tick(), if running => {
                    let result = tick(&mut self.session);
                    if result.expired {
                        info!(
                            inning = self.session.inning,
                            half = self.session.half.label(),
                            "half-inning clock expired"
                        );
                    }
                    self.publish(result.events);
                }
            }
        }
        debug!("session driver stopped");
    }

    fn publish(&mut self, events: Vec<GameEvent>) {
        for event in events {
            // No subscribers is fine
            let _ = self.event_tx.send(event);
        }
        self.snapshot_tx.send_replace(self.session.clone());
    }
}

/// Handle to a running session driver.
///
/// Cloneable; the command source of the session. Commands from all clones
/// funnel through one channel, so they reach the core serialized in arrival
/// order and never concurrently.
#[derive(Clone)]
pub struct SessionHandle {
    id: SessionId,
    commands: mpsc::Sender<Command>,
    snapshot_rx: watch::Receiver<GameSession>,
    event_tx: broadcast::Sender<GameEvent>,
}

impl SessionHandle {
    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Send a raw command to the driver.
    pub async fn send(&self, command: Command) -> Result<(), DriverError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| DriverError::Closed)
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> GameSession {
        self.snapshot_rx.borrow().clone()
    }

    /// Watch channel yielding a snapshot after every transition; the
    /// render sink subscribes here.
    pub fn watch_state(&self) -> watch::Receiver<GameSession> {
        self.snapshot_rx.clone()
    }

    /// Subscribe to transition events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.event_tx.subscribe()
    }

    /// Leave the setup phase.
    pub async fn start_game(&self) -> Result<(), DriverError> {
        self.send(Command::StartGame).await
    }

    /// Return to the setup phase, keeping team names.
    pub async fn reset_game(&self) -> Result<(), DriverError> {
        self.send(Command::ResetGame).await
    }

    /// Record a play from the catalog.
    pub async fn record_play(&self, kind: PlayKind) -> Result<(), DriverError> {
        self.send(Command::RecordPlay { kind }).await
    }

    /// Take back the most recent play.
    pub async fn undo(&self) -> Result<(), DriverError> {
        self.send(Command::Undo).await
    }

    /// Hand the bat to the other team.
    pub async fn switch_sides(&self) -> Result<(), DriverError> {
        self.send(Command::SwitchSides).await
    }

    /// Start or pause the countdown.
    pub async fn toggle_timer(&self) -> Result<(), DriverError> {
        self.send(Command::ToggleTimer).await
    }

    /// Rewind the countdown to the full duration.
    pub async fn reset_timer(&self) -> Result<(), DriverError> {
        self.send(Command::ResetTimer).await
    }

    /// Rename a team.
    pub async fn set_team_name(
        &self,
        slot: TeamSlot,
        name: impl Into<String>,
    ) -> Result<(), DriverError> {
        self.send(Command::SetTeamName {
            slot,
            name: name.into(),
        })
        .await
    }
}

/// Spawn a driver that owns `session`.
///
/// Returns the command handle and the task handle. The task stops when every
/// `SessionHandle` clone has been dropped.
pub fn spawn(config: DriverConfig, session: GameSession) -> (SessionHandle, JoinHandle<()>) {
    let id = uuid::Uuid::new_v4().into_bytes();
    let (command_tx, command_rx) = mpsc::channel(config.command_capacity);
    let (snapshot_tx, snapshot_rx) = watch::channel(session.clone());
    let (event_tx, _) = broadcast::channel(config.event_capacity);

    let driver = SessionDriver {
        session,
        commands: command_rx,
        snapshot_tx,
        event_tx: event_tx.clone(),
        tick_interval: config.tick_interval,
    };

    let task = tokio::spawn(driver.run());

    (
        SessionHandle {
            id,
            commands: command_tx,
            snapshot_rx,
            event_tx,
        },
        task,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TIMER_DURATION;

    async fn wait_for<F>(rx: &mut watch::Receiver<GameSession>, mut predicate: F) -> GameSession
    where
        F: FnMut(&GameSession) -> bool,
    {
        loop {
            {
                let snapshot = rx.borrow_and_update();
                if predicate(&snapshot) {
                    return snapshot.clone();
                }
            }
            rx.changed().await.expect("driver dropped the watch channel");
        }
    }

    #[tokio::test]
    async fn test_commands_flow_through_to_snapshots() {
        let (handle, task) = spawn(DriverConfig::default(), GameSession::default());
        let mut rx = handle.watch_state();

        handle.set_team_name(TeamSlot::A, "Rockets").await.unwrap();
        handle.start_game().await.unwrap();
        handle.record_play(PlayKind::Double).await.unwrap();

        let state = wait_for(&mut rx, |s| !s.log.is_empty()).await;
        assert_eq!(state.team_a.name, "Rockets");
        assert_eq!(state.team_a.score, 2);

        handle.undo().await.unwrap();
        let state = wait_for(&mut rx, |s| s.log.is_empty()).await;
        assert_eq!(state.team_a.score, 0);

        drop(handle);
        drop(rx);
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_expires_with_single_signal() {
        let (handle, task) = spawn(DriverConfig::default(), GameSession::default());
        let mut rx = handle.watch_state();
        let mut events = handle.subscribe_events();

        handle.start_game().await.unwrap();
        handle.toggle_timer().await.unwrap();

        let state = wait_for(&mut rx, |s| s.timer_seconds == 0).await;
        assert!(!state.timer_running);

        let mut expiries = 0;
        while let Ok(event) = events.try_recv() {
            if event.is_expiry() {
                expiries += 1;
            }
        }
        assert_eq!(expiries, 1);

        drop(handle);
        drop(rx);
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_while_stopped() {
        let (handle, task) = spawn(DriverConfig::default(), GameSession::default());
        let mut rx = handle.watch_state();

        handle.start_game().await.unwrap();
        wait_for(&mut rx, |s| s.started).await;

        // Ten virtual seconds with the countdown stopped: the interval
        // branch is disabled, so nothing moves.
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(handle.snapshot().timer_seconds, TIMER_DURATION);

        drop(handle);
        drop(rx);
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_resume_round_trip() {
        let (handle, task) = spawn(DriverConfig::default(), GameSession::default());
        let mut rx = handle.watch_state();

        handle.start_game().await.unwrap();
        handle.toggle_timer().await.unwrap();
        wait_for(&mut rx, |s| s.timer_seconds <= TIMER_DURATION - 3).await;

        handle.toggle_timer().await.unwrap();
        let paused = wait_for(&mut rx, |s| !s.timer_running).await;

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(handle.snapshot().timer_seconds, paused.timer_seconds);

        handle.toggle_timer().await.unwrap();
        let resumed = wait_for(&mut rx, |s| s.timer_seconds < paused.timer_seconds).await;
        assert!(resumed.timer_running);

        drop(handle);
        drop(rx);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_send_after_driver_stopped_is_closed() {
        let (handle, task) = spawn(DriverConfig::default(), GameSession::default());

        task.abort();
        let _ = task.await;

        let result = handle.start_game().await;
        assert!(matches!(result, Err(DriverError::Closed)));
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let (handle_a, task_a) = spawn(DriverConfig::default(), GameSession::default());
        let (handle_b, task_b) = spawn(DriverConfig::default(), GameSession::default());
        let mut rx_a = handle_a.watch_state();

        handle_a.start_game().await.unwrap();
        handle_a.record_play(PlayKind::HomeRun).await.unwrap();
        wait_for(&mut rx_a, |s| !s.log.is_empty()).await;

        assert_eq!(handle_b.snapshot().team_a.score, 0);
        assert!(!handle_b.snapshot().started);
        assert_ne!(handle_a.id(), handle_b.id());

        drop(handle_a);
        drop(handle_b);
        drop(rx_a);
        task_a.await.unwrap();
        task_b.await.unwrap();
    }
}
