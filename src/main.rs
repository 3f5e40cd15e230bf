//! Points Game Demo
//!
//! Drives a scripted practice game through the session driver and narrates
//! the play-by-play with structured logging.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use points_game::{
    driver::{self, DriverConfig},
    game::{format_clock, GameEvent, GameSession, PlayKind},
    TICK_RATE, TIMER_DURATION, VERSION,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Points Game v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);
    info!("Half-inning clock: {}", format_clock(TIMER_DURATION));

    demo_game().await
}

/// Run a short scripted game.
async fn demo_game() -> Result<()> {
    info!("=== Starting Demo Game ===");

    let session = GameSession::new("Rockets", "Comets");
    let (handle, task) = driver::spawn(DriverConfig::default(), session);

    // Narrate events as they arrive
    let mut events = handle.subscribe_events();
    let narrator = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                GameEvent::PlayRecorded { record, new_score } => {
                    info!(
                        "{} {} | {:?}: {} (+{}) -> {} pts at {}",
                        record.half.label(),
                        record.inning,
                        record.team_slot,
                        record.label(),
                        record.points,
                        new_score,
                        format_clock(record.time_remaining)
                    );
                }
                GameEvent::PlayUndone { record, new_score } => {
                    info!(
                        "Undo {} | {:?} back to {} pts",
                        record.label(),
                        record.team_slot,
                        new_score
                    );
                }
                GameEvent::SidesSwitched {
                    inning,
                    half,
                    batting_slot,
                } => {
                    info!(
                        "Switch sides: {} {} | {:?} now batting",
                        half.label(),
                        inning,
                        batting_slot
                    );
                }
                GameEvent::TimerExpired { inning, half } => {
                    // A real scoreboard buzzes/vibrates off this signal
                    info!("TIME! {} {} is over once the at-bat ends", half.label(), inning);
                }
                _ => {}
            }
        }
    });

    handle.start_game().await?;
    handle.toggle_timer().await?;

    // Top 1: Rockets bat
    handle.record_play(PlayKind::Single).await?;
    handle.record_play(PlayKind::Double).await?;
    handle.record_play(PlayKind::Out).await?; // credits the Comets
    handle.record_play(PlayKind::HomeRun).await?;
    handle.record_play(PlayKind::RunScored).await?;

    // Scorer tapped the wrong button
    handle.undo().await?;

    // Let the clock run a little
    tokio::time::sleep(std::time::Duration::from_secs(3)).await;
    handle.switch_sides().await?;

    // Bottom 1: Comets bat
    handle.toggle_timer().await?;
    handle.record_play(PlayKind::Triple).await?;
    handle.record_play(PlayKind::RunScored).await?;
    handle.record_play(PlayKind::Out).await?; // credits the Rockets
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    handle.switch_sides().await?;

    // Give the narrator a beat to drain
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let state = handle.snapshot();
    info!("=== Final Scoreboard ===");
    info!("{}: {}", state.team_a.name, state.team_a.score);
    info!("{}: {}", state.team_b.name, state.team_b.score);
    info!("{} plays logged", state.log.len());
    info!("Snapshot: {}", serde_json::to_string_pretty(&state)?);

    drop(handle);
    task.await?;
    let _ = narrator.await;

    Ok(())
}
