//! # Points Game Session Core
//!
//! Deterministic scorekeeping session for the "Points Game" practice format:
//! two teams trade timed half-innings and accrue points for batting and
//! fielding plays, with an undoable play-by-play log.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        POINTS GAME                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  game/           - Session core (deterministic)              │
//! │  ├── play.rs     - Closed catalog of scoreable plays         │
//! │  ├── state.rs    - Session state and command transitions     │
//! │  ├── command.rs  - Operator command stream and dispatch      │
//! │  ├── tick.rs     - 1 Hz countdown transition                 │
//! │  └── events.rs   - Transition notifications                  │
//! │                                                              │
//! │  driver/         - Async shell (non-deterministic)           │
//! │  └── session.rs  - Command serialization, 1 Hz timer driver, │
//! │                    snapshot + event fan-out                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `game/` module is **100% deterministic**:
//! - No clocks (the timer only moves when a tick is fed in)
//! - No I/O and no global state
//! - All transitions are total: an action that is not legal in the current
//!   state is a no-op, never an error
//!
//! Given the same command and tick sequence, a session reaches the same
//! state on any platform, and any number of sessions can coexist.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod driver;
pub mod game;

// Re-export commonly used types
pub use driver::session::{DriverConfig, DriverError, SessionHandle, SessionId};
pub use game::command::Command;
pub use game::events::GameEvent;
pub use game::play::{PlayCategory, PlayKind};
pub use game::state::{format_clock, GameSession, Half, Phase, PlayRecord, Team, TeamSlot};
pub use game::tick::TickResult;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Countdown tick rate (Hz)
pub const TICK_RATE: u32 = 1;

/// Half-inning countdown duration in seconds (5 minutes)
pub const TIMER_DURATION: u32 = 300;
