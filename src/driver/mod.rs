//! Session Driver
//!
//! Async shell around the deterministic core: command serialization, the
//! 1 Hz timer driver, and snapshot/event fan-out to collaborators. This
//! layer is **non-deterministic** - all scorekeeping logic runs through
//! `game/`.

pub mod session;

pub use session::{spawn, DriverConfig, DriverError, SessionHandle, SessionId};
