//! Play Catalog
//!
//! The closed set of scoreable plays. `record_play` matches exhaustively
//! over this catalog, so a play outside it is unrepresentable rather than a
//! runtime error.

use serde::{Deserialize, Serialize};

/// Which side of the ball a play credits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayCategory {
    /// Credits the team currently at bat.
    Batting,
    /// Credits the team currently in the field.
    Fielding,
}

/// A scoreable play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[serde(rename_all = "snake_case")]
pub enum PlayKind {
    /// Defensive out recorded: 1 point for the fielding team.
    Out = 0,
    /// Single: 1 point for the batting team.
    Single = 1,
    /// Double: 2 points for the batting team.
    Double = 2,
    /// Triple: 3 points for the batting team.
    Triple = 3,
    /// Home run: 4 points for the batting team.
    HomeRun = 4,
    /// Run crosses the plate: 1 point for the batting team.
    RunScored = 5,
}

impl PlayKind {
    /// The full catalog, in scoreboard button order.
    pub const ALL: [PlayKind; 6] = [
        PlayKind::Out,
        PlayKind::Single,
        PlayKind::Double,
        PlayKind::Triple,
        PlayKind::HomeRun,
        PlayKind::RunScored,
    ];

    /// Point value for this play.
    #[inline]
    pub fn points(self) -> u32 {
        match self {
            PlayKind::Out => 1,
            PlayKind::Single => 1,
            PlayKind::Double => 2,
            PlayKind::Triple => 3,
            PlayKind::HomeRun => 4,
            PlayKind::RunScored => 1,
        }
    }

    /// Which side of the ball this play credits.
    #[inline]
    pub fn category(self) -> PlayCategory {
        match self {
            PlayKind::Out => PlayCategory::Fielding,
            PlayKind::Single
            | PlayKind::Double
            | PlayKind::Triple
            | PlayKind::HomeRun
            | PlayKind::RunScored => PlayCategory::Batting,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            PlayKind::Out => "Out",
            PlayKind::Single => "Single",
            PlayKind::Double => "Double",
            PlayKind::Triple => "Triple",
            PlayKind::HomeRun => "Home Run",
            PlayKind::RunScored => "Run Scored",
        }
    }

    /// Get from catalog index (0-5).
    ///
    /// Integration layers mapping raw button indices should treat `None` as
    /// a programming defect and fail fast, not record anything.
    pub fn from_index(index: u8) -> Option<PlayKind> {
        match index {
            0 => Some(PlayKind::Out),
            1 => Some(PlayKind::Single),
            2 => Some(PlayKind::Double),
            3 => Some(PlayKind::Triple),
            4 => Some(PlayKind::HomeRun),
            5 => Some(PlayKind::RunScored),
            _ => None,
        }
    }
}
