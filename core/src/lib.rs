#![no_std]

extern crate alloc;

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use clock::*;
pub use engine::*;
pub use error::*;
pub use feed::*;
pub use generator::*;
pub use leaderboard::*;
pub use slot::*;
pub use store::*;
pub use types::*;

mod clock;
mod engine;
mod error;
mod feed;
mod generator;
mod leaderboard;
mod slot;
mod store;
mod timeline;
mod types;

/// Timing and palette for a game session.
///
/// One playback step takes `lead_in + lit`; a round of level `L` therefore plays back for `L` steps after waiting
/// `round_delay`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub palette: Vec<String>,
    pub round_delay: Duration,
    pub lead_in: Duration,
    pub lit: Duration,
}

impl EngineConfig {
    pub const DEFAULT_PALETTE: &'static [&'static str] =
        &["red", "blue", "yellow", "green", "purple", "greenyellow"];
    pub const DEFAULT_ROUND_DELAY: Duration = Duration::from_millis(1000);
    pub const DEFAULT_LEAD_IN: Duration = Duration::from_millis(50);
    pub const DEFAULT_LIT: Duration = Duration::from_millis(450);

    /// Largest palette addressable by a [`ColorIndex`].
    pub const MAX_COLORS: usize = ColorIndex::MAX as usize + 1;

    /// Builds a config as given. `palette` must hold between 1 and [`EngineConfig::MAX_COLORS`] labels, otherwise
    /// rounds pick colors without a slot; use [`EngineConfig::new`] for untrusted input.
    pub const fn new_unchecked(
        palette: Vec<String>,
        round_delay: Duration,
        lead_in: Duration,
        lit: Duration,
    ) -> Self {
        debug_assert!(!palette.is_empty() && palette.len() <= Self::MAX_COLORS);
        Self {
            palette,
            round_delay,
            lead_in,
            lit,
        }
    }

    pub fn new(mut palette: Vec<String>) -> Self {
        if palette.is_empty() {
            log::warn!("Empty palette, fallback to default colors");
            palette = default_palette();
        }
        if palette.len() > Self::MAX_COLORS {
            log::warn!(
                "Palette has {} colors but only {} are addressable, truncating",
                palette.len(),
                Self::MAX_COLORS
            );
            palette.truncate(Self::MAX_COLORS);
        }
        Self::new_unchecked(
            palette,
            Self::DEFAULT_ROUND_DELAY,
            Self::DEFAULT_LEAD_IN,
            Self::DEFAULT_LIT,
        )
    }

    pub fn with_round_delay(mut self, round_delay: Duration) -> Self {
        self.round_delay = round_delay;
        self
    }

    pub fn with_blink(mut self, lead_in: Duration, lit: Duration) -> Self {
        self.lead_in = lead_in;
        self.lit = lit;
        self
    }

    pub fn color_count(&self) -> usize {
        self.palette.len()
    }

    pub fn step_duration(&self) -> Duration {
        self.lead_in + self.lit
    }

    /// Wall time needed to play back a sequence of `level` colors, not counting the round delay.
    pub fn playback_duration(&self, level: Level) -> Duration {
        self.step_duration() * level
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(default_palette())
    }
}

fn default_palette() -> Vec<String> {
    EngineConfig::DEFAULT_PALETTE
        .iter()
        .map(|&label| label.to_owned())
        .collect()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// No game in progress, or the color is not in the palette; the guess was dropped.
    Ignored,
    /// Guess matches so far, the round is not complete yet.
    Accepted,
    LevelUp,
    GameOver,
}

impl GuessOutcome {
    pub const fn has_update(self) -> bool {
        use GuessOutcome::*;
        match self {
            Ignored => false,
            Accepted => false,
            LevelUp => true,
            GameOver => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    Unchanged,
    Inserted,
    Raised,
}

impl RecordOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Unchanged => false,
            Self::Inserted | Self::Raised => true,
        }
    }
}
