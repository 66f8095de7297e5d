use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub highscore: Level,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, highscore: Level) -> Self {
        Self {
            name: name.into(),
            highscore,
        }
    }
}

/// Best score per player, highest first, at most [`Leaderboard::CAPACITY`] entries.
///
/// Serializes as a bare JSON array of `{ "name", "highscore" }` records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl StorageKey for Leaderboard {
    const KEY: &'static str = "leaderboard";
}

impl Leaderboard {
    pub const CAPACITY: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a leaderboard from arbitrary entries, restoring ordering, uniqueness and capacity.
    ///
    /// The first entry seen for a name wins after sorting, so duplicates keep their best score.
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(|a, b| b.highscore.cmp(&a.highscore));
        let mut unique: Vec<LeaderboardEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().any(|kept| kept.name == entry.name) {
                log::warn!("Dropping duplicate leaderboard entry for {:?}", entry.name);
                continue;
            }
            unique.push(entry);
        }
        unique.truncate(Self::CAPACITY);
        Self { entries: unique }
    }

    /// Parses a stored blob, treating anything malformed as an empty leaderboard.
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str::<Vec<LeaderboardEntry>>(text) {
            Ok(entries) => Self::from_entries(entries),
            Err(err) => {
                log::warn!("Ignoring malformed leaderboard data: {}", err);
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| GameError::Encode(err.to_string()))
    }

    /// Reads the leaderboard from `store`. Missing or malformed data is an empty leaderboard; only a failing store
    /// is an error.
    pub fn try_load(store: &impl PersistentStore) -> Result<Self> {
        Ok(match store.get(Self::KEY)? {
            Some(text) => Self::from_json(&text),
            None => Self::new(),
        })
    }

    /// Like [`Leaderboard::try_load`], falling back to empty when the store is unreadable.
    pub fn load(store: &impl PersistentStore) -> Self {
        Self::try_load(store).unwrap_or_else(|err| {
            log::warn!("Could not read leaderboard, starting empty: {}", err);
            Self::new()
        })
    }

    pub fn save(&self, store: &mut impl PersistentStore) -> Result<()> {
        let text = self.to_json()?;
        store.set(Self::KEY, &text)?;
        Ok(())
    }

    /// Applies a finished game: insert when `name` is new, raise when `level` beats the stored score.
    pub fn record(&mut self, name: &str, level: Level) -> RecordOutcome {
        let outcome = match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) if entry.highscore < level => {
                entry.highscore = level;
                RecordOutcome::Raised
            }
            Some(_) => RecordOutcome::Unchanged,
            None => {
                self.entries.push(LeaderboardEntry::new(name, level));
                RecordOutcome::Inserted
            }
        };

        if outcome.has_update() {
            // stable, so ties keep their previous order and a newcomer ranks after them
            self.entries.sort_by(|a, b| b.highscore.cmp(&a.highscore));
            if self.entries.len() > Self::CAPACITY {
                let evicted = self.entries.pop();
                log::debug!("leaderboard full, evicted {:?}", evicted);
            }
        }

        outcome
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
