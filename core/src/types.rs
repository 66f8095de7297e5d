/// Position of a color in the palette.
pub type ColorIndex = u8;

/// Level counter and leaderboard score; a fresh game starts at 1.
pub type Level = u32;

pub const FIRST_LEVEL: Level = 1;

/// Key under which a persisted value lives in a [`crate::PersistentStore`].
pub trait StorageKey {
    const KEY: &'static str;
}
