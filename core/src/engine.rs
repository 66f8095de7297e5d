use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::timeline::{Step, StepAction, Timeline};
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Not started yet, or torn down.
    Ready,
    Playing,
    /// The last guess was wrong; waiting for a new start.
    Over,
}

impl EngineState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Sequence-memory game: grows a color sequence one color per round, plays it back on a timeline and checks the
/// player's guesses against it.
///
/// Time only moves when the host calls [`GameEngine::advance`]; [`GameEngine::time_until_next_step`] says when that
/// is next worth doing. Every state change is reported to subscribers as a [`GameEvent`].
pub struct GameEngine<S, R, K> {
    config: EngineConfig,
    store: S,
    colors: R,
    clock: K,
    slots: Vec<ColorSlot>,
    sequence: Vec<ColorIndex>,
    guesses: Vec<ColorIndex>,
    level: Level,
    leaderboard: Leaderboard,
    leaderboard_loaded: bool,
    player_name: String,
    state: EngineState,
    timeline: Timeline,
    feed: Feed,
}

impl<S, R, K> GameEngine<S, R, K>
where
    S: PersistentStore,
    R: ColorSource,
    K: Clock,
{
    pub fn new(config: EngineConfig, store: S, colors: R, clock: K) -> Self {
        let slots = ColorSlot::from_palette(&config.palette);
        Self {
            config,
            store,
            colors,
            clock,
            slots,
            sequence: Vec::new(),
            guesses: Vec::new(),
            level: FIRST_LEVEL,
            leaderboard: Leaderboard::new(),
            leaderboard_loaded: false,
            player_name: String::new(),
            state: Default::default(),
            timeline: Timeline::default(),
            feed: Feed::default(),
        }
    }

    /// Loads the leaderboard and reports the initial state. Later calls only repeat the current snapshot.
    pub fn initialize(&mut self) {
        self.ensure_leaderboard();
        self.publish_snapshot();
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
        log::debug!("player name: {:?}", self.player_name);
    }

    /// Begins a new game from level 1. The first color is added after the round delay.
    pub fn start(&mut self) {
        self.ensure_leaderboard();
        self.cancel_playback();
        self.level = FIRST_LEVEL;
        self.sequence.clear();
        self.guesses.clear();
        self.state = EngineState::Playing;
        log::debug!("game started by {:?}", self.player_name);
        self.publish_snapshot();
        self.schedule_round();
    }

    pub fn submit_guess(&mut self, color: ColorIndex) -> GuessOutcome {
        if !self.state.is_playing() {
            log::trace!("guess {} ignored, no game in progress", color);
            return GuessOutcome::Ignored;
        }
        if usize::from(color) >= self.slots.len() {
            log::warn!("guess {} ignored, palette has {} colors", color, self.slots.len());
            return GuessOutcome::Ignored;
        }

        // until the round's color is appended the sequence is a level short and nothing can match
        let position = self.guesses.len();
        if !self.round_open() || self.sequence.get(position) != Some(&color) {
            log::debug!("guess {} at position {} does not match", color, position);
            self.end_game();
            return GuessOutcome::GameOver;
        }

        self.guesses.push(color);
        if self.guesses.len() == self.sequence.len() {
            self.level_up();
            GuessOutcome::LevelUp
        } else {
            GuessOutcome::Accepted
        }
    }

    /// Drops the current game and any pending playback. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.cancel_playback();
        self.sequence.clear();
        self.guesses.clear();
        self.level = FIRST_LEVEL;
        self.state = EngineState::Ready;
        log::debug!("engine torn down");
        self.publish_snapshot();
    }

    /// Runs every timed step that is due, in order. Returns how many steps took effect.
    pub fn advance(&mut self) -> usize {
        let now = self.clock.now();
        let mut applied = 0;
        while let Some(step) = self.timeline.pop_due(now) {
            if self.run_step(step) {
                applied += 1;
            }
        }
        applied
    }

    /// Deadline of the next pending step on the engine clock.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timeline.next_due()
    }

    pub fn time_until_next_step(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|due| due.saturating_sub(self.clock.now()))
    }

    pub fn is_playing_back(&self) -> bool {
        self.slots.iter().any(|slot| slot.is_lit) || !self.timeline.is_empty()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.feed.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.feed.unsubscribe(id)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            level: self.level,
            leaderboard: self.leaderboard.clone(),
            game_started: self.state.is_playing(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn sequence(&self) -> &[ColorIndex] {
        &self.sequence
    }

    pub fn guesses(&self) -> &[ColorIndex] {
        &self.guesses
    }

    pub fn slots(&self) -> &[ColorSlot] {
        &self.slots
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn ensure_leaderboard(&mut self) {
        if self.leaderboard_loaded {
            return;
        }
        self.leaderboard_loaded = true;
        match Leaderboard::try_load(&self.store) {
            Ok(leaderboard) => {
                self.leaderboard = leaderboard;
                log::debug!("loaded {} leaderboard entries", self.leaderboard.len());
            }
            Err(err) => {
                log::warn!("Could not read leaderboard, starting empty: {}", err);
                self.leaderboard = Leaderboard::new();
                self.feed.publish(&GameEvent::StorageWarning {
                    message: err.to_string(),
                });
            }
        }
    }

    /// Whether the current round's color has been appended, i.e. the sequence is as long as the level.
    fn round_open(&self) -> bool {
        self.sequence.len() == self.level as usize
    }

    fn schedule_round(&mut self) {
        let due = self.clock.now() + self.config.round_delay;
        self.timeline.schedule(due, StepAction::BeginRound);
    }

    fn run_step(&mut self, step: Step) -> bool {
        if !self.timeline.is_current(&step) || !self.state.is_playing() {
            log::trace!("dropping stale step {:?}", step);
            return false;
        }

        match step.action {
            StepAction::BeginRound => self.begin_round(step.due),
            StepAction::Light(color) => self.set_lit(color, true),
            StepAction::Dim(color) => self.set_lit(color, false),
        }
        true
    }

    /// Grows the sequence by one color and lays out its playback starting at `at`.
    fn begin_round(&mut self, at: Duration) {
        let color = self.colors.next_color(self.slots.len());
        self.sequence.push(color);
        log::debug!(
            "round {} begins, sequence length {}",
            self.level,
            self.sequence.len()
        );

        let step = self.config.step_duration();
        let mut offset = at;
        for &color in &self.sequence {
            self.timeline
                .schedule(offset + self.config.lead_in, StepAction::Light(color));
            offset += step;
            self.timeline.schedule(offset, StepAction::Dim(color));
        }
    }

    fn set_lit(&mut self, color: ColorIndex, is_lit: bool) {
        match self.slots.get_mut(usize::from(color)) {
            Some(slot) => {
                log::trace!("slot {} lit: {}", color, is_lit);
                slot.is_lit = is_lit;
            }
            None => log::warn!("No slot for color {}", color),
        }
    }

    fn cancel_playback(&mut self) {
        self.timeline.cancel_all();
        for slot in self.slots.iter_mut() {
            slot.is_lit = false;
        }
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.guesses.clear();
        log::debug!("level up to {}", self.level);
        self.persist();
        self.publish_snapshot();
        // blinks left over from an early answer must not overlap the next round
        self.cancel_playback();
        self.schedule_round();
    }

    fn end_game(&mut self) {
        let reached = self.level;
        let outcome = self.leaderboard.record(&self.player_name, reached);
        log::debug!(
            "game over for {:?} at level {} ({:?})",
            self.player_name,
            reached,
            outcome
        );

        self.cancel_playback();
        self.level = FIRST_LEVEL;
        self.sequence.clear();
        self.guesses.clear();
        self.state = EngineState::Over;

        self.persist();
        self.publish_snapshot();
        self.feed.publish(&GameEvent::GameOver(GameOverNotice {
            player: self.player_name.clone(),
            level: reached,
        }));
    }

    fn persist(&mut self) {
        if let Err(err) = self.leaderboard.save(&mut self.store) {
            log::warn!("Could not save leaderboard: {}", err);
            self.feed.publish(&GameEvent::StorageWarning {
                message: err.to_string(),
            });
        }
    }

    fn publish_snapshot(&mut self) {
        let snapshot = self.snapshot();
        self.feed.publish(&GameEvent::Snapshot(snapshot));
    }
}

impl<S, R, K> core::fmt::Debug for GameEngine<S, R, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEngine")
            .field("state", &self.state)
            .field("level", &self.level)
            .field("sequence", &self.sequence)
            .field("guesses", &self.guesses)
            .field("player_name", &self.player_name)
            .field("feed", &self.feed)
            .finish_non_exhaustive()
    }
}
