use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a host needs to render the game, as of one state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub level: Level,
    pub leaderboard: Leaderboard,
    pub game_started: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverNotice {
    pub player: String,
    /// Level that was being played when the wrong color was entered.
    pub level: Level,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    Snapshot(GameSnapshot),
    GameOver(GameOverNotice),
    /// Persisting failed; play continues with the in-memory state.
    StorageWarning { message: String },
}

impl GameEvent {
    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        match self {
            Self::Snapshot(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&GameEvent)>;

#[derive(Default)]
pub struct Feed {
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl Feed {
    pub fn subscribe(&mut self, observer: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn publish(&mut self, event: &GameEvent) {
        log::trace!("publish {:?} to {} observers", event, self.observers.len());
        for (_, observer) in self.observers.iter_mut() {
            observer(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feed")
            .field("observers", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    fn ready() -> GameEvent {
        GameEvent::Snapshot(GameSnapshot {
            level: FIRST_LEVEL,
            leaderboard: Leaderboard::new(),
            game_started: false,
        })
    }

    #[test]
    fn unsubscribed_observer_stops_receiving() {
        let mut feed = Feed::default();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let id = {
            let first = first.clone();
            feed.subscribe(move |_| first.set(first.get() + 1))
        };
        {
            let second = second.clone();
            feed.subscribe(move |_| second.set(second.get() + 1));
        }

        feed.publish(&ready());
        assert!(feed.unsubscribe(id));
        assert!(!feed.unsubscribe(id));
        feed.publish(&ready());

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&ready()).unwrap();

        assert_eq!(
            json,
            r#"{"type":"snapshot","level":1,"leaderboard":[],"gameStarted":false}"#
        );
    }

    #[test]
    fn game_over_serializes_with_player() {
        let event = GameEvent::GameOver(GameOverNotice {
            player: "Ava".into(),
            level: 3,
        });

        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"type":"gameOver","player":"Ava","level":3}"#
        );
    }
}
