use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use serde::Serialize;
use simon_core::{
    ColorIndex, ColorSlot, GameEngine, GameEvent, GuessOutcome, RandomColors, SystemClock,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::store::BrowserStore;
use crate::utils::js_random_seed;
use crate::Args;

type BrowserEngine = GameEngine<BrowserStore, RandomColors, SystemClock>;

/// Messages delivered to the page listener besides the engine's own events.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum HostMessage<'a> {
    Slots { slots: &'a [ColorSlot] },
}

struct Host {
    engine: RefCell<BrowserEngine>,
    outbox: Rc<RefCell<VecDeque<GameEvent>>>,
    listener: js_sys::Function,
    /// Bumped whenever the timer is re-armed; older timers wake up and do nothing.
    pump_generation: Cell<u64>,
}

impl Host {
    /// Runs `f` against the engine, then delivers the events it produced with the engine released, so listeners
    /// may issue further commands.
    fn command<T>(self: &Rc<Self>, f: impl FnOnce(&mut BrowserEngine) -> T) -> T {
        let result = f(&mut self.engine.borrow_mut());
        self.flush();
        self.arm_pump();
        result
    }

    fn flush(&self) {
        loop {
            let Some(event) = self.outbox.borrow_mut().pop_front() else {
                break;
            };
            self.deliver(&event);
        }
    }

    fn deliver(&self, message: &impl Serialize) {
        let value = serde_json::to_string(message)
            .map_err(|err| JsValue::from_str(&err.to_string()))
            .and_then(|text| js_sys::JSON::parse(&text));
        match value {
            Ok(value) => {
                if let Err(err) = self.listener.call1(&JsValue::NULL, &value) {
                    log::error!("Game listener threw: {:?}", err);
                }
            }
            Err(err) => log::error!("Could not encode game message: {:?}", err),
        }
    }

    fn deliver_slots(&self) {
        let slots = self.engine.borrow().slots().to_vec();
        self.deliver(&HostMessage::Slots { slots: &slots });
    }

    /// Schedules a single wake-up for the engine's next timed step, replacing any earlier one.
    fn arm_pump(self: &Rc<Self>) {
        let generation = self.pump_generation.get().wrapping_add(1);
        self.pump_generation.set(generation);

        let Some(delay) = self.engine.borrow().time_until_next_step() else {
            return;
        };
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        log::trace!("next engine step in {}ms", millis);

        let host = Rc::downgrade(self);
        spawn_local(async move {
            TimeoutFuture::new(millis).await;
            let Some(host) = host.upgrade() else {
                return;
            };
            if host.pump_generation.get() != generation {
                return;
            }
            let applied = host.command(|engine| engine.advance());
            if applied > 0 {
                host.deliver_slots();
            }
        });
    }
}

/// JS numbers arrive as `u32`; anything wider than a [`ColorIndex`] cannot name a slot.
fn guess_color(value: u32) -> Option<ColorIndex> {
    ColorIndex::try_from(value).ok()
}

fn outcome_name(outcome: GuessOutcome) -> &'static str {
    match outcome {
        GuessOutcome::Ignored => "ignored",
        GuessOutcome::Accepted => "accepted",
        GuessOutcome::LevelUp => "levelUp",
        GuessOutcome::GameOver => "gameOver",
    }
}

/// Browser handle on a game session. Every state change is passed to `listener` as a plain object with a `type`
/// field: `snapshot`, `gameOver`, `storageWarning` or `slots`.
#[wasm_bindgen]
pub struct SimonGame {
    host: Rc<Host>,
}

#[wasm_bindgen]
impl SimonGame {
    #[wasm_bindgen(constructor)]
    pub fn new(listener: js_sys::Function) -> SimonGame {
        let args = Args::from_location();
        let seed = args.seed.unwrap_or_else(js_random_seed);
        log::debug!("color seed: {}", seed);

        let mut engine = GameEngine::new(
            args.engine_config(),
            BrowserStore::local(),
            RandomColors::new(seed),
            SystemClock::new(),
        );
        let outbox = Rc::new(RefCell::new(VecDeque::new()));
        let sink = outbox.clone();
        engine.subscribe(move |event| sink.borrow_mut().push_back(event.clone()));

        SimonGame {
            host: Rc::new(Host {
                engine: RefCell::new(engine),
                outbox,
                listener,
                pump_generation: Cell::new(0),
            }),
        }
    }

    pub fn initialize(&self) {
        self.host.command(|engine| engine.initialize());
        self.host.deliver_slots();
    }

    #[wasm_bindgen(js_name = setPlayerName)]
    pub fn set_player_name(&self, name: String) {
        self.host.command(|engine| engine.set_player_name(name));
    }

    pub fn start(&self) {
        self.host.command(|engine| engine.start());
        self.host.deliver_slots();
    }

    /// Returns `"ignored"`, `"accepted"`, `"levelUp"` or `"gameOver"`. Indices outside the palette are ignored.
    #[wasm_bindgen(js_name = submitGuess)]
    pub fn submit_guess(&self, color: u32) -> String {
        let Some(color) = guess_color(color) else {
            log::warn!("Guess {} is not a color index", color);
            return outcome_name(GuessOutcome::Ignored).to_string();
        };
        let outcome = self.host.command(|engine| engine.submit_guess(color));
        if outcome.has_update() {
            self.host.deliver_slots();
        }
        outcome_name(outcome).to_string()
    }

    pub fn teardown(&self) {
        self.host.command(|engine| engine.teardown());
        self.host.deliver_slots();
    }

    pub fn palette(&self) -> Vec<String> {
        self.host.engine.borrow().config().palette.clone()
    }

    pub fn level(&self) -> u32 {
        self.host.engine.borrow().level()
    }

    #[wasm_bindgen(js_name = gameStarted)]
    pub fn game_started(&self) -> bool {
        self.host.engine.borrow().state().is_playing()
    }
}
