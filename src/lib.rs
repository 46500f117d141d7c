use js_sys::Function;
use rand::{rngs::SmallRng, SeedableRng};
use wasm_bindgen::prelude::*;

pub mod config;
pub mod deck;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod io;
pub mod participant;

pub use deck::{Card, Deck, Rank, Suit};
pub use error::GameError;
pub use event::{GameEvent, Outcome, SessionSummary};
pub use game::{BlackjackGame, GameRules, Phase};
pub use hand::Hand;
pub use io::{ConsoleIo, Decision, GameIo, Replay, ScriptedIo};
pub use participant::Seat;

pub fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Plays a whole session from pre-recorded answers. Each rendered event is
/// passed to `render_callback` as text; the session tally is returned.
#[wasm_bindgen]
pub fn play_session(params: &JsValue, render_callback: &Function) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: config::SessionInput = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    if input.name.trim().is_empty() {
        return Err(JsValue::from_str("Invalid input: name can't be blank"));
    }
    let rules = config::to_game_rules(&input.rules)
        .map_err(|err| JsValue::from_str(&format!("Rules error: {err}")))?;
    let mut game = BlackjackGame::new(rules, seeded_rng(input.seed));

    let mut io = ScriptedIo::new(input.name, input.answers).with_observer(|event| {
        let _ = render_callback.call1(&JsValue::NULL, &JsValue::from_str(&event.to_string()));
    });

    let summary = game
        .run(&mut io)
        .map_err(|err| JsValue::from_str(&format!("Session failed: {err}")))?;

    serde_wasm_bindgen::to_value(&summary)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}
