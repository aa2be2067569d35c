use anyhow::anyhow;
use spikerun_engine::core::Simulation;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::platform::describe;

#[wasm_bindgen]
extern "C" {
    /// Game object supplied by the page, typically an instance of an
    /// exported `Game` class from the compiled simulation module.
    pub type JsGame;

    #[wasm_bindgen(method, catch)]
    fn update(this: &JsGame, delta_seconds: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn render(this: &JsGame, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn jump(this: &JsGame);

    #[wasm_bindgen(method)]
    fn restart(this: &JsGame);
}

/// Drives a page-supplied game object through the `Simulation` capabilities.
pub struct JsSimulation {
    game: JsGame,
}

impl JsSimulation {
    pub fn new(game: JsGame) -> Self {
        Self { game }
    }
}

impl Simulation for JsSimulation {
    type Surface = CanvasRenderingContext2d;

    fn advance(&mut self, dt: f64) -> anyhow::Result<()> {
        self.game
            .update(dt)
            .map_err(|e| anyhow!("game.update threw: {}", describe(&e)))
    }

    fn draw(&mut self, ctx: &CanvasRenderingContext2d) -> anyhow::Result<()> {
        self.game
            .render(ctx)
            .map_err(|e| anyhow!("game.render threw: {}", describe(&e)))
    }

    fn trigger_jump(&mut self) {
        self.game.jump();
    }

    fn reset(&mut self) {
        self.game.restart();
    }
}
