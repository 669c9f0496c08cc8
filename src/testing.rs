// src/testing.rs
//! Helpers for exercising game modules without a window or GPU.
//!
//! The `contract_*` functions check the lifecycle rules every game module has
//! to follow; call them from a game's own tests with a fresh instance. Game
//! crates enable the `test-helpers` feature in their dev-dependencies.
use std::rc::Rc;

use crate::errors::{ArcadeError, Result};
use crate::game::{GameBase, GameConfig, GameMeta, GameModule};
use crate::input::InputEvent;
use crate::screen::{Color, FrameClock, ScreenContext, SharedSurface, Surface};

/// A screen context backed by an in-memory surface and an idle clock.
pub fn headless_context(width: u32, height: u32) -> Rc<ScreenContext> {
    Rc::new(ScreenContext::new(
        width,
        height,
        Surface::shared(width, height),
        FrameClock::shared(),
        crate::constants::DEFAULT_FPS,
    ))
}

/// Metadata with every required field filled in.
pub fn sample_meta(title: &str) -> GameMeta {
    let mut meta = GameMeta::new();
    meta.with_title(title)
        .with_description(format!("{title} test game"))
        .with_release_date("2025-01-01")
        .with_tags(["test"])
        .with_group_number(0)
        .with_authors(["Test Author"]);
    meta
}

/// Background color of [`RecordingGame`].
pub const RECORDING_BG: Color = Color::rgb(32, 32, 48);

/// Game module that records every call the host makes.
#[derive(Debug)]
pub struct RecordingGame {
    base: GameBase,
    pub initialized: usize,
    pub inputs: Vec<Vec<InputEvent>>,
    pub updates: Vec<f32>,
    pub renders: usize,
    pub starts: usize,
    pub stops: usize,
    /// Makes the next `update` stop the game, like a "game over" would.
    pub stop_on_update: bool,
}

impl RecordingGame {
    pub fn new(context: Rc<ScreenContext>) -> Result<Self> {
        Ok(Self {
            base: GameBase::new(sample_meta("Recorder"), context, RECORDING_BG)?,
            initialized: 0,
            inputs: Vec::new(),
            updates: Vec::new(),
            renders: 0,
            starts: 0,
            stops: 0,
            stop_on_update: false,
        })
    }
}

impl GameModule for RecordingGame {
    fn base(&self) -> &GameBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GameBase {
        &mut self.base
    }

    fn initialize(&mut self, _config: &GameConfig) -> Result<()> {
        self.initialized += 1;
        Ok(())
    }

    fn handle_input(&mut self, events: &[InputEvent]) {
        self.inputs.push(events.to_vec());
    }

    fn update(&mut self, dt: f32) {
        self.updates.push(dt);
        if self.stop_on_update {
            self.stop();
        }
    }

    fn render(&mut self) {
        self.renders += 1;
    }

    fn on_start(&mut self) {
        self.starts += 1;
    }

    fn on_stop(&mut self) {
        self.stops += 1;
    }
}

/// A freshly constructed game is stopped and has no surface.
pub fn contract_starts_stopped(game: &dyn GameModule) {
    assert!(!game.is_running(), "a new game module must not be running");
    assert!(
        matches!(game.surface(), Err(ArcadeError::SurfaceUnavailable)),
        "surface() must fail before the first start()"
    );
}

/// `is_running` reflects the most recent `start`/`stop` call.
pub fn contract_running_follows_start_stop(game: &mut dyn GameModule, surface: &SharedSurface) {
    for _ in 0..3 {
        game.start(Rc::clone(surface));
        assert!(game.is_running(), "start() must mark the game running");
        game.stop();
        assert!(!game.is_running(), "stop() must mark the game stopped");
    }
}

/// After `start(surface)` the game draws on exactly that surface.
pub fn contract_surface_is_the_started_one(game: &mut dyn GameModule, surface: &SharedSurface) {
    game.start(Rc::clone(surface));
    let current = game.surface().expect("surface must be available after start()");
    assert!(
        Rc::ptr_eq(&current, surface),
        "surface() must return the surface passed to start()"
    );
    game.stop();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_game_passes_the_lifecycle_contract() {
        let ctx = headless_context(32, 32);
        let surface = ctx.surface();
        let mut game = RecordingGame::new(Rc::clone(&ctx)).unwrap();

        contract_starts_stopped(&game);
        contract_running_follows_start_stop(&mut game, &surface);
        contract_surface_is_the_started_one(&mut game, &surface);
        assert_eq!((game.starts, game.stops), (4, 4));
    }

    #[test]
    fn sample_meta_is_valid() {
        assert!(sample_meta("Any").validate().is_ok());
    }
}
