// src/game/base.rs
use std::rc::Rc;

use crate::errors::{ArcadeError, Result};
use crate::input::InputEvent;
use crate::screen::{Color, ScreenContext, SharedSurface};

use super::{GameConfig, GameMeta};

/// Lifecycle state every game module embeds.
///
/// Holds the validated metadata, the host's screen context, the background
/// color shared with the host and the surface handed over by the latest
/// `start`.
#[derive(Debug)]
pub struct GameBase {
    metadata: GameMeta,
    context: Rc<ScreenContext>,
    bg_color: Color,
    running: bool,
    surface: Option<SharedSurface>,
}

impl GameBase {
    /// Fails if `metadata` is incomplete.
    pub fn new(metadata: GameMeta, context: Rc<ScreenContext>, bg_color: Color) -> Result<Self> {
        metadata.validate()?;
        Ok(Self {
            metadata,
            context,
            bg_color,
            running: false,
            surface: None,
        })
    }

    pub fn start(&mut self, surface: SharedSurface) {
        self.running = true;
        self.surface = Some(surface);
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn metadata(&self) -> &GameMeta {
        &self.metadata
    }

    pub fn context(&self) -> &ScreenContext {
        &self.context
    }

    /// Color the host clears the screen with while this game runs.
    pub fn bg_color(&self) -> Color {
        self.bg_color
    }

    pub fn shared_context(&self) -> Rc<ScreenContext> {
        Rc::clone(&self.context)
    }

    /// Surface from the most recent `start`.
    pub fn surface(&self) -> Result<SharedSurface> {
        self.surface.clone().ok_or(ArcadeError::SurfaceUnavailable)
    }
}

/// Contract between the arcade host and a game.
///
/// The host owns the window, the loop and input polling. Each frame it hands
/// the game the events it polled, then calls `update` and `render` while the
/// game is running. Games never open windows or poll input themselves.
///
/// Implementors embed a [`GameBase`] and expose it through `base`/`base_mut`.
/// `start` and `stop` are provided; per-game work goes in `on_start` and
/// `on_stop` so the running flag is always maintained.
pub trait GameModule {
    fn base(&self) -> &GameBase;

    fn base_mut(&mut self) -> &mut GameBase;

    /// Loads heavy resources (sprites, sounds, levels). The host calls this
    /// once, before the first `start`.
    fn initialize(&mut self, config: &GameConfig) -> Result<()>;

    /// Reacts to the events the host polled this frame.
    fn handle_input(&mut self, events: &[InputEvent]);

    /// Advances the game by `dt` seconds. Only called while running.
    fn update(&mut self, dt: f32);

    /// Draws the current state on the surface given to `start`. Only called
    /// while running.
    fn render(&mut self);

    /// Called after the game is marked running.
    fn on_start(&mut self) {}

    /// Called after the game is marked stopped; release per-session resources here.
    fn on_stop(&mut self) {}

    /// Called by the host each time the player launches the game.
    fn start(&mut self, surface: SharedSurface) {
        self.base_mut().start(surface);
        log::info!("Game \"{}\" started", self.metadata().title());
        self.on_start();
    }

    /// Called by the host when the player returns to the menu or closes the game.
    fn stop(&mut self) {
        self.base_mut().stop();
        log::info!("Game \"{}\" stopped", self.metadata().title());
        self.on_stop();
    }

    fn is_running(&self) -> bool {
        self.base().is_running()
    }

    fn metadata(&self) -> &GameMeta {
        self.base().metadata()
    }

    fn context(&self) -> &ScreenContext {
        self.base().context()
    }

    fn bg_color(&self) -> Color {
        self.base().bg_color()
    }

    fn surface(&self) -> Result<SharedSurface> {
        self.base().surface()
    }

    /// Runs the game in its own window without the arcade host. Development
    /// and testing only.
    fn run_independently(&mut self) -> Result<()>
    where
        Self: Sized,
    {
        crate::engine::run_independently(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::meta::MetaField;
    use crate::screen::Surface;
    use crate::testing;

    #[test]
    fn new_rejects_incomplete_metadata() {
        let mut meta = testing::sample_meta("Broken");
        meta.with_group_number(crate::game::meta::UNSET_GROUP);

        match GameBase::new(meta, testing::headless_context(8, 8), Color::BLACK) {
            Err(ArcadeError::Validation(err)) => assert_eq!(err.field(), MetaField::GroupNumber),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn surface_requires_start() {
        let mut base = GameBase::new(testing::sample_meta("Blank"), testing::headless_context(8, 8), Color::BLACK).unwrap();
        assert!(matches!(base.surface(), Err(ArcadeError::SurfaceUnavailable)));

        let surface = Surface::shared(8, 8);
        base.start(Rc::clone(&surface));
        assert!(Rc::ptr_eq(&base.surface().unwrap(), &surface));

        // The surface stays readable after stopping.
        base.stop();
        assert!(base.surface().is_ok());
    }

    #[test]
    fn running_follows_the_latest_call() {
        let mut base = GameBase::new(testing::sample_meta("Toggle"), testing::headless_context(8, 8), Color::BLACK).unwrap();
        assert!(!base.is_running());
        for _ in 0..3 {
            base.start(Surface::shared(8, 8));
            assert!(base.is_running());
            base.stop();
            assert!(!base.is_running());
        }
        base.stop();
        assert!(!base.is_running());
    }

    #[test]
    fn bg_color_is_kept_across_sessions() {
        let teal = Color::rgb(0, 128, 128);
        let mut base = GameBase::new(testing::sample_meta("Teal"), testing::headless_context(8, 8), teal).unwrap();
        assert_eq!(base.bg_color(), teal);

        base.start(Surface::shared(8, 8));
        base.stop();
        assert_eq!(base.bg_color(), teal);
    }
}
